//! Swarm Invaders - A fixed-grid alien invasion arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, per-frame step, collisions, state machine)
//! - `driver`: Frame driver sequencing input, simulation, HUD and rendering
//! - `renderer`: Scene building and WebGPU rendering pipeline
//! - `settings`: Session configuration
//! - `autopilot`: Scripted player for headless runs

pub mod autopilot;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, FrameStatus, Hud, Intent, Renderer};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Distance from the bottom of the playfield to the top of the ship
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

    /// Projectiles (shared by player and alien bullets)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 5.0;
    /// Alien bullets fall this much slower than player bullets rise
    pub const ALIEN_BULLET_SLOWDOWN: f32 = 2.0;

    /// Alien formation
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIEN_COLS: usize = 11;
    pub const ALIEN_WIDTH: f32 = 40.0;
    pub const ALIEN_HEIGHT: f32 = 30.0;
    pub const ALIEN_PADDING: f32 = 10.0;
    /// Top-left corner of the formation at spawn
    pub const FORMATION_ORIGIN: f32 = 50.0;
    pub const ALIEN_BASE_SPEED: f32 = 0.5;
    /// Added to the base speed on every level advance
    pub const ALIEN_SPEED_INCREMENT: f32 = 0.3;
    pub const ALIEN_DROP_DISTANCE: f32 = 20.0;
    /// Per-alien, per-frame probability of firing
    pub const ALIEN_SHOOT_CHANCE: f64 = 0.0003;
    /// Extra speed multiplier gained when the whole formation is destroyed
    pub const SWARM_ACCELERATION: f32 = 3.0;

    /// Run defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const POINTS_PER_TIER: u64 = 10;
}
