//! Game state and core simulation types
//!
//! Everything one frame of the game touches lives in [`Simulation`], which the
//! frame driver owns and hands to each step.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Simulation frozen, rendering continues with an overlay
    Paused,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Structured notifications produced by state transitions.
///
/// The simulation never touches presentation directly; the frame driver
/// forwards these to whatever HUD is subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    LevelChanged(u32),
    PauseChanged(bool),
    GameOver { final_score: u64 },
    Restarted,
}

/// Score, lives, level and phase for the current run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            phase: GamePhase::Playing,
        }
    }
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Playfield bounds (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Horizontal intent: -1 (left), 0 (idle) or 1 (right)
    pub dx: f32,
}

impl Player {
    pub fn new(playfield: &Playfield) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            dx: 0.0,
        };
        player.pos = Vec2::new(
            player.centered_x(playfield),
            playfield.height - PLAYER_BOTTOM_OFFSET,
        );
        player
    }

    /// X coordinate that centers the ship horizontally
    pub fn centered_x(&self, playfield: &Playfield) -> f32 {
        playfield.width / 2.0 - self.size.x / 2.0
    }

    /// Move back to the horizontal center (after a hit or on restart)
    pub fn recenter(&mut self, playfield: &Playfield) {
        self.pos.x = self.centered_x(playfield);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Spawn point for a player bullet: centered on the nose of the ship
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0, self.pos.y)
    }
}

/// A projectile; width and height are the shared `BULLET_*` constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// A member of the alien formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub pos: Vec2,
    pub size: Vec2,
    /// Destruction is logical; dead aliens stay in the collection
    pub alive: bool,
    /// Point tier (1..=3), derived from the spawn row
    pub tier: u8,
}

impl Alien {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Points awarded for destroying this alien
    pub fn points(&self) -> u64 {
        u64::from(self.tier) * POINTS_PER_TIER
    }

    /// Spawn point for an alien bullet: bottom-center of the sprite
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }
}

/// Tier for a formation row: top row is worth the most
pub fn tier_for_row(row: usize) -> u8 {
    match row {
        0 => 3,
        1 | 2 => 2,
        _ => 1,
    }
}

/// Build a full, living formation of `rows` x `cols` aliens in row-major order
pub fn create_aliens(rows: usize, cols: usize) -> Vec<Alien> {
    let mut aliens = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            aliens.push(Alien {
                pos: Vec2::new(
                    col as f32 * (ALIEN_WIDTH + ALIEN_PADDING) + FORMATION_ORIGIN,
                    row as f32 * (ALIEN_HEIGHT + ALIEN_PADDING) + FORMATION_ORIGIN,
                ),
                size: Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT),
                alive: true,
                tier: tier_for_row(row),
            });
        }
    }
    aliens
}

/// The complete simulation context for one session
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: GameState,
    pub playfield: Playfield,
    pub player: Player,
    /// Player bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Alien bullets, oldest first
    pub alien_bullets: Vec<Bullet>,
    /// Formation in row-major order (fixed size per level)
    pub aliens: Vec<Alien>,
    /// Formation base speed for the current level
    pub alien_speed: f32,
    /// Formation direction: 1 (right) or -1 (left)
    pub alien_direction: f32,
    pub alien_rows: usize,
    pub alien_cols: usize,
    pub alien_shoot_chance: f64,
    /// Seed the RNG was created from (for logging/reproduction)
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl Simulation {
    /// Create a fresh session from validated settings
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let playfield = Playfield {
            width: settings.playfield_width,
            height: settings.playfield_height,
        };
        Self {
            state: GameState::default(),
            playfield,
            player: Player::new(&playfield),
            bullets: Vec::new(),
            alien_bullets: Vec::new(),
            aliens: create_aliens(settings.alien_rows, settings.alien_cols),
            alien_speed: ALIEN_BASE_SPEED,
            alien_direction: 1.0,
            alien_rows: settings.alien_rows,
            alien_cols: settings.alien_cols,
            alien_shoot_chance: settings.alien_shoot_chance,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Size of a full formation for this session
    pub fn total_aliens(&self) -> usize {
        self.alien_rows * self.alien_cols
    }

    pub fn alive_aliens(&self) -> usize {
        self.aliens.iter().filter(|a| a.alive).count()
    }

    /// Replace the formation with a fresh full grid
    pub fn regenerate_aliens(&mut self) {
        self.aliens = create_aliens(self.alien_rows, self.alien_cols);
    }
}
