//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One discrete step per host frame
//! - Seeded RNG only
//! - Stable iteration order (formation order, bullets oldest first)
//! - State changes reported as `GameEvent`s, never pushed to a UI

pub mod collision;
pub mod machine;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Collisions};
pub use state::{
    Alien, Bullet, GameEvent, GamePhase, GameState, Player, Playfield, Simulation, create_aliens,
};
pub use tick::{fire, speed_multiplier, tick, update_aliens, update_bullets, update_player};
