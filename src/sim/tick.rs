//! Per-frame simulation step
//!
//! One call to [`tick`] advances the game by exactly one frame: player, bullets,
//! aliens, then collisions. There is no fixed timestep; the game runs at
//! whatever rate the host calls it.

use rand::Rng;

use super::collision;
use super::state::{Bullet, GameEvent, Simulation};
use crate::consts::*;

/// Advance the simulation by one frame.
///
/// Does nothing unless the game is playing.
pub fn tick(sim: &mut Simulation) -> Vec<GameEvent> {
    if !sim.state.is_playing() {
        return Vec::new();
    }

    update_player(sim);
    update_bullets(sim);
    update_aliens(sim);
    collision::resolve(sim)
}

/// Move the ship by its intent and clamp it inside the playfield
pub fn update_player(sim: &mut Simulation) {
    if !sim.state.is_playing() {
        return;
    }
    let player = &mut sim.player;
    let max_x = sim.playfield.width - player.size.x;
    player.pos.x = (player.pos.x + player.dx * player.speed).clamp(0.0, max_x.max(0.0));
}

/// Move both bullet streams and drop anything that left the playfield
pub fn update_bullets(sim: &mut Simulation) {
    if !sim.state.is_playing() {
        return;
    }

    sim.bullets.retain_mut(|bullet| {
        bullet.pos.y -= BULLET_SPEED;
        bullet.pos.y > 0.0
    });

    let floor = sim.playfield.height;
    sim.alien_bullets.retain_mut(|bullet| {
        bullet.pos.y += BULLET_SPEED - ALIEN_BULLET_SLOWDOWN;
        bullet.pos.y < floor
    });
}

/// Formation speed factor: 1 at full strength, rising linearly to 4 as the
/// formation is wiped out
#[inline]
pub fn speed_multiplier(destroyed: usize, total: usize) -> f32 {
    if total == 0 {
        return 1.0;
    }
    1.0 + (destroyed as f32 / total as f32) * SWARM_ACCELERATION
}

/// Move the formation, bounce it off the walls, and let aliens fire
pub fn update_aliens(sim: &mut Simulation) {
    if !sim.state.is_playing() {
        return;
    }

    let total = sim.total_aliens();
    let destroyed = total.saturating_sub(sim.alive_aliens());
    let step = sim.alien_speed * speed_multiplier(destroyed, total) * sim.alien_direction;
    let width = sim.playfield.width;
    let chance = sim.alien_shoot_chance;

    let mut hit_edge = false;
    for alien in sim.aliens.iter_mut().filter(|a| a.alive) {
        alien.pos.x += step;

        if alien.pos.x <= 0.0 || alien.pos.x + alien.size.x >= width {
            hit_edge = true;
        }

        if sim.rng.random::<f64>() < chance {
            let muzzle = alien.muzzle();
            sim.alien_bullets.push(Bullet::new(muzzle.x, muzzle.y));
        }
    }

    // The whole formation bounces as one body
    if hit_edge {
        sim.alien_direction = -sim.alien_direction;
        for alien in sim.aliens.iter_mut().filter(|a| a.alive) {
            alien.pos.y += ALIEN_DROP_DISTANCE;
        }
    }
}

/// Fire a player bullet from the ship's nose. Returns false (and fires
/// nothing) unless the game is playing.
pub fn fire(sim: &mut Simulation) -> bool {
    if !sim.state.is_playing() {
        return false;
    }
    let muzzle = sim.player.muzzle();
    sim.bullets.push(Bullet::new(muzzle.x, muzzle.y));
    true
}
