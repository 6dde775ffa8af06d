//! Scene building: turn a simulation snapshot into a triangle list

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{BULLET_HEIGHT, BULLET_WIDTH};
use crate::sim::Simulation;

/// Font pixel size of the PAUSED overlay
const LABEL_PIXEL: f32 = 6.0;

/// Build the frame's vertices in draw order: player, aliens, bullets, overlay.
/// The background is the pipeline's clear color.
pub fn build(sim: &Simulation) -> Vec<Vertex> {
    let live = sim.aliens.iter().filter(|a| a.alive);
    let bullet_count = sim.bullets.len() + sim.alien_bullets.len();
    let mut vertices = Vec::with_capacity(6 + sim.aliens.len() * 24 + bullet_count * 6);

    vertices.extend(shapes::rect(sim.player.pos, sim.player.size, colors::PLAYER));

    for alien in live {
        vertices.extend(shapes::alien(alien.pos, alien.size, colors::alien(alien.tier)));
    }

    let bullet_size = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
    for bullet in &sim.bullets {
        vertices.extend(shapes::rect(bullet.pos, bullet_size, colors::PLAYER_BULLET));
    }
    for bullet in &sim.alien_bullets {
        vertices.extend(shapes::rect(bullet.pos, bullet_size, colors::ALIEN_BULLET));
    }

    if sim.state.is_paused() {
        let center = Vec2::new(sim.playfield.width / 2.0, sim.playfield.height / 2.0);
        vertices.extend(shapes::text_centered(
            "PAUSED",
            center,
            LABEL_PIXEL,
            colors::PAUSED_LABEL,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Bullet;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_scene_contents() {
        let mut sim = Simulation::new(&Settings::default(), 1);
        sim.bullets.push(Bullet::new(100.0, 300.0));
        sim.alien_bullets.push(Bullet::new(200.0, 300.0));

        let vertices = build(&sim);
        // 11 tier-3 aliens, 22 tier-2, 22 tier-1, 24 vertices each
        assert_eq!(count_color(&vertices, colors::ALIEN_TIER_2), 22 * 24);
        assert_eq!(count_color(&vertices, colors::ALIEN_TIER_1), 22 * 24);
        assert_eq!(count_color(&vertices, colors::PLAYER_BULLET), 6);
        // Red is shared by tier-3 aliens and alien bullets
        assert_eq!(count_color(&vertices, colors::ALIEN_TIER_3), 11 * 24 + 6);
        // Player (green) and no overlay
        assert_eq!(count_color(&vertices, colors::PLAYER), 6);
    }

    #[test]
    fn test_dead_aliens_not_drawn() {
        let mut sim = Simulation::new(&Settings::default(), 1);
        for alien in sim.aliens.iter_mut().take(11) {
            alien.alive = false;
        }
        let vertices = build(&sim);
        assert_eq!(count_color(&vertices, colors::ALIEN_TIER_3), 0);
    }

    #[test]
    fn test_paused_overlay() {
        let mut sim = Simulation::new(&Settings::default(), 1);
        let playing = build(&sim).len();
        sim.toggle_pause();
        let paused = build(&sim);
        assert!(paused.len() > playing);
        // Overlay shares the player's green
        assert!(count_color(&paused, colors::PAUSED_LABEL) > 6);
    }
}
