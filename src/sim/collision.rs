//! Collision detection and resolution
//!
//! Detection runs against an immutable view of the simulation and produces a
//! [`Collisions`] report; resolution applies that report in a second pass.
//! Splitting the two keeps bullet removal from disturbing the iteration that
//! found the hits, and makes first-match-wins ordering explicit.

use glam::Vec2;

use super::state::{GameEvent, Simulation};

/// Axis-aligned bounding box (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Everything that collided this frame, as indices into the simulation's
/// collections at detection time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collisions {
    /// `(player bullet, alien)` pairs; each bullet and each alien appears at most once
    pub alien_hits: Vec<(usize, usize)>,
    /// Alien bullets overlapping the player
    pub player_hits: Vec<usize>,
    /// A surviving alien reached the player's line
    pub invasion: bool,
    /// No alien survives this frame
    pub formation_cleared: bool,
}

impl Collisions {
    pub fn is_empty(&self) -> bool {
        self.alien_hits.is_empty()
            && self.player_hits.is_empty()
            && !self.invasion
            && !self.formation_cleared
    }
}

/// Find all collisions without mutating anything.
///
/// Bullets are visited oldest first and each claims the first living alien it
/// overlaps in formation order. An alien claimed by an earlier bullet is no
/// longer a candidate, so a later overlapping bullet passes through to the
/// next alien (or survives).
pub fn detect(sim: &Simulation) -> Collisions {
    let mut claimed = vec![false; sim.aliens.len()];
    let mut alien_hits = Vec::new();

    for (bi, bullet) in sim.bullets.iter().enumerate() {
        let bullet_box = bullet.bounds();
        let hit = sim
            .aliens
            .iter()
            .enumerate()
            .find(|(ai, alien)| alien.alive && !claimed[*ai] && alien.bounds().overlaps(&bullet_box));
        if let Some((ai, _)) = hit {
            claimed[ai] = true;
            alien_hits.push((bi, ai));
        }
    }

    let player_box = sim.player.bounds();
    let player_hits = sim
        .alien_bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.bounds().overlaps(&player_box))
        .map(|(i, _)| i)
        .collect();

    let survivors: Vec<_> = sim
        .aliens
        .iter()
        .zip(&claimed)
        .filter(|&(alien, &claimed)| alien.alive && !claimed)
        .map(|(alien, _)| alien)
        .collect();
    let invasion = survivors
        .iter()
        .any(|a| a.bounds().max().y >= sim.player.pos.y);
    let formation_cleared = survivors.is_empty();

    Collisions {
        alien_hits,
        player_hits,
        invasion,
        formation_cleared,
    }
}

/// Keep only the elements whose index is not flagged, preserving order
fn remove_flagged<T>(items: &mut Vec<T>, flagged: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !flagged[index];
        index += 1;
        keep
    });
}

/// Apply a detection report to the simulation.
///
/// Order: score awards, life losses, invasion, level complete. Transitions that
/// are invalid by then (e.g. level complete after game over) are no-ops.
pub fn apply(sim: &mut Simulation, collisions: &Collisions) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !collisions.alien_hits.is_empty() {
        let mut spent = vec![false; sim.bullets.len()];
        for &(bi, ai) in &collisions.alien_hits {
            let alien = &mut sim.aliens[ai];
            alien.alive = false;
            spent[bi] = true;
            let points = alien.points();
            log::debug!("Alien {} (tier {}) destroyed", ai, alien.tier);
            events.extend(sim.award(points));
        }
        remove_flagged(&mut sim.bullets, &spent);
    }

    if !collisions.player_hits.is_empty() {
        let mut spent = vec![false; sim.alien_bullets.len()];
        for &bi in &collisions.player_hits {
            spent[bi] = true;
        }
        remove_flagged(&mut sim.alien_bullets, &spent);
        for _ in &collisions.player_hits {
            events.extend(sim.lose_life());
        }
    }

    if collisions.invasion {
        log::info!("Formation reached the player line");
        events.extend(sim.end_game());
    }

    if collisions.formation_cleared {
        events.extend(sim.next_level());
    }

    events
}

/// Detect and apply collisions for the current frame
pub fn resolve(sim: &mut Simulation) -> Vec<GameEvent> {
    let collisions = detect(sim);
    if collisions.is_empty() {
        return Vec::new();
    }
    apply(sim, &collisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::state::{Bullet, GamePhase};

    fn sim() -> Simulation {
        Simulation::new(&Settings::default(), 1)
    }

    /// Kill every alien except the given indices
    fn keep_only(sim: &mut Simulation, keep: &[usize]) {
        for (i, alien) in sim.aliens.iter_mut().enumerate() {
            alien.alive = keep.contains(&i);
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let far = Aabb::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut sim = sim();
        let alien = sim.aliens[0].clone();

        // Bullet's right edge exactly on the alien's left edge
        sim.bullets.push(Bullet::new(alien.pos.x - BULLET_WIDTH, alien.pos.y));
        assert!(detect(&sim).alien_hits.is_empty());

        // One unit inward registers
        sim.bullets[0].pos.x += 1.0;
        assert_eq!(detect(&sim).alien_hits, vec![(0, 0)]);
    }

    #[test]
    fn test_touching_bottom_edge_does_not_collide() {
        let mut sim = sim();
        // Bottom row, nothing below it
        let index = sim.aliens.len() - ALIEN_COLS;
        let alien = sim.aliens[index].clone();

        sim.bullets.push(Bullet::new(alien.pos.x + 10.0, alien.pos.y + alien.size.y));
        assert!(detect(&sim).alien_hits.is_empty());

        sim.bullets[0].pos.y -= 1.0;
        assert_eq!(detect(&sim).alien_hits, vec![(0, index)]);
    }

    #[test]
    fn test_scoring_by_tier() {
        let mut sim = sim();
        // Row 0 is tier 3, row 1 tier 2, row 4 tier 1
        for row in [0, 1, 4] {
            let alien = &sim.aliens[row * ALIEN_COLS];
            sim.bullets.push(Bullet::new(alien.pos.x + 5.0, alien.pos.y + 5.0));
        }

        let events = resolve(&mut sim);
        assert_eq!(sim.state.score, 60);
        assert!(sim.bullets.is_empty());
        assert_eq!(sim.alive_aliens(), sim.total_aliens() - 3);
        assert_eq!(
            events,
            vec![
                GameEvent::ScoreChanged(30),
                GameEvent::ScoreChanged(50),
                GameEvent::ScoreChanged(60),
            ]
        );
    }

    #[test]
    fn test_bullet_destroys_only_first_overlapping_alien() {
        let mut sim = sim();
        // Stack a second alien on top of the first
        sim.aliens[1].pos = sim.aliens[0].pos;
        let pos = sim.aliens[0].pos;
        sim.bullets.push(Bullet::new(pos.x + 5.0, pos.y + 5.0));

        let collisions = detect(&sim);
        assert_eq!(collisions.alien_hits, vec![(0, 0)]);

        apply(&mut sim, &collisions);
        assert!(!sim.aliens[0].alive);
        assert!(sim.aliens[1].alive);
        assert_eq!(sim.state.score, 30);
    }

    #[test]
    fn test_two_bullets_same_alien() {
        let mut sim = sim();
        let pos = sim.aliens[0].pos;
        sim.bullets.push(Bullet::new(pos.x + 5.0, pos.y + 5.0));
        sim.bullets.push(Bullet::new(pos.x + 10.0, pos.y + 5.0));

        resolve(&mut sim);
        // First bullet claims the alien, second passes through untouched
        assert_eq!(sim.state.score, 30);
        assert_eq!(sim.bullets.len(), 1);
        assert_eq!(sim.bullets[0].pos.x, pos.x + 10.0);
    }

    #[test]
    fn test_multiple_removals_keep_order() {
        let mut sim = sim();
        let a0 = sim.aliens[0].pos;
        let a2 = sim.aliens[2].pos;
        sim.bullets.push(Bullet::new(a0.x + 5.0, a0.y + 5.0));
        sim.bullets.push(Bullet::new(700.0, 300.0));
        sim.bullets.push(Bullet::new(a2.x + 5.0, a2.y + 5.0));
        sim.bullets.push(Bullet::new(710.0, 300.0));

        resolve(&mut sim);
        let xs: Vec<f32> = sim.bullets.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, vec![700.0, 710.0]);
        assert!(!sim.aliens[0].alive);
        assert!(!sim.aliens[2].alive);
    }

    #[test]
    fn test_dead_aliens_ignored() {
        let mut sim = sim();
        sim.aliens[0].alive = false;
        let pos = sim.aliens[0].pos;
        sim.bullets.push(Bullet::new(pos.x + 5.0, pos.y + 5.0));

        assert!(detect(&sim).alien_hits.is_empty());
    }

    #[test]
    fn test_alien_bullet_costs_life() {
        let mut sim = sim();
        let player = sim.player.pos;
        sim.alien_bullets.push(Bullet::new(player.x + 10.0, player.y - 5.0));
        sim.alien_bullets.push(Bullet::new(10.0, 10.0));

        let events = resolve(&mut sim);
        assert_eq!(sim.state.lives, 2);
        assert_eq!(sim.alien_bullets.len(), 1);
        assert_eq!(events, vec![GameEvent::LivesChanged(2)]);
    }

    #[test]
    fn test_invasion_ends_game_without_life_loss() {
        let mut sim = sim();
        let line = sim.player.pos.y;
        sim.aliens[3].pos.y = line - ALIEN_HEIGHT;

        let events = resolve(&mut sim);
        assert_eq!(sim.state.phase, GamePhase::GameOver);
        assert_eq!(sim.state.lives, 3);
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 0 }]);
    }

    #[test]
    fn test_dead_alien_at_bottom_is_harmless() {
        let mut sim = sim();
        sim.aliens[3].pos.y = sim.player.pos.y;
        sim.aliens[3].alive = false;

        assert!(!detect(&sim).invasion);
    }

    #[test]
    fn test_invasion_wins_over_level_clear() {
        let mut sim = sim();
        keep_only(&mut sim, &[0, 1]);
        sim.aliens[0].pos.y = sim.player.pos.y;
        let pos = sim.aliens[1].pos;
        sim.bullets.push(Bullet::new(pos.x + 5.0, pos.y + 5.0));

        resolve(&mut sim);
        assert_eq!(sim.state.phase, GamePhase::GameOver);
        assert_eq!(sim.state.level, 1);
    }

    #[test]
    fn test_last_alien_clears_level() {
        let mut sim = sim();
        keep_only(&mut sim, &[7]);
        let pos = sim.aliens[7].pos;
        sim.bullets.push(Bullet::new(pos.x + 5.0, pos.y + 5.0));
        sim.bullets.push(Bullet::new(600.0, 400.0));
        sim.alien_bullets.push(Bullet::new(20.0, 200.0));

        let events = resolve(&mut sim);
        assert_eq!(sim.state.level, 2);
        assert!((sim.alien_speed - (ALIEN_BASE_SPEED + ALIEN_SPEED_INCREMENT)).abs() < 1e-6);
        assert_eq!(sim.alive_aliens(), sim.total_aliens());
        // Bullets in flight carry over into the next level
        assert_eq!(sim.bullets.len(), 1);
        assert_eq!(sim.alien_bullets.len(), 1);
        assert!(events.contains(&GameEvent::LevelChanged(2)));
    }
}
