//! Game state machine
//!
//! `Playing ⇄ Paused`, `Playing → GameOver`, and `any → Playing` via restart.
//! Every transition returns the events it produced; invalid transitions
//! return nothing and leave the simulation untouched.

use super::state::{GameEvent, GamePhase, GameState, Player, Simulation};
use crate::consts::ALIEN_BASE_SPEED;

impl Simulation {
    /// Flip between playing and paused. No-op once the game is over.
    pub fn toggle_pause(&mut self) -> Vec<GameEvent> {
        let paused = match self.state.phase {
            GamePhase::Playing => true,
            GamePhase::Paused => false,
            GamePhase::GameOver => return Vec::new(),
        };
        self.state.phase = if paused {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        };
        log::debug!("Paused: {}", paused);
        vec![GameEvent::PauseChanged(paused)]
    }

    /// Add points for a destroyed alien
    pub fn award(&mut self, points: u64) -> Vec<GameEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        self.state.score += points;
        vec![GameEvent::ScoreChanged(self.state.score)]
    }

    /// Player was hit by an alien bullet
    pub fn lose_life(&mut self) -> Vec<GameEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        self.state.lives = self.state.lives.saturating_sub(1);
        let mut events = vec![GameEvent::LivesChanged(self.state.lives)];

        if self.state.lives == 0 {
            events.extend(self.end_game());
        } else {
            self.player.recenter(&self.playfield);
        }
        events
    }

    /// End the run immediately, keeping the final score
    pub fn end_game(&mut self) -> Vec<GameEvent> {
        if self.state.is_game_over() {
            return Vec::new();
        }
        self.state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} at level {}",
            self.state.score,
            self.state.level
        );
        vec![GameEvent::GameOver {
            final_score: self.state.score,
        }]
    }

    /// Formation destroyed: speed up and spawn a fresh grid.
    ///
    /// Bullets in flight are left alone.
    pub fn next_level(&mut self) -> Vec<GameEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        self.state.level += 1;
        self.alien_speed += crate::consts::ALIEN_SPEED_INCREMENT;
        self.regenerate_aliens();
        log::info!(
            "Level {} (alien speed {:.1})",
            self.state.level,
            self.alien_speed
        );
        vec![GameEvent::LevelChanged(self.state.level)]
    }

    /// Reset the run to its initial state. Valid from any phase.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.state = GameState::default();
        self.player = Player::new(&self.playfield);
        self.bullets.clear();
        self.alien_bullets.clear();
        self.alien_speed = ALIEN_BASE_SPEED;
        self.alien_direction = 1.0;
        self.regenerate_aliens();
        log::info!("Game restarted");

        vec![
            GameEvent::ScoreChanged(self.state.score),
            GameEvent::LivesChanged(self.state.lives),
            GameEvent::LevelChanged(self.state.level),
            GameEvent::Restarted,
        ]
    }
}
