//! Scripted player for headless/demo runs
//!
//! Chases the lowest living alien and fires on a fixed cadence. Produces the
//! same intents a keyboard would, so it exercises the full input path.

use crate::driver::Intent;
use crate::sim::Simulation;

/// Frames between shots
pub const FIRE_CADENCE: u64 = 20;
/// Horizontal slack before the ship starts moving (pixels)
const DEADZONE: f32 = 6.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Current heading: -1 left, 0 idle, 1 right
    heading: i8,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intents to apply before driving `frame`
    pub fn intents(&mut self, sim: &Simulation, frame: u64) -> Vec<Intent> {
        let mut intents = Vec::new();

        let player_center = sim.player.pos.x + sim.player.size.x / 2.0;
        // Lowest alien is the most dangerous; ties go to the closest one
        let target = sim
            .aliens
            .iter()
            .filter(|a| a.alive)
            .max_by(|a, b| {
                let dist = |x: f32| (x - player_center).abs();
                a.pos
                    .y
                    .total_cmp(&b.pos.y)
                    .then_with(|| dist(b.pos.x).total_cmp(&dist(a.pos.x)))
            })
            .map(|a| a.pos.x + a.size.x / 2.0);

        let heading = match target {
            Some(x) if x > player_center + DEADZONE => 1,
            Some(x) if x < player_center - DEADZONE => -1,
            _ => 0,
        };

        if heading != self.heading {
            intents.push(match heading {
                1 => Intent::MoveRight { active: true },
                -1 => Intent::MoveLeft { active: true },
                _ if self.heading > 0 => Intent::MoveRight { active: false },
                _ => Intent::MoveLeft { active: false },
            });
            self.heading = heading;
        }

        if frame % FIRE_CADENCE == 0 {
            intents.push(Intent::Fire);
        }
        intents
    }
}
