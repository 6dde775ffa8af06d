//! Frame driver
//!
//! Owns the [`Simulation`] and sequences one frame at a time:
//! simulate (when playing) → notify the HUD → render → decide whether the host
//! should schedule another frame. Input intents are applied as they arrive.

use std::fmt::Display;

use crate::sim::{self, GameEvent, Simulation};

/// Normalized player input, decoupled from raw key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft { active: bool },
    MoveRight { active: bool },
    Fire,
    TogglePause,
    Restart,
}

/// Drawing surface the driver hands the finished frame to
pub trait Renderer {
    type Error: Display;

    fn render(&mut self, sim: &Simulation) -> Result<(), Self::Error>;
}

/// Presentation layer subscribing to simulation events (score, lives, overlays)
pub trait Hud {
    fn on_event(&mut self, event: &GameEvent);
}

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stop,
}

pub struct FrameDriver<R: Renderer, H: Hud> {
    sim: Simulation,
    renderer: R,
    hud: H,
    /// Frame loop is scheduled (false once the game is over)
    running: bool,
    frames: u64,
}

impl<R: Renderer, H: Hud> FrameDriver<R, H> {
    pub fn new(sim: Simulation, renderer: R, hud: H) -> Self {
        let mut driver = Self {
            sim,
            renderer,
            hud,
            running: true,
            frames: 0,
        };
        // Push the starting values so the HUD never shows stale text
        let state = driver.sim.state.clone();
        driver.dispatch(&[
            GameEvent::ScoreChanged(state.score),
            GameEvent::LivesChanged(state.lives),
            GameEvent::LevelChanged(state.level),
        ]);
        driver
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames driven since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply one input intent immediately.
    ///
    /// Returns true when the intent restarted a stopped loop, meaning the host
    /// must schedule a frame again.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft { active: true } => self.sim.player.dx = -1.0,
            Intent::MoveRight { active: true } => self.sim.player.dx = 1.0,
            // Releasing either direction stops the ship
            Intent::MoveLeft { active: false } | Intent::MoveRight { active: false } => {
                self.sim.player.dx = 0.0
            }
            Intent::Fire => {
                sim::fire(&mut self.sim);
            }
            Intent::TogglePause => {
                let events = self.sim.toggle_pause();
                self.dispatch(&events);
            }
            Intent::Restart => {
                let events = self.sim.restart();
                self.dispatch(&events);
                let resumed = !self.running;
                self.running = true;
                return resumed;
            }
        }
        false
    }

    /// Drive one frame.
    pub fn frame(&mut self) -> FrameStatus {
        self.frames += 1;

        if self.sim.state.is_playing() {
            let events = sim::tick(&mut self.sim);
            self.dispatch(&events);
        }

        if let Err(e) = self.renderer.render(&self.sim) {
            log::warn!("Render error: {}", e);
        }

        if self.sim.state.is_game_over() {
            if self.running {
                log::info!("Frame loop stopped after {} frames", self.frames);
            }
            self.running = false;
            FrameStatus::Stop
        } else {
            FrameStatus::Continue
        }
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            self.hud.on_event(event);
        }
    }
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type Error = std::convert::Infallible;

    fn render(&mut self, _sim: &Simulation) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// HUD that writes every event to the log
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { final_score } => log::info!("GAME OVER - final score {}", final_score),
            GameEvent::LevelChanged(level) => log::info!("Level: {}", level),
            other => log::debug!("{:?}", other),
        }
    }
}
