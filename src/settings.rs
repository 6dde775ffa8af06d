//! Session settings
//!
//! Everything that may vary between sessions without touching gameplay
//! constants. Loaded from JSON; every field falls back to its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in pixels
    pub playfield_width: f32,
    /// Playfield height in pixels
    pub playfield_height: f32,
    /// Formation rows
    pub alien_rows: usize,
    /// Formation columns
    pub alien_cols: usize,
    /// Per-alien, per-frame firing probability (0.0 - 1.0)
    pub alien_shoot_chance: f64,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Frame cap for the headless native run
    pub headless_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            alien_rows: ALIEN_ROWS,
            alien_cols: ALIEN_COLS,
            alien_shoot_chance: ALIEN_SHOOT_CHANCE,
            seed: None,
            headless_frames: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that the formation fits and the values are usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.alien_rows == 0 || self.alien_cols == 0 {
            return Err(SettingsError::Invalid(
                "formation needs at least one row and one column".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.alien_shoot_chance) {
            return Err(SettingsError::Invalid(format!(
                "alien_shoot_chance {} is outside 0..=1",
                self.alien_shoot_chance
            )));
        }
        if self.playfield_width <= PLAYER_WIDTH {
            return Err(SettingsError::Invalid(format!(
                "playfield width {} cannot hold the player",
                self.playfield_width
            )));
        }

        let (formation_w, formation_h) = self.formation_extent();
        if formation_w >= self.playfield_width {
            return Err(SettingsError::Invalid(format!(
                "{} columns do not fit in a {}px wide playfield",
                self.alien_cols, self.playfield_width
            )));
        }
        let player_line = self.playfield_height - PLAYER_BOTTOM_OFFSET;
        if formation_h >= player_line {
            return Err(SettingsError::Invalid(format!(
                "{} rows reach the player line at {}px",
                self.alien_rows, player_line
            )));
        }
        Ok(())
    }

    /// Right and bottom edge of a freshly spawned formation
    pub fn formation_extent(&self) -> (f32, f32) {
        let w = FORMATION_ORIGIN + self.alien_cols as f32 * (ALIEN_WIDTH + ALIEN_PADDING)
            - ALIEN_PADDING;
        let h = FORMATION_ORIGIN + self.alien_rows as f32 * (ALIEN_HEIGHT + ALIEN_PADDING)
            - ALIEN_PADDING;
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.formation_extent(), (590.0, 240.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "alien_rows": 3, "seed": 42 }"#).unwrap();
        assert_eq!(settings.alien_rows, 3);
        assert_eq!(settings.alien_cols, ALIEN_COLS);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.playfield_width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_formation() {
        let err = Settings::from_json(r#"{ "alien_cols": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_formation() {
        let settings = Settings {
            alien_cols: 20,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let settings = Settings {
            alien_rows: 13,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_shoot_chance() {
        let settings = Settings {
            alien_shoot_chance: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/swarm-invaders.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
