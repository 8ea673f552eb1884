//! Persisted player preferences.

use crate::error::ErrorLocation;
use crate::game::GameMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictactoe_engine::{Difficulty, Mark};
use tracing::{debug, info, instrument};

/// Shortest allowed turn, in seconds.
pub const MIN_TURN_TIME: u32 = 5;
/// Longest allowed turn, in seconds.
pub const MAX_TURN_TIME: u32 = 30;

/// Environment variable that overrides the default data directory.
pub const DATA_DIR_ENV: &str = "TICTACTOE_DATA_DIR";
/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = ".tictactoe";
/// Settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Game settings stored as TOML.
///
/// Keys missing from the file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameSettings {
    /// Seconds a human has to move before the turn passes.
    turn_time: u32,

    /// Two humans, or human against computer.
    game_mode: GameMode,

    /// Computer strength in `pvc` games.
    difficulty: Difficulty,

    /// Mark played by the computer in `pvc` games.
    ai_mark: Mark,

    /// Pause before computer moves so they can be followed.
    ai_delay: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            turn_time: 15,
            game_mode: GameMode::Pvp,
            difficulty: Difficulty::Medium,
            ai_mark: Mark::O,
            ai_delay: true,
        }
    }
}

impl GameSettings {
    /// Loads settings from a TOML file.
    ///
    /// A missing file yields the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;

        info!(settings = ?settings, "Settings loaded");
        Ok(settings)
    }

    /// Writes settings to a TOML file, creating parent directories.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::new(format!("Failed to write settings file: {}", e)))?;

        info!("Settings saved");
        Ok(())
    }

    /// Checks that every field is within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TURN_TIME..=MAX_TURN_TIME).contains(&self.turn_time) {
            return Err(ConfigError::new(format!(
                "turn_time must be between {} and {} seconds, got {}",
                MIN_TURN_TIME, MAX_TURN_TIME, self.turn_time
            )));
        }
        Ok(())
    }

    /// Turn length as a [`Duration`].
    pub fn turn_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.turn_time))
    }

    /// Pause before a computer move, zero when pacing is off.
    pub fn ai_pause(&self) -> Duration {
        if self.ai_delay {
            ai_delay_for(self.difficulty)
        } else {
            Duration::ZERO
        }
    }
}

/// Thinking pause for a difficulty. Stronger opponents take longer.
pub fn ai_delay_for(difficulty: Difficulty) -> Duration {
    match difficulty {
        Difficulty::Easy => Duration::from_millis(800),
        Difficulty::Medium => Duration::from_millis(1200),
        Difficulty::Hard => Duration::from_millis(1500),
    }
}

/// Picks the data directory: explicit flag, then environment, then default.
#[instrument]
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    let dir = flag
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    debug!(dir = %dir.display(), "Resolved data directory");
    dir
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}", message, location)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Where it was raised.
    pub location: ErrorLocation,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}
