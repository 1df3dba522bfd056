//! Game configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use wiretap_core::constants::*;

use crate::error::{ConfigError, GameError};

/// Configuration for starting a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for determinism. Same seed and inputs = same game.
    pub seed: u64,
    pub time_limit_secs: f64,
    pub console_count: usize,
    /// Console indices that are never usable.
    pub disabled_consoles: Vec<usize>,
    pub countdown_secs: f64,
    pub arrival_pause_secs: f64,
    pub rest_secs: f64,
    /// Bound on how long a sound step waits for its channel.
    pub max_sound_wait_secs: f64,
    /// Open with the tutorial persona instead of a plain suspect.
    pub tutorial: bool,
    /// Honour developer cheat commands.
    pub dev_mode: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_limit_secs: TIME_LIMIT_SECS,
            console_count: CONSOLE_COUNT,
            disabled_consoles: DISABLED_CONSOLES.to_vec(),
            countdown_secs: ENFORCEMENT_COUNTDOWN_SECS,
            arrival_pause_secs: ARRIVAL_PAUSE_SECS,
            rest_secs: REST_SECS,
            max_sound_wait_secs: MAX_SOUND_WAIT_SECS,
            tutorial: true,
            dev_mode: false,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the construction-time preconditions.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.console_count == 0 {
            return Err(GameError::NoConsoles);
        }
        if let Some(&index) = self
            .disabled_consoles
            .iter()
            .find(|&&i| i >= self.console_count)
        {
            return Err(GameError::DisabledOutOfRange {
                index,
                count: self.console_count,
            });
        }
        let usable = (0..self.console_count)
            .filter(|i| !self.disabled_consoles.contains(i))
            .count();
        if usable == 0 {
            return Err(GameError::AllConsolesDisabled);
        }
        if !(self.time_limit_secs > 0.0) {
            return Err(GameError::InvalidTimeLimit(self.time_limit_secs));
        }
        for (name, value) in [
            ("countdown_secs", self.countdown_secs),
            ("arrival_pause_secs", self.arrival_pause_secs),
            ("rest_secs", self.rest_secs),
            ("max_sound_wait_secs", self.max_sound_wait_secs),
        ] {
            if !(value >= 0.0) {
                return Err(GameError::InvalidTiming { name, value });
            }
        }
        Ok(())
    }

    /// Total audio channels: one per console plus the reserved ones.
    pub fn channel_count(&self) -> usize {
        self.console_count + RESERVED_CHANNELS
    }
}
