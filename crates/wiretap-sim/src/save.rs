//! Resumable state as versioned JSON.
//!
//! A `GameState` is wrapped with a format version so a stale document is
//! rejected instead of being misread. Where the JSON ends up is the
//! caller's business.

use serde::{Deserialize, Serialize};
use tracing::debug;

use wiretap_core::voice::VoiceBank;

use crate::config::GameConfig;
use crate::engine::{Game, GameState};
use crate::error::SaveError;

/// Bumped whenever `GameState` changes shape.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub state: GameState,
}

impl SaveData {
    pub fn from_game(game: &Game) -> Self {
        Self {
            version: SAVE_VERSION,
            state: game.save_state(),
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let data: SaveData = serde_json::from_str(json)?;
        if data.version != SAVE_VERSION {
            return Err(SaveError::Version {
                found: data.version,
                expected: SAVE_VERSION,
            });
        }
        debug!(
            level = data.state.world.level,
            time_remaining = data.state.time_remaining,
            "state decoded"
        );
        Ok(data)
    }

    /// Rebuild a game from this state.
    pub fn into_game(self, config: GameConfig, voices: VoiceBank) -> Result<Game, SaveError> {
        Ok(Game::restore(config, voices, self.state)?)
    }
}
