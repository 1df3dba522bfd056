//! Effects emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::types::ConsoleId;

/// Level-agnostic notification drained by the renderer each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// A new game has started (title splash).
    GameStarted,
    /// Score changed because of an enforcement at `console`.
    Score { console: ConsoleId, delta: i32 },
    /// An enforcement countdown started at `console`.
    Countdown { console: ConsoleId, time_left: f64 },
    /// The player reached `level`.
    LevelUp { level: u32 },
}
