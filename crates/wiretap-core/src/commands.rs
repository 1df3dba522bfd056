//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::ConsoleId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Console actions ---
    /// Flip the headphones on a console.
    ToggleListening { console: ConsoleId },
    /// Send the squad to a console.
    DispatchEnforcement { console: ConsoleId },

    // --- Session control ---
    /// Take (or end) a coffee break.
    TogglePaused,
    /// Leave the game. The farewell stinger still plays.
    Quit,
    /// Start over from level 1.
    Restart,

    // --- Developer cheats (ignored unless dev mode is on) ---
    AddInnocent,
    AddSuspect,
    SetTimeRemaining { secs: f64 },
}
