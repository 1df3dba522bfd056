//! Identifiers and simulation time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a console in the game's fixed console bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsoleId(pub usize);

/// Opaque handle to a recorded phrase, resolved by the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseId(pub u32);

/// Audio channel number. Console `i` plays on channel `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub usize);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks that advanced the simulation.
    pub tick: u64,
    /// Elapsed simulation time in seconds (pauses excluded).
    pub elapsed_secs: f64,
}

impl ConsoleId {
    pub fn index(self) -> usize {
        self.0
    }

    /// The audio channel dedicated to this console.
    pub fn channel(self) -> ChannelId {
        ChannelId(self.0)
    }
}

impl fmt::Display for ConsoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "console#{}", self.0)
    }
}

impl From<ConsoleId> for ChannelId {
    fn from(id: ConsoleId) -> Self {
        id.channel()
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Format a remaining-time value as `m:ss`, rounding down to whole seconds.
pub fn format_clock(secs: f64) -> String {
    let whole = secs.max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
