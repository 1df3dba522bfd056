//! Game state snapshot: the complete visible state handed to the renderer each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::Effect;
use crate::types::{ConsoleId, SimTime};

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub time_remaining_secs: f64,
    pub score: ScoreView,
    pub consoles: Vec<ConsoleView>,
    /// Number of enforcement chains still running.
    pub active_chains: u32,
    /// Effects drained during this tick.
    pub effects: Vec<Effect>,
}

/// One console as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleView {
    pub id: ConsoleId,
    pub phase: ConsolePhase,
    pub persona: Persona,
    pub listening: bool,
    /// Lamp lit: a persona or the squad is audible.
    pub speaking: bool,
    /// Step currently driving this console's enforcement chain.
    pub step: Option<StepKind>,
}

/// Running score for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: i32,
    pub bad_guys_caught: u32,
    pub good_guys_detained: u32,
}
