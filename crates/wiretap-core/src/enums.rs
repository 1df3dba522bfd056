//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavioral category occupying a console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    /// Nobody home.
    #[default]
    Nobody,
    /// Innocent civilian. Only ever says benign things.
    GoodGuy,
    /// Suspect. Mixes benign and suspicious phrases.
    BadGuy,
    /// Tutorial voice. Plays the tutorial once, then loops a reminder.
    IntroGuy,
}

/// Speaker gender of a civilian voice, used to pick apology lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Line the enforcement squad delivers after storming a console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeLine {
    None,
    Gloat,
    Apology,
}

/// Lifecycle phase of a console. Exactly one applies at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsolePhase {
    /// Permanently unusable slot.
    Disabled,
    /// Free for placement.
    #[default]
    Empty,
    /// Occupied, persona talking.
    Active,
    /// Enforcement sequence running.
    UnderEnforcement,
    /// Cooling down after enforcement; not eligible for placement.
    Resting,
}

/// Kind of the logic step currently driving a console, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Pause,
    Countdown,
    PlaySound,
    Score,
    ClearConsole,
    EmptyConsole,
    NextLevel,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
    /// Clock ran out. State is frozen.
    Over,
    /// Player asked to quit; only the farewell stinger still plays.
    Quitting,
}
