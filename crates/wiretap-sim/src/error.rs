//! Error types for construction, configuration and persistence.
//!
//! Nothing inside a tick fails: invalid intents are no-ops. These errors
//! only cover preconditions a caller must satisfy before the game runs.

use std::path::PathBuf;

/// Precondition violations detected when building a game.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("console bank is empty")]
    NoConsoles,

    #[error("disabled console {index} is out of range for {count} consoles")]
    DisabledOutOfRange { index: usize, count: usize },

    #[error("every console is disabled")]
    AllConsolesDisabled,

    #[error("time limit must be positive, got {0}")]
    InvalidTimeLimit(f64),

    #[error("{name} must be non-negative, got {value}")]
    InvalidTiming { name: &'static str, value: f64 },

    #[error("voice bank has no civilian voices")]
    NoVoices,

    #[error("civilian voice {0} has no benign phrases")]
    VoiceWithoutBenignPhrases(usize),

    #[error("voice bank has no enforcer voices")]
    NoEnforcers,

    #[error("enforcer voice {0} has no storm phrases")]
    EnforcerWithoutStormPhrases(usize),

    #[error("tutorial voice has no loop phrases")]
    IntroWithoutLoopPhrases,

    #[error("saved state has {saved} consoles but the config declares {configured}")]
    ConsoleCountMismatch { saved: usize, configured: usize },

    #[error("saved console {0} does not match the configured layout")]
    ConsoleLayoutMismatch(usize),
}

/// Errors loading a `GameConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] GameError),
}

/// Errors encoding or restoring simulation state.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to (de)serialize save data: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unsupported save version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },

    #[error("saved state does not fit this game: {0}")]
    Restore(#[from] GameError),
}
