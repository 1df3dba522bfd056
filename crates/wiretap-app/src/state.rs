//! Application state shared between the command surface and the game loop
//! thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use wiretap_core::commands::PlayerCommand;
use wiretap_core::state::GameSnapshot;

/// Messages sent from the command surface to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the game.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` because it is Send but not Sync
/// - `Option` covers the time before the loop is started
/// - the latest snapshot and the running flag are shared with the loop thread
pub struct AppState {
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    /// Cleared by the loop thread when it exits.
    pub running: Arc<Mutex<bool>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Arc::new(Mutex::new(false)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().map(|r| *r).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_latest_snapshot_is_shared() {
        let state = AppState::new();
        let handle = Arc::clone(&state.latest_snapshot);
        *handle.lock().unwrap() = Some(GameSnapshot::default());
        assert!(state.latest_snapshot.lock().unwrap().is_some());
    }
}
