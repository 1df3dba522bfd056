//! Command surface between the front end and the game loop thread.
//!
//! Each function takes the shared `AppState` and talks to the loop only
//! through its channel and the published snapshot.

use std::thread::JoinHandle;

use tracing::info;

use wiretap_core::commands::PlayerCommand;
use wiretap_core::state::GameSnapshot;
use wiretap_core::voice::VoiceBank;
use wiretap_sim::config::GameConfig;
use wiretap_sim::error::GameError;
use wiretap_sim::Game;

use crate::game_loop::{self, GameLoopHandle};
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    LoopStopped,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Build the game and spawn the loop thread. Returns the thread handle so
/// the caller can wait for the farewell.
pub fn start_simulation(
    state: &AppState,
    config: GameConfig,
    voices: VoiceBank,
) -> Result<JoinHandle<()>, AppError> {
    if state.is_running() {
        return Err(AppError::AlreadyRunning);
    }
    let game = Game::new(config, voices)?;
    let GameLoopHandle { command_tx, thread } = game_loop::spawn_game_loop(
        game,
        state.latest_snapshot.clone(),
        state.running.clone(),
    )?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    *tx_lock = Some(command_tx);
    info!("simulation started");
    Ok(thread)
}

/// Forward a player command to the loop.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Player(command))
            .map_err(|_| AppError::LoopStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Latest published snapshot, if the loop has produced one.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the loop to stop without the farewell.
pub fn shutdown(state: &AppState) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    if let Some(tx) = tx_lock.as_ref() {
        // A loop that already exited has nothing left to stop.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    Ok(())
}
