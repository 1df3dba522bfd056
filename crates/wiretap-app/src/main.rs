//! Headless WIRETAP.
//!
//! Reads commands from stdin (`listen N`, `raid N`, `pause`, `status`,
//! `quit`) while the game runs on its own thread against a simulated mixer.
//! An optional first argument names a JSON config file.

use std::io::BufRead;
use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wiretap_app::input::{parse_line, InputAction};
use wiretap_app::ipc;
use wiretap_app::state::AppState;
use wiretap_app::voices::demo_voice_bank;
use wiretap_core::commands::PlayerCommand;
use wiretap_core::types::format_clock;
use wiretap_sim::config::GameConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(Path::new(&path))?,
        None => GameConfig::default(),
    };
    info!(
        seed = config.seed,
        consoles = config.console_count,
        time_limit = config.time_limit_secs,
        "configuration loaded"
    );

    let state = AppState::new();
    let thread = ipc::start_simulation(&state, config, demo_voice_bank())?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if !state.is_running() {
            break;
        }
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(InputAction::Status)) => {
                if let Some(snap) = ipc::get_snapshot(&state)? {
                    info!(
                        clock = %format_clock(snap.time_remaining_secs),
                        phase = ?snap.phase,
                        level = snap.level,
                        score = snap.score.score,
                        chains = snap.active_chains,
                        "status"
                    );
                }
            }
            Ok(Some(InputAction::Command(cmd))) => {
                let quitting = cmd == PlayerCommand::Quit;
                ipc::send_command(&state, cmd)?;
                if quitting {
                    break;
                }
            }
            Err(e) => warn!("{e}"),
        }
    }

    // End of input means the player went home.
    if state.is_running() {
        let _ = ipc::send_command(&state, PlayerCommand::Quit);
    }
    if thread.join().is_err() {
        warn!("game loop thread panicked");
    }
    Ok(())
}
