//! Game loop thread: runs the game at 10 frames per second against a
//! simulated mixer and publishes snapshots.
//!
//! The game is handed to the thread and owned there. Commands arrive via an
//! `mpsc` channel and are applied between frames, never during a tick.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use wiretap_core::constants::FRAME_RATE;
use wiretap_core::events::Effect;
use wiretap_core::state::GameSnapshot;
use wiretap_core::types::format_clock;
use wiretap_sim::audio::SimulatedMixer;
use wiretap_sim::Game;

use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / FRAME_RATE as u64);

/// Phrase length the headless mixer assumes.
pub const PHRASE_SECS: f64 = 2.0;

/// Handles to a running game loop.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub thread: JoinHandle<()>,
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    game: Game,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    running: Arc<Mutex<bool>>,
) -> std::io::Result<GameLoopHandle> {
    let (command_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let mixer = SimulatedMixer::new(game.config().channel_count(), PHRASE_SECS);

    if let Ok(mut flag) = running.lock() {
        *flag = true;
    }
    let thread = std::thread::Builder::new()
        .name("wiretap-game-loop".into())
        .spawn(move || {
            run_game_loop(game, mixer, cmd_rx, &latest_snapshot, FRAME_DURATION);
            if let Ok(mut flag) = running.lock() {
                *flag = false;
            }
        })?;

    Ok(GameLoopHandle { command_tx, thread })
}

/// One frame: audio pass, tick, let the mixer play for `dt`.
pub fn step_frame(game: &mut Game, mixer: &mut SimulatedMixer, dt: f64) -> GameSnapshot {
    game.render_audio(mixer);
    let snapshot = game.tick(dt, mixer);
    mixer.advance(dt);
    for effect in &snapshot.effects {
        log_effect(effect, &snapshot);
    }
    snapshot
}

fn log_effect(effect: &Effect, snapshot: &GameSnapshot) {
    match effect {
        Effect::GameStarted => info!("shift started"),
        Effect::Score { console, delta } => info!(
            %console,
            delta,
            score = snapshot.score.score,
            "verdict"
        ),
        Effect::Countdown { console, time_left } => {
            debug!(%console, time_left, "squad on the way")
        }
        Effect::LevelUp { level } => info!(
            level,
            clock = %format_clock(snapshot.time_remaining_secs),
            "level up"
        ),
    }
}

/// The game loop. Runs until the farewell finishes, a Shutdown command, or
/// channel disconnect.
pub fn run_game_loop(
    mut game: Game,
    mut mixer: SimulatedMixer,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
    frame_duration: Duration,
) {
    let mut last_frame = Instant::now();
    let mut next_frame = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => game.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shut down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one frame by the measured delta
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = step_frame(&mut game, &mut mixer, dt);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if game.is_finished(&mixer) {
            let score = game.score();
            info!(
                score = score.score,
                caught = score.bad_guys_caught,
                detained = score.good_guys_detained,
                level = game.level(),
                "gone home"
            );
            return;
        }

        // 4. Sleep until the next frame
        next_frame += frame_duration;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > frame_duration * 2 {
            // Too far behind; reset instead of catching up
            next_frame = now;
        }
    }
}
