//! Game engine: the core of the wiretap game.
//!
//! `Game` owns the floor, the scheduler and the session flags, processes
//! player commands, advances time, and produces `GameSnapshot`s. It is
//! completely headless: audio goes through an injected `AudioBackend`,
//! which keeps every run deterministic for a given seed and input stream.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wiretap_core::commands::PlayerCommand;
use wiretap_core::enums::{GamePhase, Persona};
use wiretap_core::events::Effect;
use wiretap_core::state::{GameSnapshot, ScoreView};
use wiretap_core::types::{ConsoleId, SimTime};
use wiretap_core::voice::VoiceBank;

use crate::audio::AudioBackend;
use crate::config::GameConfig;
use crate::console::Console;
use crate::enforcement::{self, EnforcementTiming};
use crate::error::GameError;
use crate::logic::{Scheduler, StepContext};
use crate::systems;
use crate::systems::audio_mix::{MixState, SessionFlags};
use crate::world::World;

/// Everything needed to resume a game. Serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub time: SimTime,
    /// Seconds left on the game clock. Never increases.
    pub time_remaining: f64,
    pub paused: bool,
    pub quitting: bool,
    pub world: World,
    pub scheduler: Scheduler,
}

impl GameState {
    fn fresh(config: &GameConfig) -> Self {
        Self {
            time: SimTime::default(),
            time_remaining: config.time_limit_secs,
            paused: false,
            quitting: false,
            world: World::new(config),
            scheduler: Scheduler::new(),
        }
    }

    /// Quitting wins over Over, which wins over Paused.
    pub fn phase(&self) -> GamePhase {
        if self.quitting {
            GamePhase::Quitting
        } else if self.time_remaining <= 0.0 {
            GamePhase::Over
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }
}

/// Check that a voice bank can serve every persona and the squad.
pub fn validate_voices(voices: &VoiceBank) -> Result<(), GameError> {
    if voices.voices.is_empty() {
        return Err(GameError::NoVoices);
    }
    if let Some(index) = voices.voices.iter().position(|v| v.benign.is_empty()) {
        return Err(GameError::VoiceWithoutBenignPhrases(index));
    }
    if voices.enforcers.is_empty() {
        return Err(GameError::NoEnforcers);
    }
    if let Some(index) = voices.enforcers.iter().position(|e| e.storm.is_empty()) {
        return Err(GameError::EnforcerWithoutStormPhrases(index));
    }
    if voices.intro.loop_phrases.is_empty() {
        return Err(GameError::IntroWithoutLoopPhrases);
    }
    Ok(())
}

/// The game. Owns all simulation state.
pub struct Game {
    config: GameConfig,
    voices: VoiceBank,
    timing: EnforcementTiming,
    state: GameState,
    command_queue: VecDeque<PlayerCommand>,
    mix: MixState,
}

impl Game {
    /// Validate the config and voice bank, then start a fresh game.
    pub fn new(config: GameConfig, voices: VoiceBank) -> Result<Self, GameError> {
        config.validate()?;
        validate_voices(&voices)?;
        let mut game = Self {
            timing: EnforcementTiming::from(&config),
            state: GameState::fresh(&config),
            config,
            voices,
            command_queue: VecDeque::new(),
            mix: MixState::default(),
        };
        game.start();
        Ok(game)
    }

    /// Resume from a saved state. The state is taken as-is; `start` is not run.
    pub fn restore(config: GameConfig, voices: VoiceBank, state: GameState) -> Result<Self, GameError> {
        config.validate()?;
        validate_voices(&voices)?;
        if state.world.consoles.len() != config.console_count {
            return Err(GameError::ConsoleCountMismatch {
                saved: state.world.consoles.len(),
                configured: config.console_count,
            });
        }
        let misplaced = state.world.consoles.iter().enumerate().find(|(index, console)| {
            console.id.index() != *index || console.disabled != config.disabled_consoles.contains(index)
        });
        if let Some((index, _)) = misplaced {
            return Err(GameError::ConsoleLayoutMismatch(index));
        }
        Ok(Self {
            timing: EnforcementTiming::from(&config),
            // Stinger edges are relative to the restored flags so a restored
            // pause does not replay the coffee-break line.
            mix: MixState::resumed(state.paused, state.quitting),
            state,
            config,
            voices,
            command_queue: VecDeque::new(),
        })
    }

    /// Open the floor: level 1 and the first suspect, already listened to.
    fn start(&mut self) {
        let world = &mut self.state.world;
        world.level = 1;
        world.effects.push(Effect::GameStarted);

        let opener = if self.config.tutorial {
            Persona::IntroGuy
        } else {
            Persona::BadGuy
        };
        if let Some(id) = world.place(opener, &self.voices) {
            if let Some(console) = world.console_mut(id) {
                console.listening = true;
            }
        }
        info!(
            seed = self.config.seed,
            tutorial = self.config.tutorial,
            "game started"
        );
    }

    /// Throw away the current game and start over. The random stream
    /// carries on, so the new floor differs from the last one.
    pub fn reset(&mut self) {
        let rng = self.state.world.rng.clone();
        self.state = GameState::fresh(&self.config);
        self.state.world.rng = rng;
        self.command_queue.clear();
        self.mix = MixState::default();
        self.start();
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the game by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64, audio: &mut dyn AudioBackend) -> GameSnapshot {
        self.process_commands();

        if self.is_running() {
            self.run_systems(dt.max(0.0), audio);
        }

        let effects = std::mem::take(&mut self.state.world.effects);
        systems::snapshot::build_snapshot(&self.state, effects)
    }

    fn run_systems(&mut self, dt: f64, audio: &mut dyn AudioBackend) {
        self.state.time_remaining -= dt;
        if self.state.time_remaining <= 0.0 {
            self.state.time_remaining = 0.0;
            info!(
                score = self.state.world.ledger.score,
                level = self.state.world.level,
                "time is up, game over"
            );
            return;
        }
        self.state.time.advance(dt);

        let GameState { world, scheduler, .. } = &mut self.state;
        let mut ctx = StepContext {
            world,
            voices: &self.voices,
            audio,
        };
        scheduler.advance(dt, &mut ctx);
    }

    fn process_commands(&mut self) {
        while let Some(cmd) = self.command_queue.pop_front() {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::ToggleListening { console } => {
                self.toggle_listening(console);
            }
            PlayerCommand::DispatchEnforcement { console } => {
                self.dispatch_enforcement(console);
            }
            PlayerCommand::TogglePaused => {
                self.toggle_paused();
            }
            PlayerCommand::Quit => self.quit(),
            PlayerCommand::Restart if self.state.quitting => {
                debug!("restart ignored, going home");
            }
            PlayerCommand::Restart => self.reset(),
            PlayerCommand::AddInnocent | PlayerCommand::AddSuspect | PlayerCommand::SetTimeRemaining { .. }
                if !self.config.dev_mode || !self.is_running() =>
            {
                debug!(?cmd, phase = ?self.phase(), "developer command ignored");
            }
            PlayerCommand::AddInnocent => {
                self.state.world.add_good_guy(&self.voices);
            }
            PlayerCommand::AddSuspect => {
                self.state.world.add_bad_guy(&self.voices);
            }
            PlayerCommand::SetTimeRemaining { secs } => {
                // The clock only ever runs down.
                self.state.time_remaining = self.state.time_remaining.min(secs.max(0.0));
            }
        }
    }

    /// Send the squad to `id`. Returns true when a new enforcement started.
    ///
    /// Only an active occupant can be stormed. Storming also turns the
    /// player's headphones on for that console. A console already under
    /// enforcement is left alone.
    pub fn dispatch_enforcement(&mut self, id: ConsoleId) -> bool {
        if !self.is_running() {
            debug!(%id, "dispatch ignored, game not running");
            return false;
        }
        let Some(console) = self.state.world.console_mut(id) else {
            debug!(%id, "dispatch ignored, no such console");
            return false;
        };
        if console.disabled || !console.active {
            debug!(%id, "dispatch ignored, nobody speaking");
            return false;
        }
        let Some(occupant) = console.occupant else {
            return false;
        };
        console.listening = true;
        if console.under_enforcement || self.state.scheduler.has_chain(id) {
            debug!(%id, "dispatch ignored, already under enforcement");
            return false;
        }
        console.under_enforcement = true;

        let lines = enforcement::select_lines(occupant, &self.voices, &mut self.state.world.rng);
        let chain = enforcement::build_chain(id, occupant, lines, self.timing);
        self.state.scheduler.start(chain);
        info!(%id, persona = ?occupant.persona, "enforcement dispatched");
        true
    }

    /// Flip the headphones on a console. Returns false when nothing changed.
    pub fn toggle_listening(&mut self, id: ConsoleId) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.state.world.console_mut(id) {
            Some(console) if !console.disabled => {
                console.toggle_listening();
                true
            }
            _ => {
                debug!(%id, "toggle ignored, console unusable");
                false
            }
        }
    }

    /// Pause or resume. Returns false once the game is over or quitting.
    pub fn toggle_paused(&mut self) -> bool {
        if self.state.quitting || self.is_over() {
            return false;
        }
        self.state.paused = !self.state.paused;
        info!(paused = self.state.paused, "coffee break toggled");
        true
    }

    /// Begin the farewell. The game finishes once the stinger ends.
    pub fn quit(&mut self) {
        if !self.state.quitting {
            self.state.quitting = true;
            info!("going home");
        }
    }

    /// Per-frame audio pass: volumes, phrase loops and stingers.
    pub fn render_audio(&mut self, audio: &mut dyn AudioBackend) {
        let flags = SessionFlags {
            running: self.is_running(),
            paused: self.state.paused,
            quitting: self.state.quitting,
        };
        systems::audio_mix::run(&mut self.state.world, &self.voices, flags, &mut self.mix, audio);
    }

    /// True once quitting and the farewell stinger has stopped.
    pub fn is_finished(&self, audio: &dyn AudioBackend) -> bool {
        self.state.quitting
            && systems::audio_mix::farewell_done(&self.mix, self.state.world.consoles.len(), audio)
    }

    /// Remove and return pending effects without ticking.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.state.world.effects)
    }

    /// Build a snapshot of the current state without ticking or draining.
    pub fn snapshot(&self) -> GameSnapshot {
        systems::snapshot::build_snapshot(&self.state, Vec::new())
    }

    /// Clone the resumable state.
    pub fn save_state(&self) -> GameState {
        self.state.clone()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        self.phase() == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.state.time_remaining <= 0.0
    }

    pub fn level(&self) -> u32 {
        self.state.world.level
    }

    pub fn score(&self) -> ScoreView {
        self.state.world.score_view()
    }

    pub fn time(&self) -> SimTime {
        self.state.time
    }

    pub fn time_remaining(&self) -> f64 {
        self.state.time_remaining
    }

    pub fn consoles(&self) -> &[Console] {
        &self.state.world.consoles
    }

    pub fn console(&self, id: ConsoleId) -> Option<&Console> {
        self.state.world.console(id)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.state.scheduler
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn voices(&self) -> &VoiceBank {
        &self.voices
    }

    /// Seat a persona directly (for tests).
    #[cfg(test)]
    pub(crate) fn place_for_test(&mut self, persona: Persona) -> Option<ConsoleId> {
        match persona {
            Persona::GoodGuy => self.state.world.add_good_guy(&self.voices),
            other => self.state.world.place(other, &self.voices),
        }
    }

    #[cfg(test)]
    pub(crate) fn world_mut_for_test(&mut self) -> &mut World {
        &mut self.state.world
    }
}
