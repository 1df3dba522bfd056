//! Action-chain scheduler.
//!
//! Each console under enforcement owns one `Chain`: an ordered list of
//! timed `LogicStep`s and a cursor. Every tick the scheduler advances the
//! current step of every chain once. A step that reports `Done` hands over
//! to its successor, which first runs on the following tick; a chain whose
//! last step is done is dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use wiretap_core::enums::StepKind;
use wiretap_core::events::Effect;
use wiretap_core::types::{ChannelId, ConsoleId, PhraseId};
use wiretap_core::voice::VoiceBank;

use crate::audio::AudioBackend;
use crate::console::Vacate;
use crate::progression;
use crate::world::World;

/// Result of advancing a step by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Stay the active step next tick.
    Continue,
    /// Hand over to the successor (or end the chain).
    Done,
}

/// Everything a step may touch while it runs.
pub struct StepContext<'a> {
    pub world: &'a mut World,
    pub voices: &'a VoiceBank,
    pub audio: &'a mut dyn AudioBackend,
}

/// One timed unit of scripted behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step")]
pub enum LogicStep {
    /// Pure timer.
    Pause { time_left: f64 },
    /// Timer that announces itself to the renderer on its first tick.
    Countdown { time_left: f64, announced: bool },
    /// Play a phrase on a channel and wait until the channel goes idle,
    /// or until `max_wait` seconds have passed.
    PlaySound {
        channel: ChannelId,
        phrase: PhraseId,
        started: bool,
        waited: f64,
        max_wait: f64,
    },
    /// Apply the occupant's score profile.
    Score,
    /// Vacate the console and let it rest.
    ClearConsole,
    /// Vacate the console and make it eligible again.
    EmptyConsole,
    /// Advance the game to the next level.
    NextLevel,
}

impl LogicStep {
    pub fn pause(secs: f64) -> Self {
        LogicStep::Pause { time_left: secs }
    }

    pub fn countdown(secs: f64) -> Self {
        LogicStep::Countdown {
            time_left: secs,
            announced: false,
        }
    }

    pub fn play_sound(channel: ChannelId, phrase: PhraseId, max_wait: f64) -> Self {
        LogicStep::PlaySound {
            channel,
            phrase,
            started: false,
            waited: 0.0,
            max_wait,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            LogicStep::Pause { .. } => StepKind::Pause,
            LogicStep::Countdown { .. } => StepKind::Countdown,
            LogicStep::PlaySound { .. } => StepKind::PlaySound,
            LogicStep::Score => StepKind::Score,
            LogicStep::ClearConsole => StepKind::ClearConsole,
            LogicStep::EmptyConsole => StepKind::EmptyConsole,
            LogicStep::NextLevel => StepKind::NextLevel,
        }
    }

    /// Run this step for one tick on behalf of `console`.
    pub fn advance(&mut self, console: ConsoleId, dt: f64, ctx: &mut StepContext<'_>) -> StepOutcome {
        match self {
            LogicStep::Pause { time_left } => run_timer(time_left, dt),
            LogicStep::Countdown {
                time_left,
                announced,
            } => {
                if !*announced {
                    ctx.world.effects.push(Effect::Countdown {
                        console,
                        time_left: *time_left,
                    });
                    *announced = true;
                }
                run_timer(time_left, dt)
            }
            LogicStep::PlaySound {
                channel,
                phrase,
                started,
                waited,
                max_wait,
            } => {
                if !*started {
                    if let Some(c) = ctx.world.console_mut(console) {
                        c.active = false;
                    }
                    ctx.audio.play(*channel, *phrase);
                    *started = true;
                    return StepOutcome::Continue;
                }
                if !ctx.audio.is_channel_busy(*channel) {
                    return StepOutcome::Done;
                }
                *waited += dt;
                if *waited >= *max_wait {
                    warn!(
                        %console,
                        channel = channel.0,
                        waited = *waited,
                        "channel still busy after wait bound, moving on"
                    );
                    StepOutcome::Done
                } else {
                    StepOutcome::Continue
                }
            }
            LogicStep::Score => {
                ctx.world.apply_score(console);
                StepOutcome::Done
            }
            LogicStep::ClearConsole => {
                ctx.world.vacate(console, Vacate::Rest);
                StepOutcome::Done
            }
            LogicStep::EmptyConsole => {
                ctx.world.vacate(console, Vacate::Release);
                StepOutcome::Done
            }
            LogicStep::NextLevel => {
                let level = progression::advance_level(ctx.world, ctx.voices);
                ctx.world.effects.push(Effect::LevelUp { level });
                StepOutcome::Done
            }
        }
    }
}

fn run_timer(time_left: &mut f64, dt: f64) -> StepOutcome {
    *time_left -= dt;
    if *time_left <= 0.0 {
        *time_left = 0.0;
        StepOutcome::Done
    } else {
        StepOutcome::Continue
    }
}

/// Steps scripted for one console, with a cursor on the active step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    console: ConsoleId,
    steps: Vec<LogicStep>,
    cursor: usize,
}

impl Chain {
    pub fn new(console: ConsoleId, steps: Vec<LogicStep>) -> Self {
        Self {
            console,
            steps,
            cursor: 0,
        }
    }

    pub fn console(&self) -> ConsoleId {
        self.console
    }

    pub fn steps(&self) -> &[LogicStep] {
        &self.steps
    }

    pub fn current(&self) -> Option<&LogicStep> {
        self.steps.get(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Advance the active step once. Returns `false` when the chain ended.
    pub fn advance(&mut self, dt: f64, ctx: &mut StepContext<'_>) -> bool {
        let console = self.console;
        let Some(step) = self.steps.get_mut(self.cursor) else {
            return false;
        };
        if step.advance(console, dt, ctx) == StepOutcome::Done {
            debug!(%console, step = ?step.kind(), "step done");
            self.cursor += 1;
        }
        !self.is_finished()
    }
}

/// The set of live chains, at most one per console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    chains: Vec<Chain>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain. Refused when the console already has one or the
    /// chain has no steps.
    pub fn start(&mut self, chain: Chain) -> bool {
        if chain.is_finished() || self.has_chain(chain.console) {
            return false;
        }
        self.chains.push(chain);
        true
    }

    pub fn has_chain(&self, console: ConsoleId) -> bool {
        self.chains.iter().any(|c| c.console == console)
    }

    /// Kind of the step currently driving `console`, if any.
    pub fn step_for(&self, console: ConsoleId) -> Option<StepKind> {
        self.chains
            .iter()
            .find(|c| c.console == console)
            .and_then(Chain::current)
            .map(LogicStep::kind)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn clear(&mut self) {
        self.chains.clear();
    }

    /// Advance every chain by one tick and drop the ones that ended.
    /// Chains touch disjoint consoles, so evaluation order does not matter.
    pub fn advance(&mut self, dt: f64, ctx: &mut StepContext<'_>) {
        for chain in &mut self.chains {
            if !chain.advance(dt, ctx) {
                debug!(console = %chain.console, "chain finished");
            }
        }
        self.chains.retain(|c| !c.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NullAudio, SimulatedMixer};
    use crate::config::GameConfig;
    use crate::console::Occupant;
    use crate::persona::VoiceRef;
    use wiretap_core::enums::{ConsolePhase, Gender, Persona};
    use wiretap_core::voice::{IntroVoice, Stingers, Voice};

    fn bank() -> VoiceBank {
        VoiceBank {
            voices: vec![Voice {
                gender: Gender::Male,
                benign: vec![PhraseId(1)],
                suspicious: vec![PhraseId(2)],
            }],
            enforcers: vec![],
            intro: IntroVoice {
                first_phrase: PhraseId(100),
                loop_phrases: vec![PhraseId(101)],
            },
            stingers: Stingers {
                coffee_break: PhraseId(200),
                back_to_work: PhraseId(201),
                going_home: PhraseId(202),
            },
        }
    }

    fn world_with_bad_guy() -> World {
        let mut world = World::new(&GameConfig::default());
        world.consoles[0].move_in(Occupant {
            persona: Persona::BadGuy,
            voice: VoiceRef::Civilian(0),
        });
        world.consoles[0].under_enforcement = true;
        world
    }

    #[test]
    fn pause_finishes_when_time_runs_out() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        let mut audio = NullAudio;
        let mut ctx = StepContext {
            world: &mut world,
            voices: &bank,
            audio: &mut audio,
        };
        let mut step = LogicStep::pause(1.0);
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Continue);
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Continue);
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Continue);
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Done);
        assert_eq!(step, LogicStep::Pause { time_left: 0.0 });
    }

    #[test]
    fn countdown_announces_once() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        let mut audio = NullAudio;
        let mut ctx = StepContext {
            world: &mut world,
            voices: &bank,
            audio: &mut audio,
        };
        let mut step = LogicStep::countdown(0.5);
        assert_eq!(step.advance(ConsoleId(4), 0.25, &mut ctx), StepOutcome::Continue);
        assert_eq!(step.advance(ConsoleId(4), 0.25, &mut ctx), StepOutcome::Done);
        assert_eq!(
            world.effects,
            vec![Effect::Countdown {
                console: ConsoleId(4),
                time_left: 0.5,
            }]
        );
    }

    #[test]
    fn play_sound_polls_until_idle() {
        let bank = bank();
        let mut world = world_with_bad_guy();
        let mut mixer = SimulatedMixer::new(18, 0.5);
        let mut step = LogicStep::play_sound(ChannelId(0), PhraseId(50), 30.0);

        let mut outcomes = Vec::new();
        for _ in 0..4 {
            let mut ctx = StepContext {
                world: &mut world,
                voices: &bank,
                audio: &mut mixer,
            };
            outcomes.push(step.advance(ConsoleId(0), 0.25, &mut ctx));
            mixer.advance(0.25);
        }
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Continue,
                StepOutcome::Continue,
                StepOutcome::Done,
                StepOutcome::Done,
            ]
        );
        // First tick silenced the occupant's idle loop.
        assert!(!world.consoles[0].active);
        assert_eq!(mixer.history(), &[(ChannelId(0), PhraseId(50))]);
    }

    #[test]
    fn play_sound_gives_up_after_wait_bound() {
        struct StuckAudio;
        impl AudioBackend for StuckAudio {
            fn play(&mut self, _: ChannelId, _: PhraseId) {}
            fn is_channel_busy(&self, _: ChannelId) -> bool {
                true
            }
            fn set_channel_volume(&mut self, _: ChannelId, _: f32) {}
        }

        let bank = bank();
        let mut world = world_with_bad_guy();
        let mut audio = StuckAudio;
        let mut ctx = StepContext {
            world: &mut world,
            voices: &bank,
            audio: &mut audio,
        };
        let mut step = LogicStep::play_sound(ChannelId(0), PhraseId(50), 1.0);
        let mut ticks = 0;
        while step.advance(ConsoleId(0), 0.25, &mut ctx) == StepOutcome::Continue {
            ticks += 1;
            assert!(ticks < 100, "sound step never terminated");
        }
        // One tick to start, four to exhaust the bound.
        assert_eq!(ticks, 4);
    }

    #[test]
    fn play_sound_idle_at_wait_bound_is_not_a_timeout() {
        use std::cell::Cell;

        struct BusyFor(Cell<u32>);
        impl AudioBackend for BusyFor {
            fn play(&mut self, _: ChannelId, _: PhraseId) {}
            fn is_channel_busy(&self, _: ChannelId) -> bool {
                let left = self.0.get();
                self.0.set(left.saturating_sub(1));
                left > 0
            }
            fn set_channel_volume(&mut self, _: ChannelId, _: f32) {}
        }

        let bank = bank();
        let mut world = world_with_bad_guy();
        let mut audio = BusyFor(Cell::new(1));
        let mut ctx = StepContext {
            world: &mut world,
            voices: &bank,
            audio: &mut audio,
        };
        let mut step = LogicStep::play_sound(ChannelId(0), PhraseId(50), 0.5);
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Continue);
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Continue);
        // The channel went idle on the tick the bound would have run out.
        assert_eq!(step.advance(ConsoleId(0), 0.25, &mut ctx), StepOutcome::Done);
        match step {
            LogicStep::PlaySound { waited, max_wait, .. } => assert!(waited < max_wait),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn chain_runs_successor_on_next_tick() {
        let bank = bank();
        let mut world = world_with_bad_guy();
        let mut audio = NullAudio;
        let mut ctx = StepContext {
            world: &mut world,
            voices: &bank,
            audio: &mut audio,
        };
        let mut chain = Chain::new(
            ConsoleId(0),
            vec![LogicStep::Score, LogicStep::ClearConsole, LogicStep::EmptyConsole],
        );

        assert!(chain.advance(0.1, &mut ctx));
        assert_eq!(ctx.world.ledger.score, 1);
        assert_eq!(chain.current(), Some(&LogicStep::ClearConsole));

        assert!(chain.advance(0.1, &mut ctx));
        assert_eq!(ctx.world.consoles[0].phase(), ConsolePhase::Resting);

        assert!(!chain.advance(0.1, &mut ctx));
        assert_eq!(ctx.world.consoles[0].phase(), ConsolePhase::Empty);
        assert!(chain.is_finished());
    }

    #[test]
    fn scheduler_refuses_second_chain_per_console() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.start(Chain::new(ConsoleId(2), vec![LogicStep::pause(1.0)])));
        assert!(!scheduler.start(Chain::new(ConsoleId(2), vec![LogicStep::Score])));
        assert!(!scheduler.start(Chain::new(ConsoleId(3), vec![])));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.step_for(ConsoleId(2)), Some(StepKind::Pause));
        assert_eq!(scheduler.step_for(ConsoleId(3)), None);
    }

    #[test]
    fn scheduler_drops_finished_chains() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        let mut audio = NullAudio;
        let mut scheduler = Scheduler::new();
        scheduler.start(Chain::new(ConsoleId(0), vec![LogicStep::pause(0.1)]));
        scheduler.start(Chain::new(ConsoleId(1), vec![LogicStep::pause(0.3)]));

        let mut ctx = StepContext {
            world: &mut world,
            voices: &bank,
            audio: &mut audio,
        };
        scheduler.advance(0.2, &mut ctx);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.has_chain(ConsoleId(1)));

        scheduler.advance(0.2, &mut ctx);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn chain_serde_keeps_progress() {
        let mut chain = Chain::new(
            ConsoleId(5),
            vec![LogicStep::countdown(3.0), LogicStep::pause(1.0)],
        );
        chain.cursor = 1;
        let json = serde_json::to_string(&chain).unwrap();
        let back: Chain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
        assert_eq!(back.current(), Some(&LogicStep::pause(1.0)));
    }
}
