//! Enforcement dispatch: which squad lines are spoken and the chain of
//! steps that plays out at a stormed console.

use rand::seq::SliceRandom;
use rand::Rng;

use wiretap_core::enums::{Gender, OutcomeLine};
use wiretap_core::types::{ConsoleId, PhraseId};
use wiretap_core::voice::{EnforcerVoice, VoiceBank};

use crate::config::GameConfig;
use crate::console::Occupant;
use crate::logic::{Chain, LogicStep};
use crate::persona::{get_profile, voice_gender};

/// Durations used when scripting an enforcement chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnforcementTiming {
    pub countdown_secs: f64,
    pub arrival_pause_secs: f64,
    pub rest_secs: f64,
    pub max_sound_wait_secs: f64,
}

impl From<&GameConfig> for EnforcementTiming {
    fn from(config: &GameConfig) -> Self {
        Self {
            countdown_secs: config.countdown_secs,
            arrival_pause_secs: config.arrival_pause_secs,
            rest_secs: config.rest_secs,
            max_sound_wait_secs: config.max_sound_wait_secs,
        }
    }
}

/// What the squad says at a console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadLines {
    /// Arrival line.
    pub storm: Option<PhraseId>,
    /// Gloat or apology after the verdict.
    pub outcome: Option<PhraseId>,
}

/// Pick the squad member and lines for storming `occupant`.
///
/// Suspects get a gloat. Innocents get an apology matching their gender;
/// when no squad member has one, any apology will do. The arrival line is
/// spoken by the same squad member as the outcome line.
pub fn select_lines<R: Rng + ?Sized>(occupant: Occupant, voices: &VoiceBank, rng: &mut R) -> SquadLines {
    let (enforcer, outcome) = match get_profile(occupant.persona).outcome {
        OutcomeLine::Gloat => {
            let enforcer = voices.enforcers.choose(rng);
            let outcome = enforcer.and_then(|v| v.gloat.choose(rng).copied());
            (enforcer, outcome)
        }
        OutcomeLine::Apology => {
            let gender = voice_gender(occupant.voice, voices);
            apology(&voices.enforcers, gender, rng)
        }
        OutcomeLine::None => (voices.enforcers.choose(rng), None),
    };
    let storm = enforcer.and_then(|v| v.storm.choose(rng).copied());
    SquadLines { storm, outcome }
}

fn apology<'a, R: Rng + ?Sized>(
    enforcers: &'a [EnforcerVoice],
    gender: Gender,
    rng: &mut R,
) -> (Option<&'a EnforcerVoice>, Option<PhraseId>) {
    let matched: Vec<&EnforcerVoice> = enforcers
        .iter()
        .filter(|v| !v.apologies_for(gender).is_empty())
        .collect();
    if let Some(&enforcer) = matched.choose(rng) {
        return (Some(enforcer), enforcer.apologies_for(gender).choose(rng).copied());
    }

    let apologetic: Vec<&EnforcerVoice> = enforcers
        .iter()
        .filter(|v| !v.apology_male.is_empty() || !v.apology_female.is_empty())
        .collect();
    match apologetic.choose(rng) {
        Some(&enforcer) => {
            let pool: Vec<PhraseId> = enforcer
                .apology_male
                .iter()
                .chain(&enforcer.apology_female)
                .copied()
                .collect();
            (Some(enforcer), pool.choose(rng).copied())
        }
        None => (enforcers.choose(rng), None),
    }
}

/// Script the enforcement sequence for `console`:
///
/// countdown, arrival line, pause, score, outcome line (if any), clear and
/// rest, next level (suspects only), rest pause, release.
pub fn build_chain(
    console: ConsoleId,
    occupant: Occupant,
    lines: SquadLines,
    timing: EnforcementTiming,
) -> Chain {
    let channel = console.channel();
    let mut steps = vec![LogicStep::countdown(timing.countdown_secs)];
    if let Some(storm) = lines.storm {
        steps.push(LogicStep::play_sound(channel, storm, timing.max_sound_wait_secs));
    }
    steps.push(LogicStep::pause(timing.arrival_pause_secs));
    steps.push(LogicStep::Score);
    if let Some(outcome) = lines.outcome {
        steps.push(LogicStep::play_sound(channel, outcome, timing.max_sound_wait_secs));
    }
    steps.push(LogicStep::ClearConsole);
    if get_profile(occupant.persona).advances_level {
        steps.push(LogicStep::NextLevel);
    }
    steps.push(LogicStep::pause(timing.rest_secs));
    steps.push(LogicStep::EmptyConsole);
    Chain::new(console, steps)
}
