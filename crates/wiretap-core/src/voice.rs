//! Voice bank types handed over by the asset-loading collaborator.
//!
//! The simulation only reads these. How phrases are discovered and decoded
//! is entirely outside the core.

use serde::{Deserialize, Serialize};

use crate::enums::Gender;
use crate::types::PhraseId;

/// A civilian speaker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Voice {
    pub gender: Gender,
    pub benign: Vec<PhraseId>,
    pub suspicious: Vec<PhraseId>,
}

/// The tutorial speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroVoice {
    /// Played once, right after placement.
    pub first_phrase: PhraseId,
    /// Reminders looped afterwards.
    pub loop_phrases: Vec<PhraseId>,
}

/// One member of the enforcement squad.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnforcerVoice {
    /// Arrival lines ("go go go").
    pub storm: Vec<PhraseId>,
    /// Lines after catching a suspect.
    pub gloat: Vec<PhraseId>,
    pub apology_male: Vec<PhraseId>,
    pub apology_female: Vec<PhraseId>,
}

/// Fixed sounds played on the coffee-break channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stingers {
    pub coffee_break: PhraseId,
    pub back_to_work: PhraseId,
    pub going_home: PhraseId,
}

/// Everything the simulation may ask the audio collaborator to play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceBank {
    pub voices: Vec<Voice>,
    pub enforcers: Vec<EnforcerVoice>,
    pub intro: IntroVoice,
    pub stingers: Stingers,
}

impl Voice {
    /// Benign and suspicious phrases together.
    pub fn all_phrases(&self) -> impl Iterator<Item = PhraseId> + '_ {
        self.benign.iter().chain(self.suspicious.iter()).copied()
    }
}

impl EnforcerVoice {
    /// Apology lines addressed to a speaker of `gender`.
    pub fn apologies_for(&self, gender: Gender) -> &[PhraseId] {
        match gender {
            Gender::Male => &self.apology_male,
            Gender::Female => &self.apology_female,
        }
    }
}
