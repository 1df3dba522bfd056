//! Console (listening station) state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use wiretap_core::enums::{ConsolePhase, Persona};
use wiretap_core::types::{ConsoleId, PhraseId};
use wiretap_core::voice::VoiceBank;

use crate::persona::{self, VoiceRef};

/// Who is sitting at a console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub persona: Persona,
    pub voice: VoiceRef,
}

/// How a console is released after its occupant leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vacate {
    /// Keep the slot out of the placement lottery until released again.
    Rest,
    /// Slot is eligible immediately.
    Release,
}

/// One listening station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Console {
    pub id: ConsoleId,
    pub disabled: bool,
    /// Headphones on. Player-controlled, independent of occupancy.
    pub listening: bool,
    pub occupant: Option<Occupant>,
    /// The occupant's idle phrase loop is running.
    pub active: bool,
    pub under_enforcement: bool,
    pub resting: bool,
    first_phrase: bool,
}

impl Console {
    pub fn new(id: ConsoleId, disabled: bool) -> Self {
        Self {
            id,
            disabled,
            listening: false,
            occupant: None,
            active: false,
            under_enforcement: false,
            resting: false,
            first_phrase: true,
        }
    }

    /// Lamp lit: either the occupant or the squad can be heard.
    pub fn is_speaking(&self) -> bool {
        self.active || self.under_enforcement
    }

    /// Free for the placement lottery.
    pub fn is_eligible(&self) -> bool {
        !self.disabled && !self.is_speaking() && !self.resting
    }

    pub fn persona(&self) -> Persona {
        self.occupant.map(|o| o.persona).unwrap_or_default()
    }

    pub fn phase(&self) -> ConsolePhase {
        if self.disabled {
            ConsolePhase::Disabled
        } else if self.under_enforcement {
            ConsolePhase::UnderEnforcement
        } else if self.resting {
            ConsolePhase::Resting
        } else if self.occupant.is_some() {
            ConsolePhase::Active
        } else {
            ConsolePhase::Empty
        }
    }

    /// Seat `occupant` and start its phrase loop.
    pub fn move_in(&mut self, occupant: Occupant) {
        self.occupant = Some(occupant);
        self.active = true;
        self.first_phrase = true;
    }

    /// Clear the occupant and every flag the occupant implied.
    pub fn move_out(&mut self, mode: Vacate) {
        self.listening = false;
        self.active = false;
        self.under_enforcement = false;
        self.occupant = None;
        self.first_phrase = true;
        self.resting = mode == Vacate::Rest;
    }

    pub fn toggle_listening(&mut self) {
        self.listening = !self.listening;
    }

    /// The occupant's next phrase; the first call after placement yields
    /// the persona's opening line.
    pub fn next_phrase<R: Rng + ?Sized>(&mut self, bank: &VoiceBank, rng: &mut R) -> Option<PhraseId> {
        let occupant = self.occupant?;
        let first = std::mem::replace(&mut self.first_phrase, false);
        persona::next_phrase(occupant.persona, occupant.voice, bank, first, rng)
    }
}
