//! Shared test data.

use wiretap_core::enums::Gender;
use wiretap_core::types::PhraseId;
use wiretap_core::voice::{EnforcerVoice, IntroVoice, Stingers, Voice, VoiceBank};

pub const MAN_BENIGN: PhraseId = PhraseId(1);
pub const MAN_SUSPICIOUS: PhraseId = PhraseId(2);
pub const WOMAN_BENIGN: PhraseId = PhraseId(3);
pub const WOMAN_SUSPICIOUS: PhraseId = PhraseId(4);
pub const INTRO_FIRST: PhraseId = PhraseId(100);
pub const INTRO_LOOP: PhraseId = PhraseId(101);
pub const STORM: PhraseId = PhraseId(300);
pub const GLOAT: PhraseId = PhraseId(301);
pub const SORRY_SIR: PhraseId = PhraseId(302);
pub const SORRY_MADAM: PhraseId = PhraseId(303);
pub const COFFEE_BREAK: PhraseId = PhraseId(200);
pub const BACK_TO_WORK: PhraseId = PhraseId(201);
pub const GOING_HOME: PhraseId = PhraseId(202);

/// One man, one woman, a single squad member with every kind of line.
pub fn voice_bank() -> VoiceBank {
    VoiceBank {
        voices: vec![
            Voice {
                gender: Gender::Male,
                benign: vec![MAN_BENIGN],
                suspicious: vec![MAN_SUSPICIOUS],
            },
            Voice {
                gender: Gender::Female,
                benign: vec![WOMAN_BENIGN],
                suspicious: vec![WOMAN_SUSPICIOUS],
            },
        ],
        enforcers: vec![EnforcerVoice {
            storm: vec![STORM],
            gloat: vec![GLOAT],
            apology_male: vec![SORRY_SIR],
            apology_female: vec![SORRY_MADAM],
        }],
        intro: IntroVoice {
            first_phrase: INTRO_FIRST,
            loop_phrases: vec![INTRO_LOOP],
        },
        stingers: Stingers {
            coffee_break: COFFEE_BREAK,
            back_to_work: BACK_TO_WORK,
            going_home: GOING_HOME,
        },
    }
}
