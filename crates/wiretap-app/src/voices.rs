//! Synthetic voice bank for headless runs.
//!
//! Phrase ids are allocated in blocks so a log line can be traced back to
//! the speaker: civilians at `100 * (n + 1)`, the squad from 1000, the
//! tutorial at 2000 and the stingers at 3000.

use wiretap_core::enums::Gender;
use wiretap_core::types::PhraseId;
use wiretap_core::voice::{EnforcerVoice, IntroVoice, Stingers, Voice, VoiceBank};

const CIVILIANS: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Male, Gender::Female];
const PHRASES_PER_SET: u32 = 3;

fn block(base: u32) -> Vec<PhraseId> {
    (base..base + PHRASES_PER_SET).map(PhraseId).collect()
}

pub fn demo_voice_bank() -> VoiceBank {
    let voices = CIVILIANS
        .iter()
        .zip(1u32..)
        .map(|(&gender, n)| Voice {
            gender,
            benign: block(100 * n),
            suspicious: block(100 * n + 50),
        })
        .collect();

    // The second squad member never apologises to women.
    let enforcers = vec![
        EnforcerVoice {
            storm: block(1000),
            gloat: block(1010),
            apology_male: block(1020),
            apology_female: block(1030),
        },
        EnforcerVoice {
            storm: block(1100),
            gloat: block(1110),
            apology_male: block(1120),
            apology_female: Vec::new(),
        },
    ];

    VoiceBank {
        voices,
        enforcers,
        intro: IntroVoice {
            first_phrase: PhraseId(2000),
            loop_phrases: vec![PhraseId(2001)],
        },
        stingers: Stingers {
            coffee_break: PhraseId(3000),
            back_to_work: PhraseId(3001),
            going_home: PhraseId(3002),
        },
    }
}
