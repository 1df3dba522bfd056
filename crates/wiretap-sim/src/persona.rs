//! Persona-specific behavioral profiles and phrase policies.
//!
//! Personas are plain enum values; everything that varies per persona is
//! looked up here. No persona carries mutable state.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use wiretap_core::enums::{Gender, OutcomeLine, Persona};
use wiretap_core::types::PhraseId;
use wiretap_core::voice::VoiceBank;

/// Which voice an occupant speaks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceRef {
    /// Index into `VoiceBank::voices`.
    Civilian(usize),
    /// The tutorial voice.
    Intro,
}

/// Scoring and outcome profile for a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaProfile {
    /// Applied to the game score when this persona is stormed.
    pub score_delta: i32,
    /// Storming this persona moves the game to the next level.
    pub advances_level: bool,
    /// What the squad says once inside.
    pub outcome: OutcomeLine,
    pub bad_guys_caught: u32,
    pub good_guys_detained: u32,
}

/// Get the profile for a given persona.
pub fn get_profile(persona: Persona) -> PersonaProfile {
    match persona {
        Persona::Nobody => PersonaProfile {
            score_delta: 0,
            advances_level: false,
            outcome: OutcomeLine::None,
            bad_guys_caught: 0,
            good_guys_detained: 0,
        },
        Persona::GoodGuy => PersonaProfile {
            score_delta: -1,
            advances_level: false,
            outcome: OutcomeLine::Apology,
            bad_guys_caught: 0,
            good_guys_detained: 1,
        },
        // The tutorial voice is a suspect in every respect but its lines.
        Persona::BadGuy | Persona::IntroGuy => PersonaProfile {
            score_delta: 1,
            advances_level: true,
            outcome: OutcomeLine::Gloat,
            bad_guys_caught: 1,
            good_guys_detained: 0,
        },
    }
}

/// Pick the voice a newly placed persona speaks with.
pub fn pick_voice<R: Rng + ?Sized>(persona: Persona, bank: &VoiceBank, rng: &mut R) -> VoiceRef {
    match persona {
        Persona::IntroGuy => VoiceRef::Intro,
        _ => VoiceRef::Civilian(rng.gen_range(0..bank.voices.len().max(1))),
    }
}

/// Gender of the speaker behind `voice`. The tutorial voice counts as male.
pub fn voice_gender(voice: VoiceRef, bank: &VoiceBank) -> Gender {
    match voice {
        VoiceRef::Civilian(index) => bank
            .voices
            .get(index)
            .map(|v| v.gender)
            .unwrap_or_default(),
        VoiceRef::Intro => Gender::Male,
    }
}

/// Choose the next phrase for a persona. `first` is set for the first
/// phrase after placement. Returns `None` when the persona stays silent.
pub fn next_phrase<R: Rng + ?Sized>(
    persona: Persona,
    voice: VoiceRef,
    bank: &VoiceBank,
    first: bool,
    rng: &mut R,
) -> Option<PhraseId> {
    match (persona, voice) {
        (Persona::Nobody, _) => None,
        (Persona::IntroGuy, VoiceRef::Intro) if first => Some(bank.intro.first_phrase),
        (Persona::IntroGuy, VoiceRef::Intro) => bank.intro.loop_phrases.choose(rng).copied(),
        (Persona::GoodGuy, VoiceRef::Civilian(index)) => {
            bank.voices.get(index)?.benign.choose(rng).copied()
        }
        (Persona::BadGuy, VoiceRef::Civilian(index)) => {
            let voice = bank.voices.get(index)?;
            let count = voice.benign.len() + voice.suspicious.len();
            if count == 0 {
                return None;
            }
            voice.all_phrases().nth(rng.gen_range(0..count))
        }
        // Mismatched voice (e.g. a civilian persona on the tutorial voice).
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use wiretap_core::voice::{IntroVoice, Stingers, Voice};

    fn bank() -> VoiceBank {
        VoiceBank {
            voices: vec![
                Voice {
                    gender: Gender::Male,
                    benign: vec![PhraseId(1)],
                    suspicious: vec![PhraseId(2)],
                },
                Voice {
                    gender: Gender::Female,
                    benign: vec![PhraseId(3)],
                    suspicious: vec![],
                },
            ],
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

    #[test]
    fn profiles_match_persona_roles() {
        let good = get_profile(Persona::GoodGuy);
        assert_eq!(good.score_delta, -1);
        assert!(!good.advances_level);
        assert_eq!(good.outcome, OutcomeLine::Apology);

        let bad = get_profile(Persona::BadGuy);
        assert_eq!(bad.score_delta, 1);
        assert!(bad.advances_level);
        assert_eq!(bad.outcome, OutcomeLine::Gloat);

        assert_eq!(get_profile(Persona::IntroGuy), bad);
        assert_eq!(get_profile(Persona::Nobody).outcome, OutcomeLine::None);
    }

    #[test]
    fn intro_guy_plays_tutorial_then_loops() {
        let bank = bank();
        let mut rng = StepRng::new(0, 1);
        let voice = pick_voice(Persona::IntroGuy, &bank, &mut rng);
        assert_eq!(voice, VoiceRef::Intro);
        assert_eq!(
            next_phrase(Persona::IntroGuy, voice, &bank, true, &mut rng),
            Some(PhraseId(100))
        );
        assert_eq!(
            next_phrase(Persona::IntroGuy, voice, &bank, false, &mut rng),
            Some(PhraseId(101))
        );
    }

    #[test]
    fn good_guy_only_says_benign_things() {
        let bank = bank();
        let mut rng = StepRng::new(0, 0x9e37_79b9_7f4a_7c15);
        for _ in 0..20 {
            let phrase = next_phrase(
                Persona::GoodGuy,
                VoiceRef::Civilian(0),
                &bank,
                false,
                &mut rng,
            );
            assert_eq!(phrase, Some(PhraseId(1)));
        }
    }

    #[test]
    fn bad_guy_draws_from_all_phrases() {
        let bank = bank();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            seen.insert(next_phrase(
                Persona::BadGuy,
                VoiceRef::Civilian(0),
                &bank,
                false,
                &mut rng,
            ));
        }
        assert!(seen.contains(&Some(PhraseId(1))));
        assert!(seen.contains(&Some(PhraseId(2))));
    }

    #[test]
    fn nobody_is_silent() {
        let bank = bank();
        let mut rng = StepRng::new(0, 1);
        assert_eq!(
            next_phrase(Persona::Nobody, VoiceRef::Civilian(0), &bank, true, &mut rng),
            None
        );
    }

    #[test]
    fn voice_gender_lookup() {
        let bank = bank();
        assert_eq!(voice_gender(VoiceRef::Civilian(1), &bank), Gender::Female);
        assert_eq!(voice_gender(VoiceRef::Intro, &bank), Gender::Male);
    }
}
