//! The mutable game floor: consoles, counters, the innocent rotation queue,
//! pending effects, and the random source.
//!
//! Logic steps and level progression operate on `World`; the scheduler that
//! drives them lives beside it so the two can be borrowed independently.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use wiretap_core::enums::Persona;
use wiretap_core::events::Effect;
use wiretap_core::state::ScoreView;
use wiretap_core::types::ConsoleId;
use wiretap_core::voice::VoiceBank;

use crate::config::GameConfig;
use crate::console::{Console, Occupant, Vacate};
use crate::persona::{get_profile, pick_voice};

/// Running score and capture counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    pub score: i32,
    pub bad_guys_caught: u32,
    pub good_guys_detained: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub consoles: Vec<Console>,
    pub level: u32,
    pub ledger: ScoreLedger,
    /// Consoles holding innocents, oldest first.
    pub good_guys: VecDeque<ConsoleId>,
    pub effects: Vec<Effect>,
    pub rng: ChaCha8Rng,
}

impl World {
    /// Build an empty floor: every console unoccupied, level 0.
    pub fn new(config: &GameConfig) -> Self {
        let consoles = (0..config.console_count)
            .map(|i| Console::new(ConsoleId(i), config.disabled_consoles.contains(&i)))
            .collect();
        Self {
            consoles,
            level: 0,
            ledger: ScoreLedger::default(),
            good_guys: VecDeque::new(),
            effects: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    pub fn console(&self, id: ConsoleId) -> Option<&Console> {
        self.consoles.get(id.index())
    }

    pub fn console_mut(&mut self, id: ConsoleId) -> Option<&mut Console> {
        self.consoles.get_mut(id.index())
    }

    /// Consoles that can take a new guest.
    pub fn eligible_consoles(&self) -> Vec<ConsoleId> {
        eligible_consoles(&self.consoles)
    }

    /// Seat `persona` at a uniformly chosen eligible console.
    /// Returns `None` (and changes nothing) when every slot is taken.
    pub fn place(&mut self, persona: Persona, bank: &VoiceBank) -> Option<ConsoleId> {
        let Some(id) = pick_eligible(&self.consoles, &mut self.rng) else {
            debug!(?persona, "no eligible console, guest not placed");
            return None;
        };
        let voice = pick_voice(persona, bank, &mut self.rng);
        self.consoles[id.index()].move_in(Occupant { persona, voice });
        debug!(%id, ?persona, "guest placed");
        Some(id)
    }

    /// Clear a console's occupant. Also drops it from the innocent queue.
    pub fn vacate(&mut self, id: ConsoleId, mode: Vacate) {
        if let Some(console) = self.console_mut(id) {
            console.move_out(mode);
        }
        self.good_guys.retain(|&c| c != id);
    }

    /// Place an innocent and remember it for rotation.
    pub fn add_good_guy(&mut self, bank: &VoiceBank) -> Option<ConsoleId> {
        let id = self.place(Persona::GoodGuy, bank)?;
        self.good_guys.push_back(id);
        Some(id)
    }

    pub fn add_bad_guy(&mut self, bank: &VoiceBank) -> Option<ConsoleId> {
        self.place(Persona::BadGuy, bank)
    }

    /// Send the oldest innocent home and seat a fresh one.
    ///
    /// An innocent already being stormed is dropped from the queue without
    /// a replacement. Returns the console the replacement landed on.
    pub fn rotate_good_guy(&mut self, bank: &VoiceBank) -> Option<ConsoleId> {
        let id = self.good_guys.pop_front()?;
        if self.console(id).is_some_and(|c| c.under_enforcement) {
            debug!(%id, "innocent under enforcement, rotation skipped");
            return None;
        }
        self.vacate(id, Vacate::Release);
        self.add_good_guy(bank)
    }

    /// Apply the occupant's score profile. Returns the delta.
    pub fn apply_score(&mut self, id: ConsoleId) -> i32 {
        let persona = self.console(id).map(Console::persona).unwrap_or_default();
        let profile = get_profile(persona);
        self.ledger.score += profile.score_delta;
        self.ledger.bad_guys_caught += profile.bad_guys_caught;
        self.ledger.good_guys_detained += profile.good_guys_detained;
        self.effects.push(Effect::Score {
            console: id,
            delta: profile.score_delta,
        });
        profile.score_delta
    }

    /// Number of occupied consoles holding `persona`.
    pub fn population(&self, persona: Persona) -> usize {
        self.consoles
            .iter()
            .filter(|c| c.occupant.is_some_and(|o| o.persona == persona))
            .count()
    }

    pub fn score_view(&self) -> ScoreView {
        ScoreView {
            score: self.ledger.score,
            bad_guys_caught: self.ledger.bad_guys_caught,
            good_guys_detained: self.ledger.good_guys_detained,
        }
    }
}

/// Consoles that are not disabled, not speaking and not resting.
pub fn eligible_consoles(consoles: &[Console]) -> Vec<ConsoleId> {
    consoles
        .iter()
        .filter(|c| c.is_eligible())
        .map(|c| c.id)
        .collect()
}

/// Uniform lottery over the eligible consoles.
pub fn pick_eligible<R: Rng + ?Sized>(consoles: &[Console], rng: &mut R) -> Option<ConsoleId> {
    eligible_consoles(consoles).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use wiretap_core::enums::Gender;
    use wiretap_core::types::PhraseId;
    use wiretap_core::voice::{IntroVoice, Stingers, Voice};

    fn bank() -> VoiceBank {
        VoiceBank {
            voices: vec![Voice {
                gender: Gender::Female,
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

    #[test]
    fn default_floor_has_fourteen_eligible_consoles() {
        let world = World::new(&GameConfig::default());
        let eligible = world.eligible_consoles();
        assert_eq!(eligible.len(), 14);
        assert!(!eligible.contains(&ConsoleId(11)));
        assert!(!eligible.contains(&ConsoleId(13)));
    }

    #[test]
    fn full_floor_rejects_placement() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        for _ in 0..14 {
            assert!(world.place(Persona::BadGuy, &bank).is_some());
        }
        assert!(world.eligible_consoles().is_empty());
        assert_eq!(world.place(Persona::GoodGuy, &bank), None);
        assert_eq!(world.population(Persona::BadGuy), 14);
        assert_eq!(world.population(Persona::GoodGuy), 0);
    }

    #[test]
    fn lottery_uses_injected_rng() {
        let world = World::new(&GameConfig::default());
        // A zero-valued stub always draws the first eligible slot.
        let mut rng = StepRng::new(0, 0);
        assert_eq!(pick_eligible(&world.consoles, &mut rng), Some(ConsoleId(0)));
    }

    #[test]
    fn resting_console_is_skipped_until_released() {
        let bank = bank();
        let config = GameConfig {
            console_count: 1,
            disabled_consoles: vec![],
            ..Default::default()
        };
        let mut world = World::new(&config);
        let id = world.place(Persona::BadGuy, &bank).unwrap();
        world.vacate(id, Vacate::Rest);
        assert_eq!(world.place(Persona::BadGuy, &bank), None);
        world.vacate(id, Vacate::Release);
        assert_eq!(world.place(Persona::BadGuy, &bank), Some(id));
    }

    #[test]
    fn good_guy_queue_tracks_innocents_only() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        let a = world.add_good_guy(&bank).unwrap();
        let b = world.add_good_guy(&bank).unwrap();
        world.add_bad_guy(&bank).unwrap();
        assert_eq!(world.good_guys, VecDeque::from(vec![a, b]));

        world.vacate(a, Vacate::Rest);
        assert_eq!(world.good_guys, VecDeque::from(vec![b]));
        for id in &world.good_guys {
            assert_eq!(world.console(*id).unwrap().persona(), Persona::GoodGuy);
        }
    }

    #[test]
    fn rotation_replaces_oldest_innocent() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        world.add_good_guy(&bank).unwrap();
        let second = world.add_good_guy(&bank).unwrap();

        let replacement = world.rotate_good_guy(&bank).unwrap();
        assert_eq!(world.population(Persona::GoodGuy), 2);
        assert_eq!(world.good_guys, VecDeque::from(vec![second, replacement]));
    }

    #[test]
    fn rotation_skips_innocent_under_enforcement() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        let id = world.add_good_guy(&bank).unwrap();
        world.console_mut(id).unwrap().under_enforcement = true;

        assert_eq!(world.rotate_good_guy(&bank), None);
        assert!(world.good_guys.is_empty());
        assert_eq!(world.console(id).unwrap().persona(), Persona::GoodGuy);
    }

    #[test]
    fn rotation_on_empty_queue_is_noop() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        assert_eq!(world.rotate_good_guy(&bank), None);
    }

    #[test]
    fn apply_score_uses_persona_profile() {
        let bank = bank();
        let mut world = World::new(&GameConfig::default());
        let good = world.add_good_guy(&bank).unwrap();
        let bad = world.add_bad_guy(&bank).unwrap();

        assert_eq!(world.apply_score(bad), 1);
        assert_eq!(world.apply_score(good), -1);
        assert_eq!(
            world.ledger,
            ScoreLedger {
                score: 0,
                bad_guys_caught: 1,
                good_guys_detained: 1,
            }
        );
        assert_eq!(
            world.effects,
            vec![
                Effect::Score { console: bad, delta: 1 },
                Effect::Score { console: good, delta: -1 },
            ]
        );
    }

    #[test]
    fn first_phrase_is_played_once() {
        let bank = bank();
        let config = GameConfig {
            console_count: 1,
            disabled_consoles: vec![],
            ..Default::default()
        };
        let mut world = World::new(&config);
        let id = world.place(Persona::IntroGuy, &bank).unwrap();
        let World { consoles, rng, .. } = &mut world;
        let console = &mut consoles[id.index()];
        assert_eq!(console.next_phrase(&bank, rng), Some(PhraseId(100)));
        assert_eq!(console.next_phrase(&bank, rng), Some(PhraseId(101)));
        assert_eq!(console.next_phrase(&bank, rng), Some(PhraseId(101)));
    }
}
