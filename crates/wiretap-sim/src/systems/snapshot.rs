//! Snapshot system: builds a complete GameSnapshot from the game state.
//!
//! This system is read-only; it never modifies the state.

use wiretap_core::events::Effect;
use wiretap_core::state::{ConsoleView, GameSnapshot};

use crate::engine::GameState;
use crate::logic::Scheduler;
use crate::world::World;

/// Build a complete GameSnapshot carrying the given drained effects.
pub fn build_snapshot(state: &GameState, effects: Vec<Effect>) -> GameSnapshot {
    GameSnapshot {
        time: state.time,
        phase: state.phase(),
        level: state.world.level,
        time_remaining_secs: state.time_remaining,
        score: state.world.score_view(),
        consoles: build_consoles(&state.world, &state.scheduler),
        active_chains: state.scheduler.len() as u32,
        effects,
    }
}

fn build_consoles(world: &World, scheduler: &Scheduler) -> Vec<ConsoleView> {
    world
        .consoles
        .iter()
        .map(|c| ConsoleView {
            id: c.id,
            phase: c.phase(),
            persona: c.persona(),
            listening: c.listening,
            speaking: c.is_speaking(),
            step: scheduler.step_for(c.id),
        })
        .collect()
}
