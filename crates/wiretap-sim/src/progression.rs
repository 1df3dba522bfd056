//! Level progression: how many guests arrive and leave on each level-up.

use tracing::info;

use wiretap_core::constants::*;
use wiretap_core::voice::VoiceBank;

use crate::world::World;

/// Guest changes applied when entering a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPlan {
    pub new_suspects: u32,
    pub new_innocents: u32,
    /// Innocents sent home and replaced.
    pub rotations: u32,
}

/// Plan for entering `level`.
///
/// Rotation tiers are checked in order and the first match wins, so the
/// second tier is never reached; this mirrors the shipped balance.
pub fn plan_for(level: u32) -> LevelPlan {
    let new_suspects = if DOUBLE_SUSPECT_LEVELS.contains(&level) {
        2
    } else {
        1
    };

    let rotations = if level >= ROTATION_TIER_1_LEVEL {
        1
    } else if level >= ROTATION_TIER_2_LEVEL {
        2
    } else {
        0
    };

    LevelPlan {
        new_suspects,
        new_innocents: GUESTS_PER_LEVEL - new_suspects,
        rotations,
    }
}

/// Move to the next level and apply its plan: innocents first, then
/// suspects, then rotations. Placements that find no free console are
/// skipped. Returns the new level.
pub fn advance_level(world: &mut World, voices: &VoiceBank) -> u32 {
    world.level += 1;
    let plan = plan_for(world.level);

    let mut placed = 0;
    for _ in 0..plan.new_innocents {
        placed += u32::from(world.add_good_guy(voices).is_some());
    }
    for _ in 0..plan.new_suspects {
        placed += u32::from(world.add_bad_guy(voices).is_some());
    }
    for _ in 0..plan.rotations {
        world.rotate_good_guy(voices);
    }

    info!(
        level = world.level,
        suspects = plan.new_suspects,
        innocents = plan.new_innocents,
        rotations = plan.rotations,
        placed,
        "level up"
    );
    world.level
}
