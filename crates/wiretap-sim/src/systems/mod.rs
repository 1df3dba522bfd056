//! Per-frame passes over the game state.
//!
//! Systems are plain functions over borrowed state. They own nothing
//! beyond the small bookkeeping structs passed in by the engine.

pub mod audio_mix;
pub mod snapshot;
