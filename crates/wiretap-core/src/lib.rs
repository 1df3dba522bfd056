//! Core types and definitions for the WIRETAP simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, personas, effects, commands, voice banks, state snapshots,
//! and constants. It has no dependency on audio, rendering, or any runtime.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
pub mod voice;
