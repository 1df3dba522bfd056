//! Simulation for WIRETAP.
//!
//! Owns the console floor, runs the per-console action chains against a
//! caller-supplied clock, and produces GameSnapshots for the frontend.

pub mod audio;
pub mod config;
pub mod console;
pub mod enforcement;
pub mod engine;
pub mod error;
pub mod logic;
pub mod persona;
pub mod progression;
pub mod save;
pub mod systems;
pub mod world;

pub use wiretap_core as core;
pub use engine::Game;

#[cfg(test)]
mod fixtures;
