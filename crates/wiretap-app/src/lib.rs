//! WIRETAP headless driver.
//!
//! Runs the simulation on a dedicated game-loop thread against a simulated
//! mixer and exposes it through a small command surface fed from stdin.

pub mod game_loop;
pub mod input;
pub mod ipc;
pub mod state;
pub mod voices;

pub use wiretap_core as core;
