//! Core engine types: players, phases, errors, RNG, configuration, snapshot.
//!
//! This module contains the fundamental building blocks the political
//! components share. Simulators configure these via `CouncilConfig` rather
//! than modifying the core.

pub mod config;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod snapshot;

pub use config::{CouncilConfig, EXTENDED_VICTORY_THRESHOLD, STANDARD_VICTORY_THRESHOLD};
pub use error::{CouncilError, Result};
pub use phase::{CombatId, GamePhase};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use snapshot::{GameSnapshot, PhaseScoreCard};
