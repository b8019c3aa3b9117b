//! Phase-driver surface over the political engine.
//!
//! [`CouncilSession`] sequences the council phase (reveal, vote, resolve,
//! twice, then ready staked planets) and runs the status-phase scoring
//! batch. It owns the political state; game snapshots flow through by
//! value.

mod session;

pub use session::{CouncilSession, ScoreOutcome, SessionStep};
