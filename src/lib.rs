//! # star-council
//!
//! The political and scoring engine for a space-strategy rules simulator.
//!
//! ## Design Principles
//!
//! 1. **Immutable Ledger**: The [`GameSnapshot`] never mutates in place.
//!    Every transition builds and returns a new snapshot, so a failed rule
//!    check leaves the input usable and search code can fork states freely.
//!
//! 2. **Typed Failures**: Rule violations are [`CouncilError`] values, vote
//!    mechanics problems are [`VoteRejection`] values, and contract
//!    violations panic. Nothing is stringly-typed at the boundary.
//!
//! 3. **Cards As Capabilities**: Proposals and objectives carry closures
//!    (`ProposalEffect`, `ObjectiveRequirement`) instead of data tables, so
//!    a catalog can express any card the rules allow.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im`, sized
//!   for search loops that clone on every branch.
//!
//! - **Single Transaction Boundary**: The policy ledger changes only inside
//!   proposal resolution; objective awards apply in one atomic snapshot
//!   transition.
//!
//! - **Arbiter Tie-Breaks**: Tied and empty ballots are settled by the
//!   arbiter player, never silently; alphabetical order is an explicit
//!   opt-in fallback.
//!
//! ## Modules
//!
//! - `core`: Player ids, phases, config, RNG, errors, the game snapshot
//! - `galaxy`: Territory seam (`GalaxyView`) and a map-backed implementation
//! - `cards`: Proposal and objective definitions, catalog, decks
//! - `voting`: Influence tallies, the ballot engine, the tie-break authority
//! - `resolution`: Outcome resolution and the policy ledger
//! - `scoring`: Objective scoring authority and victory evaluation
//! - `driver`: The council session exposed to a phase driver
//! - `demo`: A wired three-player fixture for tests and experiments

pub mod cards;
pub mod core;
pub mod demo;
pub mod driver;
pub mod galaxy;
pub mod resolution;
pub mod scoring;
pub mod voting;

// Re-export commonly used types
pub use crate::core::{
    CombatId, CouncilConfig, CouncilError, GamePhase, GameRng, GameSnapshot, PhaseScoreCard,
    PlayerId, PlayerMap, Result, EXTENDED_VICTORY_THRESHOLD, STANDARD_VICTORY_THRESHOLD,
};

pub use crate::galaxy::{GalaxyMap, GalaxyView, HomeControlCheck, PlanetId, PlanetTrait};

pub use crate::cards::{
    CardCatalog, CardDeck, EffectPayload, ElectedTarget, ElectionKind, ObjectiveCard, ObjectiveId,
    ObjectiveRequirement, Outcome, PolicyGrant, PolicyTrigger, ProposalCard, ProposalEffect,
    ProposalKind, Visibility,
};

pub use crate::voting::{
    TallyVerdict, TieBreaker, VoteReceipt, VoteRejection, VoteResult, VoteTally, VotingEngine,
};

pub use crate::resolution::{
    ActivePolicy, EnactmentReport, OutcomeResolver, PolicyLedger, ResolutionReport,
};

pub use crate::scoring::{ScoringAuthority, VictoryEvaluator};

pub use crate::driver::{CouncilSession, ScoreOutcome, SessionStep};
