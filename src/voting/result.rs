//! The outcome of one resolved vote.

use serde::{Deserialize, Serialize};

use crate::cards::{ElectedTarget, Outcome};

use super::tally::VoteTally;

/// A settled vote: the winner, its tally, and how it was decided.
///
/// Created fresh for each resolution and consumed once by the outcome
/// resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    /// The outcome that won.
    pub winning_outcome: Outcome,

    /// The elected target, when the winning outcome is an election.
    pub elected: Option<ElectedTarget>,

    /// The full tally the decision was made from.
    pub tally: VoteTally,

    /// Whether the arbiter decided this (tie or no votes) rather than the
    /// tally itself.
    pub arbiter_resolved: bool,
}

impl VoteResult {
    /// A result decided directly by the tally.
    #[must_use]
    pub fn new(winning_outcome: Outcome, tally: VoteTally) -> Self {
        Self {
            winning_outcome,
            elected: None,
            tally,
            arbiter_resolved: false,
        }
    }

    /// Attach an elected target (builder pattern).
    #[must_use]
    pub fn with_elected(mut self, target: ElectedTarget) -> Self {
        self.elected = Some(target);
        self
    }
}
