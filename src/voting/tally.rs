//! Per-outcome influence tallies.
//!
//! `VoteTally` accumulates influence per outcome. It is keyed by a
//! `BTreeMap` so iteration is always alphabetical by outcome name - that
//! ordering is what makes the tie fallback in [`TallyVerdict`]
//! deterministic without any randomness.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Outcome;

/// Influence accumulated per outcome on one proposal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    votes: BTreeMap<Outcome, u64>,
}

impl VoteTally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add influence to an outcome.
    ///
    /// Recording zero influence still creates the entry, so a zero-stake
    /// vote is visible in the tally.
    pub fn record(&mut self, outcome: &Outcome, influence: u64) {
        *self.votes.entry(outcome.clone()).or_insert(0) += influence;
    }

    /// Influence recorded for one outcome.
    #[must_use]
    pub fn influence_for(&self, outcome: &Outcome) -> u64 {
        self.votes.get(outcome).copied().unwrap_or(0)
    }

    /// Total influence across all outcomes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.votes.values().sum()
    }

    /// Whether no influence has been spent at all.
    ///
    /// True for an empty tally and for one holding only zero-stake votes.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.votes.values().all(|&v| v == 0)
    }

    /// All outcomes tied at the maximum influence, alphabetical order.
    #[must_use]
    pub fn leaders(&self) -> Vec<&Outcome> {
        let Some(max) = self.votes.values().max().copied() else {
            return Vec::new();
        };
        self.votes
            .iter()
            .filter(|(_, &v)| v == max)
            .map(|(outcome, _)| outcome)
            .collect()
    }

    /// The single outcome strictly ahead of all others, if there is one.
    #[must_use]
    pub fn strict_winner(&self) -> Option<&Outcome> {
        if self.is_all_zero() {
            return None;
        }
        match self.leaders().as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    /// Classify this tally as decided, tied, or empty.
    #[must_use]
    pub fn verdict(&self) -> TallyVerdict {
        if self.is_all_zero() {
            return TallyVerdict::NoVotes;
        }
        let leaders = self.leaders();
        match leaders.as_slice() {
            [single] => TallyVerdict::Decided((*single).clone()),
            _ => TallyVerdict::Tied(leaders.into_iter().cloned().collect()),
        }
    }

    /// Iterate outcomes alphabetically with their influence.
    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, u64)> {
        self.votes.iter().map(|(outcome, &v)| (outcome, v))
    }

    /// Number of outcomes with at least one recorded vote.
    #[must_use]
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Whether no vote has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

/// What a tally says about the winner.
///
/// `Tied` and `NoVotes` normally go to the tie-break authority; callers
/// running without an arbiter (automated tests, headless sims) can collapse
/// to a deterministic default with [`TallyVerdict::or_alphabetical`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TallyVerdict {
    /// A single outcome holds the strict maximum.
    Decided(Outcome),
    /// Two or more outcomes share the maximum, alphabetical order.
    Tied(Vec<Outcome>),
    /// No influence was spent on any outcome.
    NoVotes,
}

impl TallyVerdict {
    /// Collapse a tie to its alphabetically first outcome.
    ///
    /// This is a deterministic default, not a rules-accurate tie-break;
    /// `NoVotes` has no outcome to fall back to.
    #[must_use]
    pub fn or_alphabetical(self) -> Option<Outcome> {
        match self {
            TallyVerdict::Decided(outcome) => Some(outcome),
            TallyVerdict::Tied(outcomes) => outcomes.into_iter().next(),
            TallyVerdict::NoVotes => None,
        }
    }

    /// Whether the tally needs the arbiter.
    #[must_use]
    pub fn needs_arbiter(&self) -> bool {
        !matches!(self, TallyVerdict::Decided(_))
    }
}
