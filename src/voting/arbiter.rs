//! Tie-break authority.
//!
//! One designated player - the arbiter - breaks vote ties and votes last.
//! The `TieBreaker` does not choose the outcome itself: the choice comes
//! from the caller (UI or AI playing the arbiter), and this component only
//! stamps it into a [`VoteResult`] marked as arbiter-resolved.

use crate::cards::Outcome;
use crate::core::player::PlayerId;

use super::result::VoteResult;
use super::tally::VoteTally;

/// The designated tie-breaking player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TieBreaker {
    arbiter: PlayerId,
}

impl TieBreaker {
    /// Create a tie-breaker for the given arbiter.
    #[must_use]
    pub fn new(arbiter: PlayerId) -> Self {
        Self { arbiter }
    }

    /// The arbiter player.
    #[must_use]
    pub fn arbiter(&self) -> PlayerId {
        self.arbiter
    }

    /// Settle a tied or empty tally with the arbiter's chosen outcome.
    ///
    /// Pure: no vote state changes here. The chosen outcome is taken as
    /// given, covering both genuine ties at the maximum and all-zero
    /// tallies where nobody voted.
    #[must_use]
    pub fn resolve_tie(&self, tally: &VoteTally, chosen: Outcome) -> VoteResult {
        tracing::info!(arbiter = %self.arbiter, outcome = %chosen, "arbiter resolved the vote");
        let mut result = VoteResult::new(chosen, tally.clone());
        result.arbiter_resolved = true;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_genuine_tie() {
        let mut tally = VoteTally::new();
        tally.record(&Outcome::in_favor(), 5);
        tally.record(&Outcome::against(), 5);

        let breaker = TieBreaker::new(PlayerId::new(2));
        let result = breaker.resolve_tie(&tally, Outcome::in_favor());

        assert!(result.arbiter_resolved);
        assert_eq!(result.winning_outcome, Outcome::in_favor());
        assert_eq!(result.tally, tally);
    }

    #[test]
    fn test_resolve_empty_tally() {
        let breaker = TieBreaker::new(PlayerId::new(0));
        let result = breaker.resolve_tie(&VoteTally::new(), Outcome::against());

        assert!(result.arbiter_resolved);
        assert_eq!(result.winning_outcome, Outcome::against());
        assert!(result.tally.is_empty());
    }

    #[test]
    fn test_tally_is_untouched() {
        let mut tally = VoteTally::new();
        tally.record(&Outcome::in_favor(), 3);
        let snapshot = tally.clone();

        let breaker = TieBreaker::new(PlayerId::new(1));
        let _ = breaker.resolve_tie(&tally, Outcome::against());

        assert_eq!(tally, snapshot);
    }
}
