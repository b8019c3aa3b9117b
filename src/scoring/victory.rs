//! End-of-round victory evaluation.
//!
//! The evaluator is a pure query layer over a snapshot. It never buffers
//! events: simultaneous threshold crossings are settled by the initiative
//! order in force when the round is evaluated.

use crate::core::player::PlayerId;
use crate::core::snapshot::GameSnapshot;

/// Decides who has won, and who sits at the point extremes.
///
/// The initiative order is owned by whoever coordinates the round and is
/// handed in via [`VictoryEvaluator::with_initiative`]; players absent from
/// it are considered after it, in ascending id order.
#[derive(Clone, Debug, Default)]
pub struct VictoryEvaluator {
    initiative: Vec<PlayerId>,
}

impl VictoryEvaluator {
    /// Create an evaluator with no initiative order (ascending ids).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the initiative order, typically between rounds.
    #[must_use]
    pub fn with_initiative(mut self, order: impl IntoIterator<Item = PlayerId>) -> Self {
        self.initiative = order.into_iter().collect();
        self
    }

    /// The initiative order currently in force.
    #[must_use]
    pub fn initiative(&self) -> &[PlayerId] {
        &self.initiative
    }

    /// Whether any player has reached the victory threshold.
    #[must_use]
    pub fn has_winner(&self, snapshot: &GameSnapshot) -> bool {
        self.winner(snapshot).is_some()
    }

    /// The winning player, if any.
    ///
    /// When several players sit at or over the threshold, the earliest in
    /// initiative order wins.
    #[must_use]
    pub fn winner(&self, snapshot: &GameSnapshot) -> Option<PlayerId> {
        let threshold = snapshot.config().victory_threshold;
        let winner = self
            .evaluation_order(snapshot)
            .find(|player| snapshot.points(*player) >= threshold);
        if let Some(player) = winner {
            tracing::debug!(
                player = %player,
                points = snapshot.points(player),
                threshold,
                "victory threshold reached"
            );
        }
        winner
    }

    /// Every player tied at the highest point total, ascending id order.
    #[must_use]
    pub fn players_with_most_points(&self, snapshot: &GameSnapshot) -> Vec<PlayerId> {
        let max = snapshot.players().map(|p| snapshot.points(p)).max();
        match max {
            Some(max) => snapshot
                .players()
                .filter(|p| snapshot.points(*p) == max)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every player tied at the lowest point total, ascending id order.
    #[must_use]
    pub fn players_with_fewest_points(&self, snapshot: &GameSnapshot) -> Vec<PlayerId> {
        let min = snapshot.players().map(|p| snapshot.points(p)).min();
        match min {
            Some(min) => snapshot
                .players()
                .filter(|p| snapshot.points(*p) == min)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Initiative holders first, then anyone the order missed.
    fn evaluation_order<'a>(
        &'a self,
        snapshot: &'a GameSnapshot,
    ) -> impl Iterator<Item = PlayerId> + 'a {
        let named = self
            .initiative
            .iter()
            .copied()
            .filter(|p| snapshot.is_player(*p));
        let unnamed = snapshot
            .players()
            .filter(|p| !self.initiative.contains(p));
        named.chain(unnamed)
    }
}
