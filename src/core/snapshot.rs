//! The canonical snapshot of all political and scoring facts.
//!
//! ## Immutability
//!
//! `GameSnapshot` is a pure value: no method takes `&mut self`. Every
//! transition consumes one snapshot by reference and returns a wholly new
//! one; containers use `im` persistent structures so successors share
//! structure in O(1) without aliasing mutable state. A failed transition
//! returns an error and the caller's snapshot is untouched - this is what
//! makes multi-field awards atomic for free.
//!
//! ## Contents
//!
//! - victory points per player, capped at the configured ceiling
//! - completed-objective ids per player (once-per-game rule)
//! - per-status-phase scoring counters, reset by [`GameSnapshot::begin_status_phase`]
//! - the one-objective-per-combat award map
//! - per-player secret-objective hands (limit from config)

use im::{HashMap as ImHashMap, HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{ObjectiveId, Visibility};

use super::config::CouncilConfig;
use super::error::{CouncilError, Result};
use super::phase::{CombatId, GamePhase};
use super::player::{PlayerId, PlayerMap};

/// Per-player scoring counters for the current status phase.
///
/// Zeroed by [`GameSnapshot::begin_status_phase`]; the scoring authority
/// bumps the counter matching the objective's visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseScoreCard {
    /// Public objectives scored this status phase.
    pub public: u8,
    /// Secret objectives scored this status phase.
    pub secret: u8,
}

/// Immutable snapshot of the political and scoring state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    config: CouncilConfig,
    round: u32,
    phase: GamePhase,
    victory_points: PlayerMap<u8>,
    completed_objectives: PlayerMap<ImHashSet<ObjectiveId>>,
    status_phase_scored: PlayerMap<PhaseScoreCard>,
    combat_scored: ImHashMap<CombatId, ObjectiveId>,
    secret_hands: PlayerMap<Vector<ObjectiveId>>,
}

impl GameSnapshot {
    /// Create the round-1 snapshot for a fresh game.
    #[must_use]
    pub fn new(config: CouncilConfig) -> Self {
        let players = config.player_count;
        Self {
            config,
            round: 1,
            phase: GamePhase::default(),
            victory_points: PlayerMap::with_value(players, 0),
            completed_objectives: PlayerMap::new(players, |_| ImHashSet::new()),
            status_phase_scored: PlayerMap::with_default(players),
            combat_scored: ImHashMap::new(),
            secret_hands: PlayerMap::new(players, |_| Vector::new()),
        }
    }

    // === Queries ===

    /// The game configuration.
    #[must_use]
    pub fn config(&self) -> &CouncilConfig {
        &self.config
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Iterate over all player IDs.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.config.player_count)
    }

    /// Whether a player id is valid for this game.
    #[must_use]
    pub fn is_player(&self, player: PlayerId) -> bool {
        player.index() < self.config.player_count
    }

    /// A player's victory points.
    #[must_use]
    pub fn points(&self, player: PlayerId) -> u8 {
        self.victory_points[player]
    }

    /// Whether a player has already scored an objective.
    #[must_use]
    pub fn has_completed(&self, player: PlayerId, objective: ObjectiveId) -> bool {
        self.completed_objectives[player].contains(&objective)
    }

    /// The set of objectives a player has scored.
    #[must_use]
    pub fn completed_objectives(&self, player: PlayerId) -> &ImHashSet<ObjectiveId> {
        &self.completed_objectives[player]
    }

    /// A player's scoring counters for the current status phase.
    #[must_use]
    pub fn status_scored(&self, player: PlayerId) -> PhaseScoreCard {
        self.status_phase_scored[player]
    }

    /// The objective awarded for a combat, if any.
    #[must_use]
    pub fn combat_award(&self, combat: CombatId) -> Option<ObjectiveId> {
        self.combat_scored.get(&combat).copied()
    }

    /// A player's secret-objective hand.
    #[must_use]
    pub fn secret_hand(&self, player: PlayerId) -> &Vector<ObjectiveId> {
        &self.secret_hands[player]
    }

    /// Whether a player currently holds a secret objective.
    #[must_use]
    pub fn holds_secret(&self, player: PlayerId, objective: ObjectiveId) -> bool {
        self.secret_hands[player].contains(&objective)
    }

    // === Phase and round transitions ===

    /// Successor snapshot in a different phase.
    #[must_use]
    pub fn with_phase(&self, phase: GamePhase) -> Self {
        let mut next = self.clone();
        next.phase = phase;
        next
    }

    /// Successor snapshot at the start of the next round.
    #[must_use]
    pub fn advance_round(&self) -> Self {
        let mut next = self.clone();
        next.round += 1;
        next.phase = GamePhase::Strategy;
        next
    }

    /// Enter the status phase, zeroing every player's phase counters.
    ///
    /// This is the explicit phase-advance that re-opens the one-public /
    /// one-secret scoring window.
    #[must_use]
    pub fn begin_status_phase(&self) -> Self {
        let mut next = self.clone();
        next.phase = GamePhase::Status;
        next.status_phase_scored = self.status_phase_scored.map_all(|_, _| PhaseScoreCard::default());
        next
    }

    // === Point and hand transitions ===

    /// Award points, enforcing the ceiling.
    ///
    /// Fails with [`CouncilError::PointCeilingExceeded`] if the award would
    /// push the player past `config.victory_threshold`; the original
    /// snapshot is unaffected either way.
    pub fn award_points(&self, player: PlayerId, points: u8) -> Result<Self> {
        let ceiling = self.config.victory_threshold;
        let current = self.victory_points[player];
        // Widened: an award near u8::MAX must not wrap past the guard.
        if u16::from(current) + u16::from(points) > u16::from(ceiling) {
            return Err(CouncilError::PointCeilingExceeded {
                player,
                points,
                ceiling,
            });
        }

        let mut next = self.clone();
        next.victory_points = self.victory_points.map_player(player, |p| p + points);
        Ok(next)
    }

    /// Deal a secret objective into a player's hand.
    ///
    /// Enforces the hand limit and rejects objectives the player already
    /// holds.
    pub fn deal_secret_objective(&self, player: PlayerId, objective: ObjectiveId) -> Result<Self> {
        if self.secret_hands[player].contains(&objective) {
            return Err(CouncilError::SecretObjectiveAlreadyHeld { player, objective });
        }
        if self.secret_hands[player].len() >= self.config.secret_hand_limit {
            return Err(CouncilError::SecretHandLimit {
                player,
                limit: self.config.secret_hand_limit,
            });
        }

        let mut next = self.clone();
        next.secret_hands = self.secret_hands.map_player(player, |hand| {
            let mut hand = hand.clone();
            hand.push_back(objective);
            hand
        });
        Ok(next)
    }

    /// Remove a secret objective from a player's hand without scoring it.
    ///
    /// The hook behind "promote a secret objective to public" directives:
    /// the card leaves the hand and the simulator re-registers it as public.
    pub fn promote_secret_objective(
        &self,
        player: PlayerId,
        objective: ObjectiveId,
    ) -> Result<Self> {
        if !self.secret_hands[player].contains(&objective) {
            return Err(CouncilError::SecretObjectiveNotHeld { player, objective });
        }

        let mut next = self.clone();
        next.secret_hands = self.secret_hands.map_player(player, |hand| {
            hand.iter().copied().filter(|id| *id != objective).collect()
        });
        Ok(next)
    }

    /// Apply one successful objective score as a single transition.
    ///
    /// All bookkeeping for an award happens here together: completed set,
    /// points (ceiling-checked), optional status-phase counter, optional
    /// secret-hand removal, optional combat entry. The scoring authority
    /// validates first and calls this last, so either every field updates
    /// or none do.
    pub(crate) fn apply_score(
        &self,
        player: PlayerId,
        objective: ObjectiveId,
        points: u8,
        count_against: Option<Visibility>,
        remove_from_hand: bool,
        combat: Option<CombatId>,
    ) -> Result<Self> {
        let mut next = self.award_points(player, points)?;

        next.completed_objectives = self.completed_objectives.map_player(player, |set| {
            let mut set = set.clone();
            set.insert(objective);
            set
        });

        if let Some(visibility) = count_against {
            next.status_phase_scored = self.status_phase_scored.map_player(player, |card| {
                let mut card = *card;
                match visibility {
                    Visibility::Public => card.public += 1,
                    Visibility::Secret => card.secret += 1,
                }
                card
            });
        }

        if remove_from_hand {
            next.secret_hands = self.secret_hands.map_player(player, |hand| {
                hand.iter().copied().filter(|id| *id != objective).collect()
            });
        }

        if let Some(combat) = combat {
            next.combat_scored = self.combat_scored.update(combat, objective);
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GameSnapshot {
        GameSnapshot::new(CouncilConfig::new(4))
    }

    #[test]
    fn test_fresh_snapshot() {
        let snap = snapshot();

        assert_eq!(snap.round(), 1);
        assert_eq!(snap.phase(), GamePhase::Strategy);
        assert_eq!(snap.player_count(), 4);
        for player in snap.players() {
            assert_eq!(snap.points(player), 0);
            assert!(snap.completed_objectives(player).is_empty());
            assert!(snap.secret_hand(player).is_empty());
            assert_eq!(snap.status_scored(player), PhaseScoreCard::default());
        }
    }

    #[test]
    fn test_award_points_is_pure() {
        let snap = snapshot();
        let p0 = PlayerId::new(0);

        let after = snap.award_points(p0, 3).unwrap();

        assert_eq!(snap.points(p0), 0);
        assert_eq!(after.points(p0), 3);
        assert_eq!(after.points(PlayerId::new(1)), 0);
    }

    #[test]
    fn test_award_points_ceiling() {
        let snap = snapshot();
        let p0 = PlayerId::new(0);

        let at_nine = snap.award_points(p0, 9).unwrap();
        let err = at_nine.award_points(p0, 2).unwrap_err();
        assert_eq!(
            err,
            CouncilError::PointCeilingExceeded {
                player: p0,
                points: 2,
                ceiling: 10,
            }
        );

        // Exactly reaching the ceiling is allowed.
        let at_ten = at_nine.award_points(p0, 1).unwrap();
        assert_eq!(at_ten.points(p0), 10);
    }

    #[test]
    fn test_award_points_ceiling_survives_large_grants() {
        let snap = snapshot();
        let p0 = PlayerId::new(0);

        // 9 + 250 wraps in u8; the guard must still reject it.
        let at_nine = snap.award_points(p0, 9).unwrap();
        let err = at_nine.award_points(p0, 250).unwrap_err();
        assert_eq!(
            err,
            CouncilError::PointCeilingExceeded {
                player: p0,
                points: 250,
                ceiling: 10,
            }
        );
        assert_eq!(at_nine.points(p0), 9);

        assert!(snap.award_points(p0, u8::MAX).is_err());
    }

    #[test]
    fn test_failed_award_leaves_snapshot_unchanged() {
        let snap = snapshot().award_points(PlayerId::new(0), 9).unwrap();
        let before = snap.clone();

        assert!(snap.award_points(PlayerId::new(0), 5).is_err());
        assert_eq!(snap, before);
    }

    #[test]
    fn test_deal_secret_objective() {
        let snap = snapshot();
        let p1 = PlayerId::new(1);

        let after = snap.deal_secret_objective(p1, ObjectiveId::new(5)).unwrap();

        assert!(after.holds_secret(p1, ObjectiveId::new(5)));
        assert!(!snap.holds_secret(p1, ObjectiveId::new(5)));
    }

    #[test]
    fn test_secret_hand_limit() {
        let mut snap = snapshot();
        let p0 = PlayerId::new(0);

        for id in 0..3 {
            snap = snap.deal_secret_objective(p0, ObjectiveId::new(id)).unwrap();
        }

        let err = snap.deal_secret_objective(p0, ObjectiveId::new(3)).unwrap_err();
        assert_eq!(
            err,
            CouncilError::SecretHandLimit {
                player: p0,
                limit: 3,
            }
        );
    }

    #[test]
    fn test_duplicate_secret_deal_rejected() {
        let snap = snapshot()
            .deal_secret_objective(PlayerId::new(0), ObjectiveId::new(1))
            .unwrap();

        let err = snap
            .deal_secret_objective(PlayerId::new(0), ObjectiveId::new(1))
            .unwrap_err();
        assert!(matches!(err, CouncilError::SecretObjectiveAlreadyHeld { .. }));
    }

    #[test]
    fn test_promote_secret_objective() {
        let p2 = PlayerId::new(2);
        let snap = snapshot()
            .deal_secret_objective(p2, ObjectiveId::new(8))
            .unwrap();

        let after = snap.promote_secret_objective(p2, ObjectiveId::new(8)).unwrap();

        assert!(!after.holds_secret(p2, ObjectiveId::new(8)));
        // Not scored, just removed.
        assert!(!after.has_completed(p2, ObjectiveId::new(8)));
        assert_eq!(after.points(p2), 0);
    }

    #[test]
    fn test_promote_requires_holding() {
        let err = snapshot()
            .promote_secret_objective(PlayerId::new(0), ObjectiveId::new(9))
            .unwrap_err();
        assert!(matches!(err, CouncilError::SecretObjectiveNotHeld { .. }));
    }

    #[test]
    fn test_begin_status_phase_resets_counters() {
        let snap = snapshot()
            .apply_score(
                PlayerId::new(0),
                ObjectiveId::new(1),
                1,
                Some(Visibility::Public),
                false,
                None,
            )
            .unwrap();
        assert_eq!(snap.status_scored(PlayerId::new(0)).public, 1);

        let next_phase = snap.begin_status_phase();
        assert_eq!(next_phase.phase(), GamePhase::Status);
        assert_eq!(next_phase.status_scored(PlayerId::new(0)).public, 0);
        // Completion and points survive the reset.
        assert!(next_phase.has_completed(PlayerId::new(0), ObjectiveId::new(1)));
        assert_eq!(next_phase.points(PlayerId::new(0)), 1);
    }

    #[test]
    fn test_advance_round() {
        let snap = snapshot().with_phase(GamePhase::Council);
        let next = snap.advance_round();

        assert_eq!(next.round(), 2);
        assert_eq!(next.phase(), GamePhase::Strategy);
        assert_eq!(snap.round(), 1);
    }

    #[test]
    fn test_apply_score_full_transition() {
        let p0 = PlayerId::new(0);
        let objective = ObjectiveId::new(4);
        let snap = snapshot().deal_secret_objective(p0, objective).unwrap();

        let after = snap
            .apply_score(p0, objective, 2, Some(Visibility::Secret), true, None)
            .unwrap();

        assert_eq!(after.points(p0), 2);
        assert!(after.has_completed(p0, objective));
        assert_eq!(after.status_scored(p0).secret, 1);
        assert!(!after.holds_secret(p0, objective));
    }

    #[test]
    fn test_apply_score_ceiling_failure_changes_nothing() {
        let p0 = PlayerId::new(0);
        let snap = snapshot().award_points(p0, 10).unwrap();

        let err = snap
            .apply_score(p0, ObjectiveId::new(2), 1, None, false, None)
            .unwrap_err();

        assert!(matches!(err, CouncilError::PointCeilingExceeded { .. }));
        assert!(!snap.has_completed(p0, ObjectiveId::new(2)));
    }

    #[test]
    fn test_combat_award_map() {
        let snap = snapshot();
        let combat = CombatId::new(11);
        assert_eq!(snap.combat_award(combat), None);

        let after = snap
            .apply_score(PlayerId::new(3), ObjectiveId::new(6), 1, None, false, Some(combat))
            .unwrap();
        assert_eq!(after.combat_award(combat), Some(ObjectiveId::new(6)));
    }

    #[test]
    fn test_snapshot_serialization() {
        let snap = snapshot()
            .award_points(PlayerId::new(1), 4)
            .unwrap()
            .deal_secret_objective(PlayerId::new(1), ObjectiveId::new(3))
            .unwrap();

        let json = serde_json::to_string(&snap).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
