//! Objective scoring with fail-fast validation.
//!
//! The `ScoringAuthority` is the only path by which objectives turn into
//! victory points. Every check runs before any state is built, so a
//! rejected score leaves the input snapshot untouched. The checks are
//! ordered and each failure is a distinct [`CouncilError`] kind:
//!
//! 1. secret objectives must be held by the scoring player,
//! 2. public objectives need home-territory control,
//! 3. the current phase must match the objective's scoring phase exactly,
//! 4. an objective id scores at most once per player per game,
//! 5. the status phase caps each player at one public and one secret score,
//! 6. the award must fit under the victory-point ceiling.
//!
//! Combat scoring is a separate entry point with its own rules: one
//! objective per combat id, action-phase objectives only, no status caps.

use crate::cards::{ObjectiveCard, Visibility};
use crate::core::error::{CouncilError, Result};
use crate::core::phase::{CombatId, GamePhase};
use crate::core::player::PlayerId;
use crate::core::snapshot::GameSnapshot;
use crate::galaxy::GalaxyView;

/// Stateless gatekeeper for objective scoring.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoringAuthority;

impl ScoringAuthority {
    /// Create a scoring authority.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score an objective during normal play.
    ///
    /// Returns the transformed snapshot on success. On any failure the
    /// input snapshot is unchanged and usable as-is.
    pub fn score_objective(
        &self,
        snapshot: &GameSnapshot,
        player: PlayerId,
        objective: &ObjectiveCard,
        current_phase: GamePhase,
        galaxy: &dyn GalaxyView,
    ) -> Result<GameSnapshot> {
        if objective.is_secret() && !snapshot.holds_secret(player, objective.id) {
            return Err(CouncilError::SecretObjectiveNotHeld {
                player,
                objective: objective.id,
            });
        }

        if !objective.is_secret() {
            let check = galaxy.validate_home_control(player);
            if !check.valid {
                return Err(CouncilError::HomeSystemUncontrolled {
                    player,
                    message: check.message,
                });
            }
        }

        if objective.phase != current_phase {
            return Err(CouncilError::WrongScoringPhase {
                objective: objective.id,
                required: objective.phase,
                current: current_phase,
            });
        }

        if snapshot.has_completed(player, objective.id) {
            return Err(CouncilError::ObjectiveAlreadyScored {
                player,
                objective: objective.id,
            });
        }

        let counts_against_cap = current_phase == GamePhase::Status;
        if counts_against_cap {
            let scored = snapshot.status_scored(player);
            let (already, cap) = match objective.visibility {
                Visibility::Public => (scored.public, snapshot.config().status_phase_public_cap),
                Visibility::Secret => (scored.secret, snapshot.config().status_phase_secret_cap),
            };
            if already >= cap {
                return Err(CouncilError::StatusPhaseCapReached {
                    player,
                    kind: objective.visibility.label(),
                });
            }
        }

        let next = snapshot.apply_score(
            player,
            objective.id,
            objective.points,
            counts_against_cap.then_some(objective.visibility),
            objective.is_secret(),
            None,
        )?;

        tracing::info!(
            player = %player,
            objective = %objective.id,
            points = objective.points,
            phase = %current_phase,
            "objective scored"
        );
        Ok(next)
    }

    /// Score an action-phase objective as a combat reward.
    ///
    /// Each combat id awards at most one objective. Combat scoring skips the
    /// status-phase caps and the home-control gate; the ceiling and
    /// once-per-game rules still apply.
    pub fn score_combat_objective(
        &self,
        snapshot: &GameSnapshot,
        player: PlayerId,
        objective: &ObjectiveCard,
        combat: CombatId,
    ) -> Result<GameSnapshot> {
        if objective.phase != GamePhase::Action {
            return Err(CouncilError::CombatObjectivePhase {
                objective: objective.id,
                required: objective.phase,
            });
        }

        if objective.is_secret() && !snapshot.holds_secret(player, objective.id) {
            return Err(CouncilError::SecretObjectiveNotHeld {
                player,
                objective: objective.id,
            });
        }

        if snapshot.has_completed(player, objective.id) {
            return Err(CouncilError::ObjectiveAlreadyScored {
                player,
                objective: objective.id,
            });
        }

        if let Some(existing) = snapshot.combat_award(combat) {
            return Err(CouncilError::CombatAlreadyScored {
                combat,
                objective: existing,
            });
        }

        let next = snapshot.apply_score(
            player,
            objective.id,
            objective.points,
            None,
            objective.is_secret(),
            Some(combat),
        )?;

        tracing::info!(
            player = %player,
            objective = %objective.id,
            combat = %combat,
            "combat objective scored"
        );
        Ok(next)
    }
}
