//! Error taxonomy for political and scoring rule violations.
//!
//! Rule violations surface as typed [`CouncilError`] values raised
//! synchronously to the caller; the caller decides whether to show them to a
//! UI. Voting-mechanics problems (duplicate stakes, exhausted planets, wrong
//! owner) are deliberately NOT here - they are routine during interactive
//! play and reported as [`crate::voting::VoteRejection`] values instead.
//!
//! Every message carries enough context (player, objective, phase, proposal)
//! to reconstruct which rule was violated.

use thiserror::Error;

use crate::cards::ObjectiveId;
use crate::core::phase::{CombatId, GamePhase};
use crate::core::player::PlayerId;
use crate::galaxy::{PlanetId, PlanetTrait};

/// A political or scoring rule violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouncilError {
    /// A required input was absent (null/empty in the source material).
    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    /// The winning outcome is not among the proposal's valid outcomes.
    #[error("proposal '{proposal}' does not allow outcome '{outcome}'")]
    IllegalOutcome { proposal: String, outcome: String },

    /// An election outcome won but no elected target was supplied.
    #[error("outcome '{outcome}' elects a target but none was supplied")]
    MissingElectedTarget { outcome: String },

    /// The elected target does not exist or is the wrong kind of target
    /// for the election.
    #[error("elected target {target} is not eligible for this election")]
    UnknownElectedTarget { target: String },

    /// A typed election named a trait the elected planet lacks.
    #[error("elected planet {planet} lacks the {required} trait")]
    ElectedTraitMismatch {
        planet: PlanetId,
        required: PlanetTrait,
    },

    /// A scoring declaration named an objective the catalog does not know.
    #[error("objective {0} is not registered in the catalog")]
    UnknownObjective(ObjectiveId),

    /// A secret objective was scored by a player who does not hold it.
    #[error("{player} does not hold secret objective {objective}")]
    SecretObjectiveNotHeld {
        player: PlayerId,
        objective: ObjectiveId,
    },

    /// The objective's scoring phase does not match the current phase.
    #[error("objective {objective} scores during the {required} phase, not {current}")]
    WrongScoringPhase {
        objective: ObjectiveId,
        required: GamePhase,
        current: GamePhase,
    },

    /// The player already scored this objective earlier in the game.
    #[error("{player} already scored objective {objective}")]
    ObjectiveAlreadyScored {
        player: PlayerId,
        objective: ObjectiveId,
    },

    /// The per-status-phase cap (one public, one secret) was reached.
    #[error("{player} already scored a {kind} objective this status phase")]
    StatusPhaseCapReached { player: PlayerId, kind: &'static str },

    /// The combat has already awarded an objective.
    #[error("combat {combat} already awarded objective {objective}")]
    CombatAlreadyScored {
        combat: CombatId,
        objective: ObjectiveId,
    },

    /// A combat-scored objective must require the action phase.
    #[error("objective {objective} requires the {required} phase and cannot be scored in combat")]
    CombatObjectivePhase {
        objective: ObjectiveId,
        required: GamePhase,
    },

    /// Awarding the points would push the player past the ceiling.
    #[error("awarding {points} points to {player} would exceed the {ceiling}-point ceiling")]
    PointCeilingExceeded {
        player: PlayerId,
        points: u8,
        ceiling: u8,
    },

    /// Public objectives require home-territory control first.
    #[error("{player} cannot score public objectives: {message}")]
    HomeSystemUncontrolled { player: PlayerId, message: String },

    /// A player's secret-objective hand is full.
    #[error("{player} cannot hold more than {limit} secret objectives")]
    SecretHandLimit { player: PlayerId, limit: usize },

    /// The same secret objective was dealt to a player twice.
    #[error("{player} already holds secret objective {objective}")]
    SecretObjectiveAlreadyHeld {
        player: PlayerId,
        objective: ObjectiveId,
    },

    /// No cards remain and there is no discard pile to reshuffle.
    #[error("the {deck} deck is exhausted with no discard pile to reshuffle")]
    DeckExhausted { deck: String },

    /// A phase-driver operation was invoked out of order.
    #[error("council session step out of order: {0}")]
    SessionSequence(String),
}

pub type Result<T> = std::result::Result<T, CouncilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_rule_and_actors() {
        let err = CouncilError::ObjectiveAlreadyScored {
            player: PlayerId::new(2),
            objective: ObjectiveId::new(7),
        };
        assert_eq!(
            err.to_string(),
            "Player 2 already scored objective Objective(7)"
        );

        let err = CouncilError::PointCeilingExceeded {
            player: PlayerId::new(0),
            points: 2,
            ceiling: 10,
        };
        assert_eq!(
            err.to_string(),
            "awarding 2 points to Player 0 would exceed the 10-point ceiling"
        );

        let err = CouncilError::WrongScoringPhase {
            objective: ObjectiveId::new(3),
            required: GamePhase::Status,
            current: GamePhase::Action,
        };
        assert_eq!(
            err.to_string(),
            "objective Objective(3) scores during the Status phase, not Action"
        );
    }

    #[test]
    fn test_deck_exhausted_names_the_deck() {
        let err = CouncilError::DeckExhausted {
            deck: "proposal".to_string(),
        };
        assert!(err.to_string().contains("proposal deck is exhausted"));
    }
}
