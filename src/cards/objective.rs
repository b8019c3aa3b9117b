//! Objective cards and their requirement capabilities.
//!
//! `ObjectiveCard` holds the immutable properties of a scorable objective:
//! point value, required scoring phase, visibility, and a requirement
//! capability evaluated against the political snapshot. Objectives are
//! shared read-only across players; per-player progress (completed sets,
//! secret hands) lives in the snapshot.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::phase::GamePhase;
use crate::core::player::PlayerId;
use crate::core::snapshot::GameSnapshot;

/// Unique identifier for an objective card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectiveId(pub u32);

impl ObjectiveId {
    /// Create a new objective ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Objective({})", self.0)
    }
}

/// Whether an objective is revealed to everyone or held in hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Secret,
}

impl Visibility {
    /// Lowercase label used in scoring messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Secret => "secret",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Capability deciding whether a player currently satisfies an objective.
///
/// Implemented by one closure or named type per concrete card. Blanket-
/// implemented for matching `Fn` closures so simple cards need no type of
/// their own.
pub trait ObjectiveRequirement: Send + Sync {
    /// Whether `player` satisfies the requirement in `snapshot`.
    fn satisfied_by(&self, player: PlayerId, snapshot: &GameSnapshot) -> bool;
}

impl<F> ObjectiveRequirement for F
where
    F: Fn(PlayerId, &GameSnapshot) -> bool + Send + Sync,
{
    fn satisfied_by(&self, player: PlayerId, snapshot: &GameSnapshot) -> bool {
        self(player, snapshot)
    }
}

/// Static objective definition.
///
/// Cheap to clone; the requirement capability is shared behind an `Arc`.
///
/// ## Example
///
/// ```
/// use star_council::cards::{ObjectiveCard, ObjectiveId, Visibility};
/// use star_council::core::{CouncilConfig, GamePhase, GameSnapshot, PlayerId};
///
/// let objective = ObjectiveCard::new(
///     ObjectiveId::new(1),
///     "Hold Three Victory Points",
///     1,
///     GamePhase::Status,
///     Visibility::Public,
///     |player: PlayerId, snapshot: &GameSnapshot| snapshot.points(player) >= 3,
/// );
///
/// let snapshot = GameSnapshot::new(CouncilConfig::new(2));
/// assert!(!objective.satisfied_by(PlayerId::new(0), &snapshot));
/// ```
#[derive(Clone)]
pub struct ObjectiveCard {
    /// Unique identifier.
    pub id: ObjectiveId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Victory points granted on scoring. Always positive.
    pub points: u8,

    /// The only phase in which this objective may be scored.
    pub phase: GamePhase,

    /// Public or secret.
    pub visibility: Visibility,

    /// Requirement capability.
    requirement: Arc<dyn ObjectiveRequirement>,
}

impl ObjectiveCard {
    /// Create a new objective definition.
    ///
    /// Panics if `points` is zero.
    #[must_use]
    pub fn new(
        id: ObjectiveId,
        name: impl Into<String>,
        points: u8,
        phase: GamePhase,
        visibility: Visibility,
        requirement: impl ObjectiveRequirement + 'static,
    ) -> Self {
        assert!(points > 0, "Objective points must be positive");
        Self {
            id,
            name: name.into(),
            points,
            phase,
            visibility,
            requirement: Arc::new(requirement),
        }
    }

    /// Whether this objective is secret.
    #[must_use]
    pub fn is_secret(&self) -> bool {
        self.visibility == Visibility::Secret
    }

    /// Evaluate the requirement capability.
    #[must_use]
    pub fn satisfied_by(&self, player: PlayerId, snapshot: &GameSnapshot) -> bool {
        self.requirement.satisfied_by(player, snapshot)
    }
}

impl fmt::Debug for ObjectiveCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectiveCard")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("points", &self.points)
            .field("phase", &self.phase)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}
