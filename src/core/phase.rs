//! Game phases and combat identification.
//!
//! Unlike zones or card content, phases are NOT opaque to this engine:
//! objective timing (§scoring) and the council step machine both branch on
//! the phase, so it is a real enum rather than a numeric id.

use serde::{Deserialize, Serialize};

/// The four phases of a game round.
///
/// Objectives name the phase they may be scored in; the Council phase is
/// when revealed proposals are voted on and resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Strategy selection (initiative assignment happens here, externally).
    #[default]
    Strategy,
    /// Tactical actions, combat included.
    Action,
    /// End-of-round upkeep; status-phase objective scoring happens here.
    Status,
    /// Proposal voting and resolution.
    Council,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Strategy => "Strategy",
            GamePhase::Action => "Action",
            GamePhase::Status => "Status",
            GamePhase::Council => "Council",
        };
        write!(f, "{}", name)
    }
}

/// Unique identifier for one combat.
///
/// The Galaxy/Combat subsystem allocates these; the scoring rules only ever
/// compare them, to enforce the one-objective-per-combat cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatId(pub u32);

impl CombatId {
    /// Create a new combat ID.
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

impl std::fmt::Display for CombatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Combat({})", self.0)
    }
}
