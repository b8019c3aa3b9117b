//! Ballot outcomes and elected targets.
//!
//! An `Outcome` is a named voting option printed on a proposal card. Most
//! proposals carry the plain "For"/"Against" pair; election proposals use
//! "Elect ..." outcomes whose text encodes what kind of target the winning
//! vote must name, and optionally which planet trait an elected planet must
//! carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::galaxy::{PlanetId, PlanetTrait};

use super::objective::ObjectiveId;

/// A named voting option on a proposal.
///
/// Ordered lexically so tallies iterate alphabetically, which is what makes
/// the deterministic tie fallback reproducible.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Outcome(String);

/// What kind of target an election outcome expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionKind {
    Player,
    Planet,
    SecretObjective,
}

impl Outcome {
    /// Create an outcome from its printed name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Outcome(name.into())
    }

    /// The standard affirmative outcome.
    #[must_use]
    pub fn in_favor() -> Self {
        Outcome::new("For")
    }

    /// The standard negative outcome.
    #[must_use]
    pub fn against() -> Self {
        Outcome::new("Against")
    }

    /// The outcome's printed name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this outcome elects a target rather than approving/rejecting.
    #[must_use]
    pub fn is_election(&self) -> bool {
        self.0.starts_with("Elect")
    }

    /// Classify the target an election outcome expects.
    ///
    /// Returns `None` for non-elections. Election text mentioning
    /// "Secret Objective" expects an objective, text mentioning "Planet"
    /// expects a planet, anything else elects a player.
    #[must_use]
    pub fn election_kind(&self) -> Option<ElectionKind> {
        if !self.is_election() {
            return None;
        }
        if self.0.contains("Secret Objective") {
            Some(ElectionKind::SecretObjective)
        } else if self.0.contains("Planet") {
            Some(ElectionKind::Planet)
        } else {
            Some(ElectionKind::Player)
        }
    }

    /// The planet trait a typed planet election requires, if any.
    ///
    /// "Elect Cultural Planet" requires [`PlanetTrait::Cultural`]; a plain
    /// "Elect Planet" accepts any planet.
    #[must_use]
    pub fn election_trait(&self) -> Option<PlanetTrait> {
        if self.election_kind()? != ElectionKind::Planet {
            return None;
        }
        self.0.split_whitespace().find_map(PlanetTrait::from_name)
    }
}

impl From<&str> for Outcome {
    fn from(name: &str) -> Self {
        Outcome::new(name)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The target named by a winning election outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectedTarget {
    Player(PlayerId),
    Planet(PlanetId),
    SecretObjective(ObjectiveId),
}

impl ElectedTarget {
    /// The election kind this target satisfies.
    #[must_use]
    pub fn kind(&self) -> ElectionKind {
        match self {
            ElectedTarget::Player(_) => ElectionKind::Player,
            ElectedTarget::Planet(_) => ElectionKind::Planet,
            ElectedTarget::SecretObjective(_) => ElectionKind::SecretObjective,
        }
    }
}

impl fmt::Display for ElectedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectedTarget::Player(player) => write!(f, "{player}"),
            ElectedTarget::Planet(planet) => write!(f, "{planet}"),
            ElectedTarget::SecretObjective(objective) => {
                write!(f, "secret objective {objective}")
            }
        }
    }
}
