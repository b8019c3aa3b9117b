//! Read-only view of territory state.
//!
//! The council never owns planets; it asks an outer simulator about them
//! through [`GalaxyView`]. Everything the political components need is
//! covered by five queries: existence, ownership, influence value, traits,
//! and the home-system control check used for public-objective scoring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// Unique identifier for a planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanetId(pub u32);

impl PlanetId {
    /// Create a new planet ID.
    #[must_use]
    pub fn new(id: u32) -> Self {
        PlanetId(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Planet({})", self.0)
    }
}

/// A planet's trait category.
///
/// Election outcomes such as "Elect Cultural Planet" restrict eligible
/// targets to planets carrying the matching trait.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetTrait {
    Cultural,
    Hazardous,
    Industrial,
}

impl PlanetTrait {
    /// Parse a trait from its display name, as printed on election outcomes.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Cultural" => Some(PlanetTrait::Cultural),
            "Hazardous" => Some(PlanetTrait::Hazardous),
            "Industrial" => Some(PlanetTrait::Industrial),
            _ => None,
        }
    }
}

impl fmt::Display for PlanetTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanetTrait::Cultural => "Cultural",
            PlanetTrait::Hazardous => "Hazardous",
            PlanetTrait::Industrial => "Industrial",
        };
        write!(f, "{name}")
    }
}

/// Outcome of a home-system control check.
///
/// Carries the reason when control is lost so scoring errors can say which
/// planet was the problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeControlCheck {
    pub valid: bool,
    pub message: String,
}

impl HomeControlCheck {
    /// The player controls their full home system.
    #[must_use]
    pub fn passed() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// Control is lost; `message` names the offending planet.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// What the council is allowed to ask about the galaxy.
///
/// Implementations must answer consistently for the duration of one council
/// phase; the political components hold no planet state of their own.
pub trait GalaxyView {
    /// Whether a planet exists at all.
    fn planet_exists(&self, planet: PlanetId) -> bool;

    /// The planet's current owner, if anyone controls it.
    fn planet_owner(&self, planet: PlanetId) -> Option<PlayerId>;

    /// Influence contributed when the planet is staked on a vote.
    fn planet_influence(&self, planet: PlanetId) -> u64;

    /// Whether the planet carries the given trait.
    fn planet_has_trait(&self, planet: PlanetId, planet_trait: PlanetTrait) -> bool;

    /// Check that a player still controls every planet in their home system.
    fn validate_home_control(&self, player: PlayerId) -> HomeControlCheck;
}
