//! In-memory galaxy backing store.
//!
//! `GalaxyMap` is the concrete [`GalaxyView`] used by tests, demos, and any
//! simulator that does not already have its own territory model. Planets are
//! registered up front with a builder; ownership can change between phases
//! via [`GalaxyMap::set_owner`].

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::player::PlayerId;

use super::view::{GalaxyView, HomeControlCheck, PlanetId, PlanetTrait};

#[derive(Clone, Debug)]
struct PlanetRecord {
    owner: Option<PlayerId>,
    influence: u64,
    traits: SmallVec<[PlanetTrait; 2]>,
}

/// Straightforward map-backed galaxy.
#[derive(Clone, Debug, Default)]
pub struct GalaxyMap {
    planets: FxHashMap<PlanetId, PlanetRecord>,
    home_systems: FxHashMap<PlayerId, Vec<PlanetId>>,
}

impl GalaxyMap {
    /// Create an empty galaxy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an unowned planet.
    ///
    /// Panics if the planet is already registered.
    #[must_use]
    pub fn with_planet(mut self, planet: PlanetId, influence: u64, traits: &[PlanetTrait]) -> Self {
        if self.planets.contains_key(&planet) {
            panic!("{planet} already registered in galaxy");
        }
        self.planets.insert(
            planet,
            PlanetRecord {
                owner: None,
                influence,
                traits: SmallVec::from_slice(traits),
            },
        );
        self
    }

    /// Assign a registered planet to a player.
    ///
    /// Panics if the planet is unknown.
    #[must_use]
    pub fn with_owner(mut self, planet: PlanetId, owner: PlayerId) -> Self {
        self.set_owner(planet, Some(owner));
        self
    }

    /// Declare a player's home system.
    ///
    /// Panics if any named planet is unknown.
    #[must_use]
    pub fn with_home_system(mut self, player: PlayerId, planets: &[PlanetId]) -> Self {
        for planet in planets {
            assert!(
                self.planets.contains_key(planet),
                "{planet} in home system is not registered in galaxy"
            );
        }
        self.home_systems.insert(player, planets.to_vec());
        self
    }

    /// Change a planet's owner, e.g. after an invasion between phases.
    ///
    /// Panics if the planet is unknown.
    pub fn set_owner(&mut self, planet: PlanetId, owner: Option<PlayerId>) {
        match self.planets.get_mut(&planet) {
            Some(record) => record.owner = owner,
            None => panic!("{planet} is not registered in galaxy"),
        }
    }

    /// Number of registered planets.
    #[must_use]
    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    /// All planets currently owned by a player.
    pub fn planets_owned_by(&self, player: PlayerId) -> impl Iterator<Item = PlanetId> + '_ {
        self.planets
            .iter()
            .filter(move |(_, record)| record.owner == Some(player))
            .map(|(planet, _)| *planet)
    }
}

impl GalaxyView for GalaxyMap {
    fn planet_exists(&self, planet: PlanetId) -> bool {
        self.planets.contains_key(&planet)
    }

    fn planet_owner(&self, planet: PlanetId) -> Option<PlayerId> {
        self.planets.get(&planet).and_then(|record| record.owner)
    }

    fn planet_influence(&self, planet: PlanetId) -> u64 {
        self.planets.get(&planet).map_or(0, |record| record.influence)
    }

    fn planet_has_trait(&self, planet: PlanetId, planet_trait: PlanetTrait) -> bool {
        self.planets
            .get(&planet)
            .is_some_and(|record| record.traits.contains(&planet_trait))
    }

    fn validate_home_control(&self, player: PlayerId) -> HomeControlCheck {
        let Some(home) = self.home_systems.get(&player) else {
            // No declared home system means nothing to lose.
            return HomeControlCheck::passed();
        };

        for planet in home {
            match self.planet_owner(*planet) {
                Some(owner) if owner == player => {}
                Some(owner) => {
                    return HomeControlCheck::failed(format!(
                        "home planet {planet} is held by {owner}"
                    ));
                }
                None => {
                    return HomeControlCheck::failed(format!(
                        "home planet {planet} is uncontrolled"
                    ));
                }
            }
        }
        HomeControlCheck::passed()
    }
}
