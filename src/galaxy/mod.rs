//! Territory seam: planet identity, traits, and the read-only galaxy view.

pub mod map;
pub mod view;

pub use map::GalaxyMap;
pub use view::{GalaxyView, HomeControlCheck, PlanetId, PlanetTrait};
