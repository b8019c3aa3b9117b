//! Card types: outcomes, proposals, objectives, the catalog, and decks.
//!
//! Cards are immutable definitions shared read-only across the game. Their
//! behavior lives in capability objects (`ProposalEffect`,
//! `ObjectiveRequirement`) invoked by the resolution and scoring components.

pub mod catalog;
pub mod deck;
pub mod objective;
pub mod outcome;
pub mod proposal;

pub use catalog::CardCatalog;
pub use deck::CardDeck;
pub use objective::{ObjectiveCard, ObjectiveId, ObjectiveRequirement, Visibility};
pub use outcome::{ElectedTarget, ElectionKind, Outcome};
pub use proposal::{
    EffectPayload, PolicyGrant, PolicyTrigger, ProposalCard, ProposalEffect, ProposalKind,
};
