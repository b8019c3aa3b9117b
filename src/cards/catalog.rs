//! Card catalog for proposal and objective lookup.
//!
//! The `CardCatalog` stores every card the simulator knows: proposals keyed
//! by their globally unique name, objectives keyed by id. The catalog is
//! built once at setup and read-only afterwards.

use rustc_hash::FxHashMap;

use crate::core::phase::GamePhase;

use super::objective::{ObjectiveCard, ObjectiveId};
use super::proposal::ProposalCard;

/// Registry of proposal and objective cards.
///
/// ## Example
///
/// ```
/// use star_council::cards::{CardCatalog, EffectPayload, Outcome, ProposalCard, ProposalKind};
/// use star_council::core::GameSnapshot;
/// use star_council::voting::VoteResult;
///
/// let mut catalog = CardCatalog::new();
/// catalog.register_proposal(ProposalCard::new(
///     "Open Borders",
///     ProposalKind::Policy,
///     |_: &Outcome, _: &VoteResult, _: &GameSnapshot| {
///         EffectPayload::policy("All wormholes are open")
///     },
/// ));
///
/// let found = catalog.proposal("Open Borders").unwrap();
/// assert_eq!(found.kind, ProposalKind::Policy);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    proposals: FxHashMap<String, ProposalCard>,
    objectives: FxHashMap<ObjectiveId, ObjectiveCard>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a proposal card.
    ///
    /// Panics if a proposal with the same name already exists.
    pub fn register_proposal(&mut self, card: ProposalCard) {
        if self.proposals.contains_key(&card.name) {
            panic!("Proposal '{}' already registered", card.name);
        }
        self.proposals.insert(card.name.clone(), card);
    }

    /// Register an objective card.
    ///
    /// Panics if an objective with the same ID already exists.
    pub fn register_objective(&mut self, card: ObjectiveCard) {
        if self.objectives.contains_key(&card.id) {
            panic!("{} already registered", card.id);
        }
        self.objectives.insert(card.id, card);
    }

    /// Get a proposal by name.
    #[must_use]
    pub fn proposal(&self, name: &str) -> Option<&ProposalCard> {
        self.proposals.get(name)
    }

    /// Get an objective by ID.
    #[must_use]
    pub fn objective(&self, id: ObjectiveId) -> Option<&ObjectiveCard> {
        self.objectives.get(&id)
    }

    /// Check if a proposal name is registered.
    #[must_use]
    pub fn contains_proposal(&self, name: &str) -> bool {
        self.proposals.contains_key(name)
    }

    /// Check if an objective ID is registered.
    #[must_use]
    pub fn contains_objective(&self, id: ObjectiveId) -> bool {
        self.objectives.contains_key(&id)
    }

    /// Number of registered proposals.
    #[must_use]
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Number of registered objectives.
    #[must_use]
    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }

    /// Iterate over all proposal names, for deck building.
    pub fn proposal_names(&self) -> impl Iterator<Item = &str> {
        self.proposals.keys().map(String::as_str)
    }

    /// Iterate over all proposals.
    pub fn iter_proposals(&self) -> impl Iterator<Item = &ProposalCard> {
        self.proposals.values()
    }

    /// Iterate over all objectives.
    pub fn iter_objectives(&self) -> impl Iterator<Item = &ObjectiveCard> {
        self.objectives.values()
    }

    /// Find objectives scorable in a given phase.
    pub fn objectives_for_phase(&self, phase: GamePhase) -> impl Iterator<Item = &ObjectiveCard> {
        self.objectives.values().filter(move |o| o.phase == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{EffectPayload, Outcome, ProposalKind, Visibility};
    use crate::core::player::PlayerId;
    use crate::core::snapshot::GameSnapshot;
    use crate::voting::VoteResult;

    fn proposal(name: &str) -> ProposalCard {
        ProposalCard::new(
            name,
            ProposalKind::Policy,
            |_: &Outcome, _: &VoteResult, _: &GameSnapshot| EffectPayload::policy("test"),
        )
    }

    fn objective(id: u32, phase: GamePhase) -> ObjectiveCard {
        ObjectiveCard::new(
            ObjectiveId::new(id),
            format!("Objective {id}"),
            1,
            phase,
            Visibility::Public,
            |_: PlayerId, _: &GameSnapshot| true,
        )
    }

    #[test]
    fn test_register_and_get_proposal() {
        let mut catalog = CardCatalog::new();
        catalog.register_proposal(proposal("Open Borders"));

        assert!(catalog.contains_proposal("Open Borders"));
        assert_eq!(catalog.proposal("Open Borders").unwrap().name, "Open Borders");
        assert!(catalog.proposal("Closed Borders").is_none());
    }

    #[test]
    fn test_register_and_get_objective() {
        let mut catalog = CardCatalog::new();
        catalog.register_objective(objective(1, GamePhase::Status));

        assert!(catalog.contains_objective(ObjectiveId::new(1)));
        assert!(catalog.objective(ObjectiveId::new(2)).is_none());
        assert_eq!(catalog.objective_count(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_proposal_panics() {
        let mut catalog = CardCatalog::new();
        catalog.register_proposal(proposal("Open Borders"));
        catalog.register_proposal(proposal("Open Borders"));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_objective_panics() {
        let mut catalog = CardCatalog::new();
        catalog.register_objective(objective(1, GamePhase::Status));
        catalog.register_objective(objective(1, GamePhase::Action));
    }

    #[test]
    fn test_objectives_for_phase() {
        let mut catalog = CardCatalog::new();
        catalog.register_objective(objective(1, GamePhase::Status));
        catalog.register_objective(objective(2, GamePhase::Action));
        catalog.register_objective(objective(3, GamePhase::Status));

        let status: Vec<_> = catalog.objectives_for_phase(GamePhase::Status).collect();
        assert_eq!(status.len(), 2);
        let action: Vec<_> = catalog.objectives_for_phase(GamePhase::Action).collect();
        assert_eq!(action.len(), 1);
    }

    #[test]
    fn test_proposal_names() {
        let mut catalog = CardCatalog::new();
        catalog.register_proposal(proposal("A"));
        catalog.register_proposal(proposal("B"));

        let mut names: Vec<_> = catalog.proposal_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B"]);
    }
}
