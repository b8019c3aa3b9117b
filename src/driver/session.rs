//! The council session: the phase driver's view of the political engine.
//!
//! A `CouncilSession` owns everything with political state (deck, ballot,
//! ledger, tie-break authority) and walks the fixed agenda of a council
//! phase: reveal a proposal, open voting, resolve, twice over, then ready
//! the staked planets. Out-of-order calls fail with
//! [`CouncilError::SessionSequence`] and leave the session untouched, so a
//! driver can always retry the step it actually meant.
//!
//! The game snapshot is never owned here. Callers pass the current snapshot
//! in and receive the transformed one back, keeping the session reusable
//! across search branches that fork snapshots freely.

use smallvec::SmallVec;

use crate::cards::{CardCatalog, CardDeck, ElectedTarget, ObjectiveId, Outcome, ProposalCard};
use crate::core::error::{CouncilError, Result};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::snapshot::GameSnapshot;
use crate::galaxy::{GalaxyView, PlanetId};
use crate::resolution::{ActivePolicy, OutcomeResolver, PolicyLedger, ResolutionReport};
use crate::scoring::ScoringAuthority;
use crate::voting::{TallyVerdict, TieBreaker, VoteReceipt, VoteRejection, VoteResult, VoteTally, VotingEngine};

/// Where the session stands inside the current council phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStep {
    /// No proposal is face up.
    AwaitingReveal,
    /// A proposal is revealed but voting has not begun.
    Revealed,
    /// The ballot is open.
    Voting,
}

/// One declaration's fate during the status-phase scoring step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// The objective scored and the points were awarded.
    Scored {
        player: PlayerId,
        objective: ObjectiveId,
        points: u8,
    },
    /// The declaration was refused; the batch continued without it.
    Refused {
        player: PlayerId,
        objective: ObjectiveId,
        reason: CouncilError,
    },
}

impl ScoreOutcome {
    /// Whether the declaration scored.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self, ScoreOutcome::Scored { .. })
    }
}

/// Orchestrates voting, resolution, and scoring for the phase driver.
#[derive(Debug)]
pub struct CouncilSession {
    catalog: CardCatalog,
    proposal_deck: CardDeck<String>,
    engine: VotingEngine,
    ledger: PolicyLedger,
    resolver: OutcomeResolver,
    authority: ScoringAuthority,
    tie_breaker: TieBreaker,
    initiative: Vec<PlayerId>,
    rng: GameRng,
    step: SessionStep,
    current_proposal: Option<ProposalCard>,
    proposals_resolved: u8,
}

impl CouncilSession {
    /// Create a session over a catalog and a proposal deck.
    ///
    /// The deck holds proposal names; every name must be registered in the
    /// catalog, which is checked at reveal time.
    #[must_use]
    pub fn new(
        catalog: CardCatalog,
        proposal_deck: CardDeck<String>,
        arbiter: PlayerId,
        rng: GameRng,
    ) -> Self {
        Self {
            catalog,
            proposal_deck,
            engine: VotingEngine::new(),
            ledger: PolicyLedger::new(),
            resolver: OutcomeResolver::new(),
            authority: ScoringAuthority::new(),
            tie_breaker: TieBreaker::new(arbiter),
            initiative: Vec::new(),
            rng,
            step: SessionStep::AwaitingReveal,
            current_proposal: None,
            proposals_resolved: 0,
        }
    }

    /// Set the initiative order used for voting order.
    #[must_use]
    pub fn with_initiative(mut self, order: impl IntoIterator<Item = PlayerId>) -> Self {
        self.initiative = order.into_iter().collect();
        self
    }

    /// Hand the tie-break seat to another player.
    pub fn set_arbiter(&mut self, player: PlayerId) {
        tracing::info!(
            previous = %self.tie_breaker.arbiter(),
            next = %player,
            "tie-break seat reassigned"
        );
        self.tie_breaker = TieBreaker::new(player);
    }

    /// Reveal the next proposal from the deck.
    ///
    /// Panics if the drawn name is not registered in the catalog; deck and
    /// catalog are built together and a mismatch is a setup bug.
    pub fn reveal_proposal(&mut self) -> Result<ProposalCard> {
        match self.step {
            SessionStep::AwaitingReveal => {}
            SessionStep::Revealed => {
                return Err(CouncilError::SessionSequence(
                    "a proposal is already revealed".to_string(),
                ));
            }
            SessionStep::Voting => {
                return Err(CouncilError::SessionSequence(
                    "the open ballot must resolve before the next reveal".to_string(),
                ));
            }
        }
        if self.proposals_resolved >= 2 {
            return Err(CouncilError::SessionSequence(
                "both proposals for this council phase are resolved".to_string(),
            ));
        }

        let name = self.proposal_deck.draw(&mut self.rng)?;
        let card = self
            .catalog
            .proposal(&name)
            .unwrap_or_else(|| panic!("Proposal '{name}' is in the deck but not the catalog"))
            .clone();

        tracing::info!(proposal = %name, kind = %card.kind, "proposal revealed");
        self.current_proposal = Some(card.clone());
        self.step = SessionStep::Revealed;
        Ok(card)
    }

    /// Open the ballot on the revealed proposal.
    pub fn begin_voting(&mut self) -> Result<()> {
        if self.step != SessionStep::Revealed {
            return Err(CouncilError::SessionSequence(
                "voting starts after a proposal is revealed".to_string(),
            ));
        }
        self.engine.open(self.current_proposal.as_ref());
        self.step = SessionStep::Voting;
        Ok(())
    }

    /// Cast a player's whole vote.
    ///
    /// Mechanics problems come back as [`VoteRejection`] values; the ballot
    /// stays open either way.
    pub fn cast_votes(
        &mut self,
        player: PlayerId,
        staked: &[PlanetId],
        outcome: &Outcome,
        galaxy: &dyn GalaxyView,
    ) -> std::result::Result<VoteReceipt, VoteRejection> {
        self.engine.cast_votes(player, staked, outcome, galaxy)
    }

    /// Resolve the first proposal of the phase.
    pub fn resolve_first_proposal(
        &mut self,
        snapshot: &GameSnapshot,
        elected: Option<ElectedTarget>,
        arbiter_choice: Option<Outcome>,
        galaxy: &dyn GalaxyView,
    ) -> Result<(ResolutionReport, GameSnapshot)> {
        if self.proposals_resolved != 0 {
            return Err(CouncilError::SessionSequence(
                "the first proposal is already resolved".to_string(),
            ));
        }
        self.resolve_current(snapshot, elected, arbiter_choice, galaxy)
    }

    /// Resolve the second proposal of the phase.
    pub fn resolve_second_proposal(
        &mut self,
        snapshot: &GameSnapshot,
        elected: Option<ElectedTarget>,
        arbiter_choice: Option<Outcome>,
        galaxy: &dyn GalaxyView,
    ) -> Result<(ResolutionReport, GameSnapshot)> {
        if self.proposals_resolved != 1 {
            return Err(CouncilError::SessionSequence(
                "the second proposal resolves after the first".to_string(),
            ));
        }
        self.resolve_current(snapshot, elected, arbiter_choice, galaxy)
    }

    /// Settle the open ballot and apply the outcome.
    ///
    /// Ties and empty tallies need `arbiter_choice`; without one the call
    /// fails and can be retried once the arbiter has chosen. Nothing is
    /// mutated until the resolver accepts the vote.
    fn resolve_current(
        &mut self,
        snapshot: &GameSnapshot,
        elected: Option<ElectedTarget>,
        arbiter_choice: Option<Outcome>,
        galaxy: &dyn GalaxyView,
    ) -> Result<(ResolutionReport, GameSnapshot)> {
        if self.step != SessionStep::Voting {
            return Err(CouncilError::SessionSequence(
                "no ballot is open to resolve".to_string(),
            ));
        }
        let Some(proposal) = self.current_proposal.clone() else {
            return Err(CouncilError::SessionSequence(
                "no proposal is revealed".to_string(),
            ));
        };

        let tally = self.engine.tally();
        let mut vote = match self.engine.determine_winning_outcome(&tally) {
            TallyVerdict::Decided(outcome) => VoteResult::new(outcome, tally),
            TallyVerdict::Tied(_) | TallyVerdict::NoVotes => {
                let chosen = arbiter_choice.ok_or(CouncilError::MissingInput("arbiter choice"))?;
                self.tie_breaker.resolve_tie(&tally, chosen)
            }
        };
        if let Some(target) = elected {
            vote = vote.with_elected(target);
        }

        let report = self
            .resolver
            .resolve(&proposal, vote, snapshot, galaxy, &mut self.ledger)?;

        self.engine.close();
        self.current_proposal = None;
        self.step = SessionStep::AwaitingReveal;
        self.proposals_resolved += 1;

        // Cards that did not become law go to the discard pile, as do the
        // cards of any policies this enactment evicted.
        if !report.policy_enacted {
            self.proposal_deck.discard(proposal.name.clone());
        }
        for evicted in &report.evicted_policies {
            self.proposal_deck.discard(evicted.proposal.clone());
        }

        let next = report
            .updated_snapshot
            .clone()
            .unwrap_or_else(|| snapshot.clone());
        Ok((report, next))
    }

    /// Apply a batch of status-phase scoring declarations in order.
    ///
    /// Each declaration is attempted against the snapshot produced by the
    /// previous one; refusals are reported and the batch continues.
    pub fn execute_status_phase_scoring_step(
        &self,
        snapshot: &GameSnapshot,
        declarations: &[(PlayerId, ObjectiveId)],
        galaxy: &dyn GalaxyView,
    ) -> (GameSnapshot, Vec<ScoreOutcome>) {
        let mut current = snapshot.clone();
        let mut outcomes = Vec::with_capacity(declarations.len());

        for &(player, objective) in declarations {
            let Some(card) = self.catalog.objective(objective) else {
                outcomes.push(ScoreOutcome::Refused {
                    player,
                    objective,
                    reason: CouncilError::UnknownObjective(objective),
                });
                continue;
            };
            match self
                .authority
                .score_objective(&current, player, card, current.phase(), galaxy)
            {
                Ok(next) => {
                    outcomes.push(ScoreOutcome::Scored {
                        player,
                        objective,
                        points: card.points,
                    });
                    current = next;
                }
                Err(reason) => outcomes.push(ScoreOutcome::Refused {
                    player,
                    objective,
                    reason,
                }),
            }
        }

        (current, outcomes)
    }

    /// Close the council phase: ready every staked planet and reset the
    /// proposal sequence. An unresolved revealed proposal is discarded.
    pub fn ready_all_staked_units(&mut self) {
        if let Some(proposal) = self.current_proposal.take() {
            tracing::debug!(proposal = %proposal.name, "unresolved proposal discarded");
            self.proposal_deck.discard(proposal.name);
        }
        self.engine.close();
        self.engine.ready_all();
        self.step = SessionStep::AwaitingReveal;
        self.proposals_resolved = 0;
        tracing::info!("council phase closed");
    }

    /// The player holding the tie-break seat.
    #[must_use]
    pub fn arbiter(&self) -> PlayerId {
        self.tie_breaker.arbiter()
    }

    /// Where the session stands in the current phase.
    #[must_use]
    pub fn step(&self) -> SessionStep {
        self.step
    }

    /// Proposals resolved so far this council phase.
    #[must_use]
    pub fn proposals_resolved(&self) -> u8 {
        self.proposals_resolved
    }

    /// The revealed proposal, if any.
    #[must_use]
    pub fn current_proposal(&self) -> Option<&ProposalCard> {
        self.current_proposal.as_ref()
    }

    /// Every policy currently in force.
    #[must_use]
    pub fn active_policies(&self) -> &[ActivePolicy] {
        self.ledger.active()
    }

    /// Policies that hook the given trigger.
    #[must_use]
    pub fn policies_affecting(
        &self,
        trigger: crate::cards::PolicyTrigger,
    ) -> Vec<&ActivePolicy> {
        self.ledger.policies_affecting(trigger)
    }

    /// The current ballot tally.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        self.engine.tally()
    }

    /// Voting order under the current initiative: arbiter votes last.
    #[must_use]
    pub fn voting_order(&self) -> SmallVec<[PlayerId; 8]> {
        self.engine
            .voting_order(&self.initiative, self.tie_breaker.arbiter())
    }

    /// Whether a planet is exhausted from an earlier vote.
    #[must_use]
    pub fn is_spent(&self, planet: PlanetId) -> bool {
        self.engine.is_spent(planet)
    }

    /// Proposals left in the draw pile.
    #[must_use]
    pub fn remaining_proposals(&self) -> usize {
        self.proposal_deck.remaining()
    }

    /// Proposals in the discard pile.
    #[must_use]
    pub fn discarded_proposals(&self) -> usize {
        self.proposal_deck.discard_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{EffectPayload, ProposalKind, Visibility};
    use crate::cards::{ObjectiveCard, PolicyGrant};
    use crate::core::config::CouncilConfig;
    use crate::core::phase::GamePhase;
    use crate::galaxy::{GalaxyMap, PlanetTrait};

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register_proposal(ProposalCard::new(
            "Shared Research",
            ProposalKind::Policy,
            |outcome: &Outcome, _: &VoteResult, _: &GameSnapshot| {
                if *outcome == Outcome::in_favor() {
                    EffectPayload::Policy(PolicyGrant::new("Joint research allowed"))
                } else {
                    EffectPayload::rejected("joint research declined")
                }
            },
        ));
        catalog.register_proposal(ProposalCard::new(
            "Victory Parade",
            ProposalKind::Directive,
            |outcome: &Outcome, _: &VoteResult, _: &GameSnapshot| {
                if *outcome == Outcome::in_favor() {
                    EffectPayload::directive("a parade is held")
                } else {
                    EffectPayload::directive("no parade this year")
                }
            },
        ));
        catalog.register_objective(ObjectiveCard::new(
            ObjectiveId::new(1),
            "Expand Borders",
            1,
            GamePhase::Status,
            Visibility::Public,
            |_: PlayerId, _: &GameSnapshot| true,
        ));
        catalog.register_objective(ObjectiveCard::new(
            ObjectiveId::new(2),
            "Fortify the Core",
            1,
            GamePhase::Status,
            Visibility::Public,
            |_: PlayerId, _: &GameSnapshot| true,
        ));
        catalog
    }

    // Draw order is back-to-front: "Shared Research" comes up first.
    fn session() -> CouncilSession {
        let deck = CardDeck::new(
            "proposal",
            ["Victory Parade".to_string(), "Shared Research".to_string()],
        );
        CouncilSession::new(catalog(), deck, PlayerId::new(0), GameRng::new(11))
            .with_initiative([PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)])
    }

    fn galaxy() -> GalaxyMap {
        GalaxyMap::new()
            .with_planet(PlanetId::new(1), 3, &[PlanetTrait::Cultural])
            .with_planet(PlanetId::new(2), 3, &[PlanetTrait::Industrial])
            .with_planet(PlanetId::new(3), 1, &[PlanetTrait::Hazardous])
            .with_owner(PlanetId::new(1), PlayerId::new(0))
            .with_owner(PlanetId::new(2), PlayerId::new(1))
            .with_owner(PlanetId::new(3), PlayerId::new(2))
            .with_home_system(PlayerId::new(0), &[PlanetId::new(1)])
            .with_home_system(PlayerId::new(1), &[PlanetId::new(2)])
    }

    fn snapshot() -> GameSnapshot {
        GameSnapshot::new(CouncilConfig::new(3))
    }

    #[test]
    fn test_full_first_proposal_flow() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        let card = session.reveal_proposal().unwrap();
        assert_eq!(card.name, "Shared Research");
        assert_eq!(session.step(), SessionStep::Revealed);

        session.begin_voting().unwrap();
        session
            .cast_votes(PlayerId::new(0), &[PlanetId::new(1)], &Outcome::in_favor(), &galaxy)
            .unwrap();
        session
            .cast_votes(PlayerId::new(1), &[PlanetId::new(2)], &Outcome::in_favor(), &galaxy)
            .unwrap();

        let (report, next) = session
            .resolve_first_proposal(&snap, None, None, &galaxy)
            .unwrap();
        assert!(report.policy_enacted);
        assert_eq!(session.active_policies().len(), 1);
        assert_eq!(session.proposals_resolved(), 1);
        assert_eq!(session.step(), SessionStep::AwaitingReveal);
        // A policy resolution leaves the snapshot alone.
        assert_eq!(next, snap);
        // Enacted policies do not go to the discard pile.
        assert_eq!(session.discarded_proposals(), 0);
    }

    #[test]
    fn test_out_of_order_calls_are_rejected() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        assert!(matches!(
            session.begin_voting(),
            Err(CouncilError::SessionSequence(_))
        ));
        assert!(matches!(
            session.resolve_first_proposal(&snap, None, None, &galaxy),
            Err(CouncilError::SessionSequence(_))
        ));

        session.reveal_proposal().unwrap();
        assert!(matches!(
            session.reveal_proposal(),
            Err(CouncilError::SessionSequence(_))
        ));
        // A revealed-but-unopened ballot cannot resolve either.
        assert!(matches!(
            session.resolve_first_proposal(&snap, None, None, &galaxy),
            Err(CouncilError::SessionSequence(_))
        ));
    }

    #[test]
    fn test_second_resolution_requires_first() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        session.reveal_proposal().unwrap();
        session.begin_voting().unwrap();
        session
            .cast_votes(PlayerId::new(0), &[PlanetId::new(1)], &Outcome::in_favor(), &galaxy)
            .unwrap();

        let err = session
            .resolve_second_proposal(&snap, None, None, &galaxy)
            .unwrap_err();
        assert_eq!(
            err,
            CouncilError::SessionSequence("the second proposal resolves after the first".to_string())
        );
    }

    #[test]
    fn test_tie_needs_arbiter_choice_and_retry_works() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        session.reveal_proposal().unwrap();
        session.begin_voting().unwrap();
        // 3 influence each way.
        session
            .cast_votes(PlayerId::new(0), &[PlanetId::new(1)], &Outcome::in_favor(), &galaxy)
            .unwrap();
        session
            .cast_votes(PlayerId::new(1), &[PlanetId::new(2)], &Outcome::against(), &galaxy)
            .unwrap();

        let err = session
            .resolve_first_proposal(&snap, None, None, &galaxy)
            .unwrap_err();
        assert_eq!(err, CouncilError::MissingInput("arbiter choice"));
        // The failed call left the ballot open.
        assert_eq!(session.step(), SessionStep::Voting);

        let (report, _) = session
            .resolve_first_proposal(&snap, None, Some(Outcome::in_favor()), &galaxy)
            .unwrap();
        assert!(report.policy_enacted);
    }

    #[test]
    fn test_empty_tally_needs_arbiter_choice() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        session.reveal_proposal().unwrap();
        session.begin_voting().unwrap();

        let err = session
            .resolve_first_proposal(&snap, None, None, &galaxy)
            .unwrap_err();
        assert_eq!(err, CouncilError::MissingInput("arbiter choice"));

        let (report, _) = session
            .resolve_first_proposal(&snap, None, Some(Outcome::against()), &galaxy)
            .unwrap();
        assert!(!report.success);
        assert!(!report.policy_enacted);
    }

    #[test]
    fn test_directive_card_is_discarded() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        // Burn the first proposal (the policy) with an arbiter call.
        session.reveal_proposal().unwrap();
        session.begin_voting().unwrap();
        session
            .resolve_first_proposal(&snap, None, Some(Outcome::against()), &galaxy)
            .unwrap();

        let card = session.reveal_proposal().unwrap();
        assert_eq!(card.name, "Victory Parade");
        session.begin_voting().unwrap();
        session
            .cast_votes(PlayerId::new(0), &[PlanetId::new(1)], &Outcome::in_favor(), &galaxy)
            .unwrap();
        let (report, _) = session
            .resolve_second_proposal(&snap, None, None, &galaxy)
            .unwrap();

        assert!(report.directive_executed);
        // Both cards ended up discarded: the declined policy and the parade.
        assert_eq!(session.discarded_proposals(), 2);
        assert_eq!(session.remaining_proposals(), 0);
    }

    #[test]
    fn test_third_reveal_is_blocked_until_phase_closes() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        for _ in 0..2 {
            session.reveal_proposal().unwrap();
            session.begin_voting().unwrap();
            session
                .resolve_first_proposal(&snap, None, Some(Outcome::against()), &galaxy)
                .ok();
            session
                .resolve_second_proposal(&snap, None, Some(Outcome::against()), &galaxy)
                .ok();
        }
        assert_eq!(session.proposals_resolved(), 2);
        assert!(matches!(
            session.reveal_proposal(),
            Err(CouncilError::SessionSequence(_))
        ));

        session.ready_all_staked_units();
        assert_eq!(session.proposals_resolved(), 0);
        // The discard pile reshuffles, so a new phase can reveal again.
        assert!(session.reveal_proposal().is_ok());
    }

    #[test]
    fn test_staked_planets_ready_at_phase_close() {
        let mut session = session();
        let galaxy = galaxy();
        let snap = snapshot();

        session.reveal_proposal().unwrap();
        session.begin_voting().unwrap();
        session
            .cast_votes(PlayerId::new(0), &[PlanetId::new(1)], &Outcome::in_favor(), &galaxy)
            .unwrap();
        session
            .resolve_first_proposal(&snap, None, None, &galaxy)
            .unwrap();
        assert!(session.is_spent(PlanetId::new(1)));

        session.ready_all_staked_units();
        assert!(!session.is_spent(PlanetId::new(1)));
    }

    #[test]
    fn test_status_phase_batch_reports_mixed_outcomes() {
        let session = session();
        let galaxy = galaxy();
        let snap = snapshot().begin_status_phase();

        let declarations = [
            (PlayerId::new(0), ObjectiveId::new(1)),
            // Second public objective in the same status phase: over the cap.
            (PlayerId::new(0), ObjectiveId::new(2)),
            // Not registered at all.
            (PlayerId::new(1), ObjectiveId::new(99)),
            (PlayerId::new(1), ObjectiveId::new(1)),
        ];
        let (next, outcomes) =
            session.execute_status_phase_scoring_step(&snap, &declarations, &galaxy);

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes[0].succeeded());
        assert!(matches!(
            outcomes[1],
            ScoreOutcome::Refused {
                reason: CouncilError::StatusPhaseCapReached { .. },
                ..
            }
        ));
        assert!(matches!(
            outcomes[2],
            ScoreOutcome::Refused {
                reason: CouncilError::UnknownObjective(_),
                ..
            }
        ));
        assert!(outcomes[3].succeeded());

        assert_eq!(next.points(PlayerId::new(0)), 1);
        assert_eq!(next.points(PlayerId::new(1)), 1);
        // The input snapshot is untouched.
        assert_eq!(snap.points(PlayerId::new(0)), 0);
    }

    #[test]
    fn test_voting_order_puts_arbiter_last() {
        let session = session();
        let order = session.voting_order();
        assert_eq!(
            order.as_slice(),
            &[PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)]
        );
    }

    #[test]
    fn test_set_arbiter_moves_the_seat() {
        let mut session = session();
        session.set_arbiter(PlayerId::new(2));
        assert_eq!(session.arbiter(), PlayerId::new(2));
        let order = session.voting_order();
        assert_eq!(order.last(), Some(&PlayerId::new(2)));
    }
}
