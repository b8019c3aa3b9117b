//! A small, fully wired council setup for tests and experiments.
//!
//! `council_fixture` builds a three-player game with a working galaxy, a
//! catalog of proposals and objectives, and a starting snapshot; it is the
//! reference for how a real catalog registers cards. `council_session`
//! stacks the fixture's proposals into a deterministic deck so callers know
//! the reveal order: Minister of War first, then Minister of Peace, then the
//! rest.

use crate::cards::{
    CardCatalog, CardDeck, EffectPayload, ElectedTarget, ObjectiveCard, ObjectiveId, Outcome,
    PolicyGrant, PolicyTrigger, ProposalCard, ProposalKind, Visibility,
};
use crate::core::config::CouncilConfig;
use crate::core::phase::GamePhase;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::snapshot::GameSnapshot;
use crate::driver::CouncilSession;
use crate::galaxy::{GalaxyMap, PlanetId, PlanetTrait};
use crate::voting::VoteResult;

/// Everything an experiment needs: cards, territory, starting state.
#[derive(Clone, Debug)]
pub struct CouncilFixture {
    pub catalog: CardCatalog,
    pub galaxy: GalaxyMap,
    pub snapshot: GameSnapshot,
}

/// Secret objective held by player 1 in the fixture.
pub const QUIET_ASCENDANCY: ObjectiveId = ObjectiveId::new(3);

/// Secret objective held by player 2 in the fixture.
pub const BREAK_THEIR_FLEET: ObjectiveId = ObjectiveId::new(4);

/// Build the demo game.
///
/// Three players. Player 0 holds the richest home system; planet 4 and 5
/// are the cultural worlds eligible for the Colonial Charter election.
/// Player 1 holds [`QUIET_ASCENDANCY`], player 2 holds
/// [`BREAK_THEIR_FLEET`].
#[must_use]
pub fn council_fixture() -> CouncilFixture {
    let catalog = demo_catalog();
    let galaxy = demo_galaxy();

    let snapshot = GameSnapshot::new(CouncilConfig::new(3))
        .deal_secret_objective(PlayerId::new(1), QUIET_ASCENDANCY)
        .and_then(|s| s.deal_secret_objective(PlayerId::new(2), BREAK_THEIR_FLEET))
        .unwrap_or_else(|err| panic!("demo fixture setup failed: {err}"));

    CouncilFixture {
        catalog,
        galaxy,
        snapshot,
    }
}

/// A session over the fixture catalog with a deterministic proposal deck.
///
/// Player 0 is the arbiter; initiative is ascending. The deck reveals
/// "Minister of War", "Minister of Peace", "Shared Research Pact",
/// "Wartime Production", "Colonial Charter", "Classified Document Leaks"
/// in that order.
#[must_use]
pub fn council_session(seed: u64) -> CouncilSession {
    let deck = CardDeck::new(
        "proposal",
        [
            "Classified Document Leaks".to_string(),
            "Colonial Charter".to_string(),
            "Wartime Production".to_string(),
            "Shared Research Pact".to_string(),
            "Minister of Peace".to_string(),
            "Minister of War".to_string(),
        ],
    );
    CouncilSession::new(council_fixture().catalog, deck, PlayerId::new(0), GameRng::new(seed))
        .with_initiative([PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)])
}

fn demo_catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();

    // Two ministers sharing the exclusive "Minister of" tag: enacting one
    // evicts the other.
    catalog.register_proposal(ProposalCard::new(
        "Minister of War",
        ProposalKind::Policy,
        |outcome: &Outcome, _: &VoteResult, _: &GameSnapshot| {
            if *outcome == Outcome::in_favor() {
                EffectPayload::Policy(
                    PolicyGrant::new("The Minister of War may force a second combat round")
                        .with_trigger(PolicyTrigger::Combat),
                )
            } else {
                EffectPayload::rejected("the war ministry stays vacant")
            }
        },
    ));
    catalog.register_proposal(ProposalCard::new(
        "Minister of Peace",
        ProposalKind::Policy,
        |outcome: &Outcome, _: &VoteResult, _: &GameSnapshot| {
            if *outcome == Outcome::in_favor() {
                EffectPayload::Policy(
                    PolicyGrant::new("The Minister of Peace may halt one invasion each round")
                        .with_trigger(PolicyTrigger::Movement),
                )
            } else {
                EffectPayload::rejected("the peace ministry stays vacant")
            }
        },
    ));

    // Non-exclusive standing policy hooked to the research step.
    catalog.register_proposal(ProposalCard::new(
        "Shared Research Pact",
        ProposalKind::Policy,
        |outcome: &Outcome, _: &VoteResult, _: &GameSnapshot| {
            if *outcome == Outcome::in_favor() {
                EffectPayload::Policy(
                    PolicyGrant::new("Players may exchange one technology during each research step")
                        .with_trigger(PolicyTrigger::Research),
                )
            } else {
                EffectPayload::rejected("the pact collapses unsigned")
            }
        },
    ));

    // One-time effect with paired texts for the two outcomes.
    catalog.register_proposal(ProposalCard::new(
        "Wartime Production",
        ProposalKind::Directive,
        |outcome: &Outcome, _: &VoteResult, _: &GameSnapshot| {
            if *outcome == Outcome::in_favor() {
                EffectPayload::directive("every shipyard runs double shifts this round")
            } else {
                EffectPayload::directive("the shipyards keep civilian schedules")
            }
        },
    ));

    // Elected policy: the winning cultural planet gains development rights.
    catalog.register_proposal(
        ProposalCard::new(
            "Colonial Charter",
            ProposalKind::Policy,
            |_: &Outcome, vote: &VoteResult, _: &GameSnapshot| match vote.elected {
                Some(ElectedTarget::Planet(planet)) => EffectPayload::policy(format!(
                    "Development rights granted on {planet}"
                )),
                _ => EffectPayload::rejected("no planet was chartered"),
            },
        )
        .with_outcomes([Outcome::new("Elect Cultural Planet")]),
    );

    // Elected directive: the chosen secret objective leaves its owner's
    // hand and becomes public knowledge.
    catalog.register_proposal(
        ProposalCard::new(
            "Classified Document Leaks",
            ProposalKind::Directive,
            |_: &Outcome, vote: &VoteResult, snapshot: &GameSnapshot| {
                let Some(ElectedTarget::SecretObjective(objective)) = vote.elected else {
                    return EffectPayload::rejected("no document was leaked");
                };
                let holder = snapshot
                    .players()
                    .find(|p| snapshot.holds_secret(*p, objective));
                match holder {
                    Some(player) => match snapshot.promote_secret_objective(player, objective) {
                        Ok(updated) => EffectPayload::directive_with_snapshot(
                            format!("secret objective {objective} is now public knowledge"),
                            updated,
                        ),
                        Err(err) => EffectPayload::rejected(err.to_string()),
                    },
                    None => EffectPayload::rejected(format!(
                        "nobody holds secret objective {objective}"
                    )),
                }
            },
        )
        .with_outcomes([Outcome::new("Elect Secret Objective")]),
    );

    catalog.register_objective(ObjectiveCard::new(
        ObjectiveId::new(1),
        "Expand the Frontier",
        1,
        GamePhase::Status,
        Visibility::Public,
        |_: PlayerId, _: &GameSnapshot| true,
    ));
    catalog.register_objective(ObjectiveCard::new(
        ObjectiveId::new(2),
        "Galactic Renown",
        2,
        GamePhase::Status,
        Visibility::Public,
        |player: PlayerId, snapshot: &GameSnapshot| snapshot.points(player) >= 4,
    ));
    catalog.register_objective(ObjectiveCard::new(
        QUIET_ASCENDANCY,
        "Quiet Ascendancy",
        1,
        GamePhase::Status,
        Visibility::Secret,
        |player: PlayerId, snapshot: &GameSnapshot| !snapshot.completed_objectives(player).is_empty(),
    ));
    catalog.register_objective(ObjectiveCard::new(
        BREAK_THEIR_FLEET,
        "Break Their Fleet",
        1,
        GamePhase::Action,
        Visibility::Secret,
        |_: PlayerId, _: &GameSnapshot| true,
    ));
    catalog.register_objective(ObjectiveCard::new(
        ObjectiveId::new(5),
        "Seize the Throneworld",
        1,
        GamePhase::Action,
        Visibility::Public,
        |_: PlayerId, _: &GameSnapshot| true,
    ));

    catalog
}

fn demo_galaxy() -> GalaxyMap {
    GalaxyMap::new()
        .with_planet(PlanetId::new(1), 4, &[PlanetTrait::Industrial])
        .with_planet(PlanetId::new(2), 3, &[PlanetTrait::Hazardous])
        .with_planet(PlanetId::new(3), 2, &[PlanetTrait::Cultural])
        .with_planet(PlanetId::new(4), 3, &[PlanetTrait::Cultural])
        .with_planet(PlanetId::new(5), 1, &[PlanetTrait::Cultural, PlanetTrait::Industrial])
        .with_planet(PlanetId::new(6), 2, &[PlanetTrait::Industrial])
        .with_owner(PlanetId::new(1), PlayerId::new(0))
        .with_owner(PlanetId::new(2), PlayerId::new(1))
        .with_owner(PlanetId::new(3), PlayerId::new(2))
        .with_owner(PlanetId::new(4), PlayerId::new(0))
        .with_owner(PlanetId::new(5), PlayerId::new(2))
        .with_home_system(PlayerId::new(0), &[PlanetId::new(1)])
        .with_home_system(PlayerId::new(1), &[PlanetId::new(2)])
        .with_home_system(PlayerId::new(2), &[PlanetId::new(3)])
}
