//! Proposal cards: policies, directives, and their effect capabilities.
//!
//! A `ProposalCard` is a votable card. Its `kind` decides what a winning
//! vote produces: a `Policy` enacts a persistent rule that lives in the
//! policy ledger until evicted; a `Directive` executes once and is
//! discarded. The card's behavior is a capability object invoked by the
//! resolver with the winning outcome, the vote result, and the snapshot -
//! one closure or named type per concrete card, looked up by name in the
//! catalog.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::snapshot::GameSnapshot;
use crate::voting::VoteResult;

use super::outcome::Outcome;

/// Whether a proposal enacts a lasting policy or a one-time directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalKind {
    Policy,
    Directive,
}

impl ProposalKind {
    /// Parse a kind label from card data.
    ///
    /// Unrecognized labels fall back to `Policy`; the fallback lives here at
    /// the construction boundary so downstream code never sees an unknown
    /// kind.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label.eq_ignore_ascii_case("directive") {
            ProposalKind::Directive
        } else {
            if !label.eq_ignore_ascii_case("policy") {
                tracing::debug!(label, "unrecognized proposal kind treated as policy");
            }
            ProposalKind::Policy
        }
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProposalKind::Policy => "Policy",
            ProposalKind::Directive => "Directive",
        };
        write!(f, "{name}")
    }
}

/// The rules moment an active policy hooks into.
///
/// Declared by the card when its policy is granted and matched by exact
/// equality when the ledger is asked which policies affect a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyTrigger {
    Research,
    Production,
    Combat,
    Movement,
    Scoring,
    Agenda,
}

/// What a winning policy outcome grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyGrant {
    /// Human-readable effect description, stored on the active policy.
    pub description: String,

    /// Which rules moment the policy affects, if it hooks into one.
    pub trigger: Option<PolicyTrigger>,
}

impl PolicyGrant {
    /// Create a grant with no trigger tag.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            trigger: None,
        }
    }

    /// Attach a trigger tag (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: PolicyTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

/// What a proposal's effect capability hands back to the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectPayload {
    /// Enact a persistent policy with this grant.
    Policy(PolicyGrant),

    /// Execute a one-time effect. A directive that changes political facts
    /// (e.g. promoting a secret objective) returns the transformed snapshot;
    /// purely narrative directives return `None`.
    Directive {
        description: String,
        snapshot: Option<GameSnapshot>,
    },

    /// The card declines this outcome; the message explains why.
    Rejected(String),
}

impl EffectPayload {
    /// A policy payload with no trigger tag.
    #[must_use]
    pub fn policy(description: impl Into<String>) -> Self {
        EffectPayload::Policy(PolicyGrant::new(description))
    }

    /// A narrative directive payload.
    #[must_use]
    pub fn directive(description: impl Into<String>) -> Self {
        EffectPayload::Directive {
            description: description.into(),
            snapshot: None,
        }
    }

    /// A directive payload carrying a transformed snapshot.
    #[must_use]
    pub fn directive_with_snapshot(description: impl Into<String>, snapshot: GameSnapshot) -> Self {
        EffectPayload::Directive {
            description: description.into(),
            snapshot: Some(snapshot),
        }
    }

    /// A rejection payload.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        EffectPayload::Rejected(message.into())
    }
}

/// Capability resolving a proposal's winning outcome into a payload.
///
/// Blanket-implemented for matching `Fn` closures so concrete cards can be
/// written inline.
pub trait ProposalEffect: Send + Sync {
    /// Resolve `outcome` into this card's payload.
    fn resolve(
        &self,
        outcome: &Outcome,
        vote: &VoteResult,
        snapshot: &GameSnapshot,
    ) -> EffectPayload;
}

impl<F> ProposalEffect for F
where
    F: Fn(&Outcome, &VoteResult, &GameSnapshot) -> EffectPayload + Send + Sync,
{
    fn resolve(
        &self,
        outcome: &Outcome,
        vote: &VoteResult,
        snapshot: &GameSnapshot,
    ) -> EffectPayload {
        self(outcome, vote, snapshot)
    }
}

/// Static proposal definition.
///
/// Identified by globally unique name; cheap to clone. New cards default to
/// the "For"/"Against" outcome pair; election cards override it.
///
/// ## Example
///
/// ```
/// use star_council::cards::{EffectPayload, Outcome, ProposalCard, ProposalKind};
/// use star_council::core::GameSnapshot;
/// use star_council::voting::VoteResult;
///
/// let card = ProposalCard::new(
///     "Shared Research",
///     ProposalKind::Policy,
///     |outcome: &Outcome, _vote: &VoteResult, _snapshot: &GameSnapshot| {
///         if *outcome == Outcome::in_favor() {
///             EffectPayload::policy("All players may research jointly")
///         } else {
///             EffectPayload::rejected("the council voted it down")
///         }
///     },
/// );
///
/// assert!(card.allows_outcome(&Outcome::in_favor()));
/// assert!(card.allows_outcome(&Outcome::against()));
/// ```
#[derive(Clone)]
pub struct ProposalCard {
    /// Globally unique card name.
    pub name: String,

    /// Policy or directive.
    pub kind: ProposalKind,

    /// Valid voting options.
    pub outcomes: Vec<Outcome>,

    /// Effect capability.
    effect: Arc<dyn ProposalEffect>,
}

impl ProposalCard {
    /// Create a proposal with the standard "For"/"Against" outcomes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: ProposalKind,
        effect: impl ProposalEffect + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            outcomes: vec![Outcome::in_favor(), Outcome::against()],
            effect: Arc::new(effect),
        }
    }

    /// Replace the outcome list (builder pattern).
    #[must_use]
    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        self.outcomes = outcomes.into_iter().collect();
        self
    }

    /// Whether `outcome` is one of this card's valid options.
    #[must_use]
    pub fn allows_outcome(&self, outcome: &Outcome) -> bool {
        self.outcomes.contains(outcome)
    }

    /// Invoke the effect capability for a winning outcome.
    #[must_use]
    pub fn resolve_effect(
        &self,
        outcome: &Outcome,
        vote: &VoteResult,
        snapshot: &GameSnapshot,
    ) -> EffectPayload {
        self.effect.resolve(outcome, vote, snapshot)
    }
}

impl fmt::Debug for ProposalCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProposalCard")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("outcomes", &self.outcomes)
            .finish_non_exhaustive()
    }
}
