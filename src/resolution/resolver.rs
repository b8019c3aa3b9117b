//! Outcome resolution: a winning vote becomes a policy or a directive.
//!
//! The `OutcomeResolver` is the transaction boundary between a settled
//! ballot and the political record. It validates the winning outcome and
//! any elected target, invokes the card's effect capability, and either
//! hands the resulting policy to the ledger or surfaces the directive's
//! one-time effect. The policy ledger is touched only inside
//! [`OutcomeResolver::resolve`], never elsewhere.
//!
//! Rule-expected failures (a card declining its outcome) come back as
//! `success = false` in the report; only genuinely illegal states - an
//! outcome the proposal never offered, a bad elected target - are errors.

use serde::{Deserialize, Serialize};

use crate::cards::{EffectPayload, ElectedTarget, Outcome, ProposalCard, ProposalKind};
use crate::core::error::{CouncilError, Result};
use crate::core::snapshot::GameSnapshot;
use crate::galaxy::GalaxyView;
use crate::voting::VoteResult;

use super::ledger::{ActivePolicy, PolicyLedger};

/// What resolving one proposal did.
///
/// Always carries a human-readable description, success or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Whether the card accepted the outcome.
    pub success: bool,

    /// Whether a policy entered the ledger.
    pub policy_enacted: bool,

    /// Whether a directive's one-time effect ran.
    pub directive_executed: bool,

    /// Narration of what happened.
    pub description: String,

    /// The elected target, when the winning outcome was an election.
    pub elected: Option<ElectedTarget>,

    /// Policies evicted by conflict when a policy was enacted.
    pub evicted_policies: Vec<ActivePolicy>,

    /// The transformed snapshot, when a directive changed political facts.
    pub updated_snapshot: Option<GameSnapshot>,
}

/// Stateless resolver for settled votes.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutcomeResolver;

impl OutcomeResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve a settled vote against its proposal.
    ///
    /// Consumes the vote result; a fresh one is built per resolution. The
    /// ledger is updated in place when a policy is enacted.
    pub fn resolve(
        &self,
        proposal: &ProposalCard,
        vote: VoteResult,
        snapshot: &GameSnapshot,
        galaxy: &dyn GalaxyView,
        ledger: &mut PolicyLedger,
    ) -> Result<ResolutionReport> {
        let outcome = vote.winning_outcome.clone();
        if outcome.as_str().is_empty() {
            return Err(CouncilError::MissingInput("winning outcome"));
        }
        if !proposal.allows_outcome(&outcome) {
            return Err(CouncilError::IllegalOutcome {
                proposal: proposal.name.clone(),
                outcome: outcome.to_string(),
            });
        }

        self.validate_election(&outcome, vote.elected, snapshot, galaxy)?;

        match proposal.kind {
            ProposalKind::Policy => self.resolve_policy(proposal, &outcome, vote, snapshot, ledger),
            ProposalKind::Directive => self.resolve_directive(proposal, &outcome, vote, snapshot),
        }
    }

    /// Election outcomes need a target of the right kind. Planet targets
    /// must exist and carry the elected trait; player targets must be in
    /// range. Secret-objective targets are catalog knowledge and are left
    /// to the card's own callback.
    fn validate_election(
        &self,
        outcome: &Outcome,
        elected: Option<ElectedTarget>,
        snapshot: &GameSnapshot,
        galaxy: &dyn GalaxyView,
    ) -> Result<()> {
        let Some(kind) = outcome.election_kind() else {
            return Ok(());
        };
        let Some(elected) = elected else {
            return Err(CouncilError::MissingElectedTarget {
                outcome: outcome.to_string(),
            });
        };
        if elected.kind() != kind {
            return Err(CouncilError::UnknownElectedTarget {
                target: elected.to_string(),
            });
        }

        match elected {
            ElectedTarget::Planet(planet) => {
                if !galaxy.planet_exists(planet) {
                    return Err(CouncilError::UnknownElectedTarget {
                        target: elected.to_string(),
                    });
                }
                if let Some(required) = outcome.election_trait() {
                    if !galaxy.planet_has_trait(planet, required) {
                        return Err(CouncilError::ElectedTraitMismatch { planet, required });
                    }
                }
            }
            ElectedTarget::Player(player) => {
                if !snapshot.is_player(player) {
                    return Err(CouncilError::UnknownElectedTarget {
                        target: elected.to_string(),
                    });
                }
            }
            ElectedTarget::SecretObjective(_) => {}
        }
        Ok(())
    }

    fn resolve_policy(
        &self,
        proposal: &ProposalCard,
        outcome: &Outcome,
        vote: VoteResult,
        snapshot: &GameSnapshot,
        ledger: &mut PolicyLedger,
    ) -> Result<ResolutionReport> {
        let payload = proposal.resolve_effect(outcome, &vote, snapshot);
        let qualifying = *outcome == Outcome::in_favor() || outcome.is_election();

        let (description, trigger) = match payload {
            EffectPayload::Policy(grant) => (grant.description, grant.trigger),
            // A policy card may answer with a free-form payload; its text
            // becomes the policy description.
            EffectPayload::Directive { description, .. } => (description, None),
            EffectPayload::Rejected(message) => {
                tracing::debug!(proposal = %proposal.name, outcome = %outcome, "policy declined");
                return Ok(ResolutionReport {
                    success: false,
                    policy_enacted: false,
                    directive_executed: false,
                    description: message,
                    elected: vote.elected,
                    evicted_policies: Vec::new(),
                    updated_snapshot: None,
                });
            }
        };

        if !qualifying {
            return Ok(ResolutionReport {
                success: true,
                policy_enacted: false,
                directive_executed: false,
                description: format!(
                    "'{}' was discarded after '{}' prevailed",
                    proposal.name, outcome
                ),
                elected: vote.elected,
                evicted_policies: Vec::new(),
                updated_snapshot: None,
            });
        }

        let description = if description.is_empty() {
            format!("'{}' is in effect", proposal.name)
        } else {
            description
        };

        let mut policy = ActivePolicy::new(&proposal.name, snapshot.round(), description);
        if let Some(elected) = vote.elected {
            policy = policy.with_elected(elected);
        }
        if let Some(trigger) = trigger {
            policy = policy.with_trigger(trigger);
        }

        let report = ledger.enact_policy_with_conflict_resolution(policy);

        Ok(ResolutionReport {
            success: true,
            policy_enacted: true,
            directive_executed: false,
            description: report.narration,
            elected: vote.elected,
            evicted_policies: report.evicted,
            updated_snapshot: None,
        })
    }

    fn resolve_directive(
        &self,
        proposal: &ProposalCard,
        outcome: &Outcome,
        vote: VoteResult,
        snapshot: &GameSnapshot,
    ) -> Result<ResolutionReport> {
        let payload = proposal.resolve_effect(outcome, &vote, snapshot);

        let (description, updated_snapshot) = match payload {
            EffectPayload::Directive {
                description,
                snapshot: updated,
            } => (description, updated),
            // A directive card answering with a policy grant executes it as
            // one-time narration; nothing persists.
            EffectPayload::Policy(grant) => (grant.description, None),
            EffectPayload::Rejected(message) => {
                tracing::debug!(proposal = %proposal.name, outcome = %outcome, "directive declined");
                return Ok(ResolutionReport {
                    success: false,
                    policy_enacted: false,
                    directive_executed: false,
                    description: message,
                    elected: vote.elected,
                    evicted_policies: Vec::new(),
                    updated_snapshot: None,
                });
            }
        };

        tracing::info!(
            proposal = %proposal.name,
            outcome = %outcome,
            "directive executed"
        );

        Ok(ResolutionReport {
            success: true,
            policy_enacted: false,
            directive_executed: true,
            description,
            elected: vote.elected,
            evicted_policies: Vec::new(),
            updated_snapshot,
        })
    }
}
