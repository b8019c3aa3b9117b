//! Active policies and the ledger that holds them.
//!
//! The `PolicyLedger` is the one mutable political component: a small,
//! singly-owned list of the policies currently in effect. It is updated
//! only inside the resolver's transaction for a proposal, never aliased
//! elsewhere; the immutable snapshot deliberately knows nothing about it.
//!
//! Conflicts are a matter of exclusive name tags: at most one "Minister of
//! ..." policy may be active at a time, and enacting a second one evicts
//! the first.

use serde::{Deserialize, Serialize};

use crate::cards::{ElectedTarget, PolicyTrigger};

/// A policy proposal that won its vote and remains in effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePolicy {
    /// Name of the proposal that created this policy.
    pub proposal: String,

    /// Round the policy was enacted in. Always positive.
    pub enacted_round: u32,

    /// Human-readable effect description. Never empty.
    pub description: String,

    /// Elected target carried by an election policy.
    pub elected: Option<ElectedTarget>,

    /// Which rules moment the policy hooks into, if any.
    pub trigger: Option<PolicyTrigger>,
}

impl ActivePolicy {
    /// Create an active policy.
    ///
    /// Panics if `enacted_round` is zero or `description` is empty - both
    /// indicate a bug in the resolver, not a rule violation.
    #[must_use]
    pub fn new(proposal: impl Into<String>, enacted_round: u32, description: impl Into<String>) -> Self {
        let description = description.into();
        assert!(enacted_round > 0, "Policies are enacted in round 1 or later");
        assert!(!description.is_empty(), "Policy description must not be empty");
        Self {
            proposal: proposal.into(),
            enacted_round,
            description,
            elected: None,
            trigger: None,
        }
    }

    /// Attach an elected target (builder pattern).
    #[must_use]
    pub fn with_elected(mut self, target: ElectedTarget) -> Self {
        self.elected = Some(target);
        self
    }

    /// Attach a trigger tag (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: PolicyTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

/// What an enactment did: the new policy plus everything it pushed out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnactmentReport {
    /// Name of the newly active policy.
    pub enacted_name: String,

    /// Policies evicted by the conflict rule, in their former ledger order.
    pub evicted: Vec<ActivePolicy>,

    /// Human-readable narration of the change.
    pub narration: String,
}

/// The list of currently active policies.
#[derive(Clone, Debug)]
pub struct PolicyLedger {
    policies: Vec<ActivePolicy>,
    /// Name fragments marking mutually exclusive policy classes.
    exclusive_tags: Vec<String>,
}

impl Default for PolicyLedger {
    fn default() -> Self {
        Self {
            policies: Vec::new(),
            exclusive_tags: vec!["Minister of".to_string()],
        }
    }
}

impl PolicyLedger {
    /// Create a ledger with the built-in exclusive classes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclusive name tag (builder pattern).
    ///
    /// Any two policies whose proposal names both contain the tag conflict
    /// with each other.
    #[must_use]
    pub fn with_exclusive_tag(mut self, tag: impl Into<String>) -> Self {
        self.exclusive_tags.push(tag.into());
        self
    }

    /// Enact a policy, evicting everything it conflicts with.
    pub fn enact_policy(&mut self, policy: ActivePolicy) {
        let _ = self.enact_policy_with_conflict_resolution(policy);
    }

    /// Enact a policy and report what it evicted.
    pub fn enact_policy_with_conflict_resolution(
        &mut self,
        policy: ActivePolicy,
    ) -> EnactmentReport {
        let tags = &self.exclusive_tags;
        let mut evicted = Vec::new();
        self.policies.retain(|existing| {
            if tags.iter().any(|tag| {
                existing.proposal.contains(tag.as_str()) && policy.proposal.contains(tag.as_str())
            }) {
                evicted.push(existing.clone());
                false
            } else {
                true
            }
        });

        for old in &evicted {
            tracing::info!(
                evicted = %old.proposal,
                replaced_by = %policy.proposal,
                "policy evicted by conflict"
            );
        }
        tracing::info!(
            policy = %policy.proposal,
            round = policy.enacted_round,
            "policy enacted"
        );

        let narration = if evicted.is_empty() {
            format!("Enacted '{}'", policy.proposal)
        } else {
            let names = evicted
                .iter()
                .map(|p| format!("'{}'", p.proposal))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Enacted '{}', replacing {names}", policy.proposal)
        };

        let enacted_name = policy.proposal.clone();
        self.policies.push(policy);

        EnactmentReport {
            enacted_name,
            evicted,
            narration,
        }
    }

    /// Remove a policy by proposal name, returning it if it was active.
    pub fn remove_policy(&mut self, name: &str) -> Option<ActivePolicy> {
        let index = self.policies.iter().position(|p| p.proposal == name)?;
        let removed = self.policies.remove(index);
        tracing::info!(policy = %removed.proposal, "policy removed");
        Some(removed)
    }

    /// Whether a policy with this proposal name is active.
    #[must_use]
    pub fn has_active_policy(&self, name: &str) -> bool {
        self.policies.iter().any(|p| p.proposal == name)
    }

    /// All active policies hooked into a rules moment, by exact tag match.
    #[must_use]
    pub fn policies_affecting(&self, trigger: PolicyTrigger) -> Vec<&ActivePolicy> {
        self.policies
            .iter()
            .filter(|p| p.trigger == Some(trigger))
            .collect()
    }

    /// The active policies in enactment order.
    #[must_use]
    pub fn active(&self) -> &[ActivePolicy] {
        &self.policies
    }

    /// Number of active policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether no policy is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
