//! Voting tally engine.
//!
//! The `VotingEngine` runs the ballot for one proposal at a time: it
//! records exactly one vote per player, sums staked influence per outcome,
//! and exhausts staked planets. Exhaustion outlives the ballot - planets
//! spent on the first proposal of a council phase stay spent for the
//! second, until [`VotingEngine::ready_all`] readies everything.
//!
//! Vote problems (wrong owner, exhausted planet, double vote) are routine
//! during interactive play, so they come back as [`VoteRejection`] values
//! rather than errors. Every rejection rolls back anything the failed call
//! exhausted, leaving the engine exactly as it was.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::cards::{Outcome, ProposalCard};
use crate::core::player::PlayerId;
use crate::galaxy::{GalaxyView, PlanetId};

use super::tally::{TallyVerdict, VoteTally};

/// Why a vote was not recorded.
///
/// A plain value, not an error: rejections are expected play, and the
/// caller (UI or AI) decides what to do with them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteRejection {
    /// No ballot is currently open.
    BallotClosed,

    /// The player already voted for this same outcome.
    AlreadyVoted { player: PlayerId, outcome: Outcome },

    /// The player already voted and may not switch outcomes.
    ChangedVote { player: PlayerId, previous: Outcome },

    /// The outcome is not on the proposal's ballot.
    IllegalOutcome { outcome: Outcome },

    /// The same planet appears twice in one stake list.
    DuplicateStake { planet: PlanetId },

    /// The staked planet does not exist.
    UnknownStake { planet: PlanetId },

    /// The staked planet is not owned by the voter.
    UnownedStake { planet: PlanetId, player: PlayerId },

    /// The staked planet was already exhausted.
    ExhaustedStake { planet: PlanetId },
}

impl fmt::Display for VoteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteRejection::BallotClosed => write!(f, "no ballot is open"),
            VoteRejection::AlreadyVoted { player, outcome } => {
                write!(f, "{player} already voted for '{outcome}'")
            }
            VoteRejection::ChangedVote { player, previous } => {
                write!(
                    f,
                    "{player} already voted for '{previous}' and cannot change outcomes"
                )
            }
            VoteRejection::IllegalOutcome { outcome } => {
                write!(f, "'{outcome}' is not a valid outcome for this proposal")
            }
            VoteRejection::DuplicateStake { planet } => {
                write!(f, "{planet} is staked twice in the same vote")
            }
            VoteRejection::UnknownStake { planet } => {
                write!(f, "{planet} does not exist")
            }
            VoteRejection::UnownedStake { planet, player } => {
                write!(f, "{planet} is not owned by {player}")
            }
            VoteRejection::ExhaustedStake { planet } => {
                write!(f, "{planet} is already exhausted")
            }
        }
    }
}

/// Confirmation of a recorded vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteReceipt {
    pub player: PlayerId,
    pub outcome: Outcome,
    /// Total influence the stake contributed.
    pub influence: u64,
    /// How many planets were exhausted for it.
    pub planets_staked: usize,
}

/// Stateful ballot runner for one proposal at a time.
///
/// Single-owner: the council session holds exactly one engine and resets it
/// between proposals with [`VotingEngine::open`].
#[derive(Clone, Debug, Default)]
pub struct VotingEngine {
    ballot_open: bool,
    /// Valid outcomes of the open proposal; `None` means unrestricted.
    valid_outcomes: Option<Vec<Outcome>>,
    /// One recorded outcome per player.
    votes: FxHashMap<PlayerId, Outcome>,
    tally: VoteTally,
    /// Planets exhausted by staking, across proposals until `ready_all`.
    spent: FxHashSet<PlanetId>,
}

impl VotingEngine {
    /// Create an engine with no open ballot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ballot, fully resetting per-proposal vote state.
    ///
    /// Passing the proposal restricts votes to its outcome list; `None`
    /// leaves outcomes unrestricted. Planet exhaustion carries over from
    /// earlier ballots.
    pub fn open(&mut self, proposal: Option<&ProposalCard>) {
        self.ballot_open = true;
        self.valid_outcomes = proposal.map(|p| p.outcomes.clone());
        self.votes.clear();
        self.tally = VoteTally::new();

        let name = proposal.map_or("unrestricted", |p| p.name.as_str());
        tracing::debug!(proposal = name, "ballot opened");
    }

    /// Close the ballot; further votes are rejected until the next `open`.
    pub fn close(&mut self) {
        self.ballot_open = false;
    }

    /// Whether a ballot is open.
    #[must_use]
    pub fn ballot_is_open(&self) -> bool {
        self.ballot_open
    }

    /// Cast one player's entire vote: an outcome plus the planets staked
    /// behind it.
    ///
    /// An empty stake list is a legal zero-influence vote and still locks
    /// the player's choice. The call is atomic - on any rejection, every
    /// planet it exhausted is readied again before returning.
    pub fn cast_votes(
        &mut self,
        player: PlayerId,
        staked: &[PlanetId],
        outcome: &Outcome,
        galaxy: &dyn GalaxyView,
    ) -> Result<VoteReceipt, VoteRejection> {
        if !self.ballot_open {
            return Err(VoteRejection::BallotClosed);
        }

        if let Some(valid) = &self.valid_outcomes {
            if !valid.contains(outcome) {
                return Err(VoteRejection::IllegalOutcome {
                    outcome: outcome.clone(),
                });
            }
        }

        if let Some(previous) = self.votes.get(&player) {
            return Err(if previous == outcome {
                VoteRejection::AlreadyVoted {
                    player,
                    outcome: outcome.clone(),
                }
            } else {
                VoteRejection::ChangedVote {
                    player,
                    previous: previous.clone(),
                }
            });
        }

        // Exhaust stakes one planet at a time; roll all of them back if any
        // planet fails a check.
        let mut exhausted_now: SmallVec<[PlanetId; 4]> = SmallVec::new();
        let mut influence = 0u64;
        let mut rejection = None;

        for &planet in staked {
            if exhausted_now.contains(&planet) {
                rejection = Some(VoteRejection::DuplicateStake { planet });
                break;
            }
            if !galaxy.planet_exists(planet) {
                rejection = Some(VoteRejection::UnknownStake { planet });
                break;
            }
            if galaxy.planet_owner(planet) != Some(player) {
                rejection = Some(VoteRejection::UnownedStake { planet, player });
                break;
            }
            if !self.spent.insert(planet) {
                rejection = Some(VoteRejection::ExhaustedStake { planet });
                break;
            }
            exhausted_now.push(planet);
            influence += galaxy.planet_influence(planet);
        }

        if let Some(rejection) = rejection {
            for planet in exhausted_now {
                self.spent.remove(&planet);
            }
            return Err(rejection);
        }

        self.votes.insert(player, outcome.clone());
        self.tally.record(outcome, influence);
        tracing::debug!(
            %player,
            outcome = %outcome,
            influence,
            staked = exhausted_now.len(),
            "vote cast"
        );

        Ok(VoteReceipt {
            player,
            outcome: outcome.clone(),
            influence,
            planets_staked: exhausted_now.len(),
        })
    }

    /// A copy of the current tally.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        self.tally.clone()
    }

    /// Whether a player has voted on the open ballot.
    #[must_use]
    pub fn has_voted(&self, player: PlayerId) -> bool {
        self.votes.contains_key(&player)
    }

    /// The outcome a player voted for, if they have.
    #[must_use]
    pub fn vote_of(&self, player: PlayerId) -> Option<&Outcome> {
        self.votes.get(&player)
    }

    /// Classify a tally as decided, tied, or empty.
    #[must_use]
    pub fn determine_winning_outcome(&self, tally: &VoteTally) -> TallyVerdict {
        tally.verdict()
    }

    /// Voting order: every player in their given order, arbiter moved last.
    #[must_use]
    pub fn voting_order(
        &self,
        players: &[PlayerId],
        arbiter: PlayerId,
    ) -> SmallVec<[PlayerId; 8]> {
        let mut order: SmallVec<[PlayerId; 8]> = players
            .iter()
            .copied()
            .filter(|&p| p != arbiter)
            .collect();
        if players.contains(&arbiter) {
            order.push(arbiter);
        }
        order
    }

    /// Ready every exhausted planet.
    pub fn ready_all(&mut self) {
        let count = self.spent.len();
        self.spent.clear();
        tracing::debug!(count, "all staked planets readied");
    }

    /// Whether a planet is currently exhausted.
    #[must_use]
    pub fn is_spent(&self, planet: PlanetId) -> bool {
        self.spent.contains(&planet)
    }

    /// Number of currently exhausted planets.
    #[must_use]
    pub fn spent_count(&self) -> usize {
        self.spent.len()
    }
}
