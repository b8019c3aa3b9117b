//! Voting: tallies, ballots, the engine, and the tie-break authority.

pub mod arbiter;
pub mod engine;
pub mod result;
pub mod tally;

pub use arbiter::TieBreaker;
pub use engine::{VoteReceipt, VoteRejection, VotingEngine};
pub use result::VoteResult;
pub use tally::{TallyVerdict, VoteTally};
