//! Turning settled votes into lasting law or one-time action.
//!
//! [`OutcomeResolver`] is the single entry point: it consumes a
//! [`VoteResult`](crate::voting::VoteResult), validates it against the
//! proposal, and produces a [`ResolutionReport`]. Enacted policies live in
//! the [`PolicyLedger`] until a conflicting enactment evicts them.

mod ledger;
mod resolver;

pub use ledger::{ActivePolicy, EnactmentReport, PolicyLedger};
pub use resolver::{OutcomeResolver, ResolutionReport};
