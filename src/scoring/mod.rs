//! Objective scoring and victory evaluation.
//!
//! [`ScoringAuthority`] validates and applies objective scores as atomic
//! snapshot transitions; [`VictoryEvaluator`] answers who has won and who
//! leads or trails on points.

mod authority;
mod victory;

pub use authority::ScoringAuthority;
pub use victory::VictoryEvaluator;
