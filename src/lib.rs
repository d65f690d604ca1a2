//! Crowd answer aggregation with the Surprisingly Popular algorithm.
//!
//! Votes carry an answer, a 1-5 confidence and a meta-judgment (the share
//! of other respondents the voter expects to agree). Three rules pick a
//! winner from the same aggregation:
//!
//! - [`surprisingly_popular`]: observed share minus the crowd's expected share
//! - [`weighted_confidence`]: votes weighted by normalized confidence
//! - [`plurality`]: plain vote share
//!
//! Diagnostics requested through the `verbose` flags go to the `log` facade
//! at info level.

pub mod error;
pub mod models;
pub mod voting;

pub use error::{Result, SpaError};
pub use models::{AggregatedAnswer, AnswerKey, Vote};
pub use voting::plurality::plurality;
pub use voting::surprisingly_popular::surprisingly_popular;
pub use voting::weighted_confidence::weighted_confidence;
pub use voting::{
    aggregate_answers, calculate_results, compare_methods, Aggregation, PollResults, VoteCount,
    VotingMethod,
};
