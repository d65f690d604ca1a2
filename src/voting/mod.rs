pub mod plurality;
pub mod surprisingly_popular;
pub mod weighted_confidence;

use crate::error::{Result, SpaError};
use crate::models::{AggregatedAnswer, AnswerKey, Vote};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Per-answer aggregates of one question, in first-seen answer order.
pub type Aggregation<A> = IndexMap<A, AggregatedAnswer>;

/// Groups votes by answer and folds each group into an `AggregatedAnswer`.
pub fn aggregate_answers<A: AnswerKey>(votes: &[Vote<A>], verbose: bool) -> Aggregation<A> {
    let total = votes.len();
    let mut agg_answers: Aggregation<A> = IndexMap::new();

    for vote in votes {
        agg_answers
            .entry(vote.answer.clone())
            .or_insert_with(|| AggregatedAnswer::new(total))
            .update(vote);
    }

    if verbose {
        let mut answers: Vec<String> =
            agg_answers.keys().map(|answer| answer.to_string()).collect();
        answers.sort();
        info!("Aggregated answers are: {}.", answers.join(", "));
    }
    debug!("Aggregated {} votes into {} answers", total, agg_answers.len());

    agg_answers
}

/// Orders scores with NaN below every number so garbage input never wins
/// over a real score.
fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Picks the answer with the highest score. Ties go to the first-seen answer.
pub(crate) fn select_winner<A, F>(agg_answers: &Aggregation<A>, score: F) -> Result<A>
where
    A: AnswerKey,
    F: Fn(&AggregatedAnswer) -> Result<f64>,
{
    let mut best: Option<(&A, f64)> = None;
    for (answer, agg) in agg_answers {
        let value = score(agg)?;
        let better = match best {
            Some((_, best_value)) => compare_scores(value, best_value) == Ordering::Greater,
            None => true,
        };
        if better {
            best = Some((answer, value));
        }
    }

    best.map(|(answer, _)| answer.clone()).ok_or(SpaError::NoVotes)
}

// Generic structure for poll results
#[derive(Debug, Clone, Serialize)]
pub struct PollResults<A> {
    pub method: VotingMethod,
    pub winner: A,                      // The winning answer
    pub summary: String,                // Detailed results as formatted text
    pub raw_results: Vec<VoteCount<A>>, // Scores for all answers, best first
}

impl<A: Serialize> PollResults<A> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// Structure to hold per-answer scores
#[derive(Debug, Clone, Serialize)]
pub struct VoteCount<A> {
    pub answer: A,
    pub respondants: usize,
    pub ratio: f64,
    pub score: f64,
    pub rank: usize,
}

/// Orders answers by score (highest first) and assigns 1-based ranks.
/// The sort is stable so tied answers keep their first-seen order.
pub(crate) fn rank_results<A, F>(
    agg_answers: &Aggregation<A>,
    score: F,
) -> Result<Vec<VoteCount<A>>>
where
    A: AnswerKey,
    F: Fn(&AggregatedAnswer) -> Result<f64>,
{
    let mut counts = agg_answers
        .iter()
        .map(|(answer, agg)| {
            Ok(VoteCount {
                answer: answer.clone(),
                respondants: agg.respondants,
                ratio: agg.ratio(),
                score: score(agg)?,
                rank: 0,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    counts.sort_by(|a, b| compare_scores(b.score, a.score));
    for (i, count) in counts.iter_mut().enumerate() {
        count.rank = i + 1;
    }

    Ok(counts)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMethod {
    SurprisinglyPopular,
    WeightedConfidence,
    Plurality,
}

impl VotingMethod {
    pub const ALL: [VotingMethod; 3] = [
        VotingMethod::SurprisinglyPopular,
        VotingMethod::WeightedConfidence,
        VotingMethod::Plurality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VotingMethod::SurprisinglyPopular => "surprisingly_popular",
            VotingMethod::WeightedConfidence => "weighted_confidence",
            VotingMethod::Plurality => "plurality",
        }
    }
}

impl fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VotingMethod {
    type Err = SpaError;

    fn from_str(s: &str) -> Result<Self> {
        VotingMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| SpaError::UnknownMethod(s.to_string()))
    }
}

/// Scores one question with the given method.
pub fn calculate_results<A: AnswerKey>(
    method: VotingMethod,
    votes: &[Vote<A>],
    verbose: bool,
) -> Result<PollResults<A>> {
    match method {
        VotingMethod::SurprisinglyPopular => {
            surprisingly_popular::calculate_results(votes, verbose)
        }
        VotingMethod::WeightedConfidence => weighted_confidence::calculate_results(votes, verbose),
        VotingMethod::Plurality => plurality::calculate_results(votes, verbose),
    }
}

/// Scores one question with every method, in `VotingMethod::ALL` order.
pub fn compare_methods<A: AnswerKey>(
    votes: &[Vote<A>],
    verbose: bool,
) -> Result<Vec<PollResults<A>>> {
    VotingMethod::ALL
        .into_iter()
        .map(|method| calculate_results(method, votes, verbose))
        .collect()
}

// Bold the winner's line the same way for every method
pub(crate) fn format_line<A: AnswerKey>(count: &VoteCount<A>, winner: &A, detail: &str) -> String {
    if &count.answer == winner {
        format!("**{}**: {}\n", count.answer, detail)
    } else {
        format!("{}: {}\n", count.answer, detail)
    }
}
