use crate::error::Result;
use crate::models::{AnswerKey, Vote};
use crate::voting::{
    aggregate_answers, format_line, rank_results, select_winner, PollResults, VotingMethod,
};

/// Returns the answer with the highest confidence-weighted vote count.
pub fn weighted_confidence<A: AnswerKey>(votes: &[Vote<A>], verbose: bool) -> Result<A> {
    let agg_answers = aggregate_answers(votes, verbose);
    select_winner(&agg_answers, |agg| Ok(agg.weighted_respondants))
}

pub fn calculate_results<A: AnswerKey>(
    votes: &[Vote<A>],
    verbose: bool,
) -> Result<PollResults<A>> {
    let agg_answers = aggregate_answers(votes, verbose);
    let winner = select_winner(&agg_answers, |agg| Ok(agg.weighted_respondants))?;
    let raw_results = rank_results(&agg_answers, |agg| Ok(agg.weighted_respondants))?;

    let mut summary = String::from("Each vote counts its confidence out of 5.\n\n");
    for count in &raw_results {
        let detail = format!("{:.1} weighted votes ({} voters)", count.score, count.respondants);
        summary.push_str(&format_line(count, &winner, &detail));
    }
    summary.push_str(&format!("\n{} voters participated.", votes.len()));

    Ok(PollResults {
        method: VotingMethod::WeightedConfidence,
        winner,
        summary,
        raw_results,
    })
}
