use crate::error::Result;
use crate::models::{AnswerKey, Vote};
use crate::voting::{
    aggregate_answers, format_line, rank_results, select_winner, PollResults, VotingMethod,
};

/// Returns the answer picked by the most respondents.
pub fn plurality<A: AnswerKey>(votes: &[Vote<A>], verbose: bool) -> Result<A> {
    let agg_answers = aggregate_answers(votes, verbose);
    select_winner(&agg_answers, |agg| Ok(agg.ratio()))
}

pub fn calculate_results<A: AnswerKey>(
    votes: &[Vote<A>],
    verbose: bool,
) -> Result<PollResults<A>> {
    let agg_answers = aggregate_answers(votes, verbose);
    let winner = select_winner(&agg_answers, |agg| Ok(agg.ratio()))?;
    let raw_results = rank_results(&agg_answers, |agg| Ok(agg.ratio()))?;

    // Create a summary of the results
    let mut summary = String::new();
    for count in &raw_results {
        let detail = format!("{} votes ({:.1}%)", count.respondants, count.ratio * 100.0);
        summary.push_str(&format_line(count, &winner, &detail));
    }
    summary.push_str(&format!("\n{} voters participated.", votes.len()));

    Ok(PollResults {
        method: VotingMethod::Plurality,
        winner,
        summary,
        raw_results,
    })
}
