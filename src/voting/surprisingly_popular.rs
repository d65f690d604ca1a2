use crate::error::Result;
use crate::models::{AggregatedAnswer, AnswerKey, Vote};
use crate::voting::{
    aggregate_answers, format_line, rank_results, select_winner, Aggregation, PollResults,
    VotingMethod,
};
use log::info;

/// Aggregates the votes and computes every answer's expected share.
fn scored_answers<A: AnswerKey>(votes: &[Vote<A>], verbose: bool) -> Result<Aggregation<A>> {
    let mut agg_answers = aggregate_answers(votes, verbose);

    // Every answer sees a snapshot of all the others
    let snapshot: Vec<AggregatedAnswer> = agg_answers.values().copied().collect();
    for (i, agg) in agg_answers.values_mut().enumerate() {
        let others: Vec<AggregatedAnswer> = snapshot
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, other)| *other)
            .collect();
        agg.calc_mean_meta(&others);
    }

    if verbose {
        for (answer, agg) in &agg_answers {
            info!("{}", describe(answer, agg)?);
        }
    }

    Ok(agg_answers)
}

/// One diagnostic line: observed ratio and expected share, three decimals each.
fn describe<A: AnswerKey>(answer: &A, agg: &AggregatedAnswer) -> Result<String> {
    Ok(format!(
        "{:.3} voted for '{}'. Mean-meta is '{:.3}'.",
        agg.ratio(),
        answer,
        agg.mean_meta()?
    ))
}

/// Returns the answer whose observed share most exceeds the share the
/// respondents themselves predicted for it.
pub fn surprisingly_popular<A: AnswerKey>(votes: &[Vote<A>], verbose: bool) -> Result<A> {
    let agg_answers = scored_answers(votes, verbose)?;
    select_winner(&agg_answers, |agg| agg.difference())
}

pub fn calculate_results<A: AnswerKey>(
    votes: &[Vote<A>],
    verbose: bool,
) -> Result<PollResults<A>> {
    let agg_answers = scored_answers(votes, verbose)?;
    let winner = select_winner(&agg_answers, |agg| agg.difference())?;
    let raw_results = rank_results(&agg_answers, |agg| agg.difference())?;

    // Create a summary of the results
    let mut summary = String::new();
    for count in &raw_results {
        let expected = agg_answers[&count.answer].mean_meta()?;
        let detail = format!(
            "{} votes ({:.1}%), expected {:.1}%, surprise {:+.3}",
            count.respondants,
            count.ratio * 100.0,
            expected * 100.0,
            count.score
        );
        summary.push_str(&format_line(count, &winner, &detail));
    }
    summary.push_str(&format!("\n{} voters participated.", votes.len()));

    Ok(PollResults {
        method: VotingMethod::SurprisinglyPopular,
        winner,
        summary,
        raw_results,
    })
}
