use crate::error::{Result, SpaError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::hash::Hash;

/// Anything a respondent can pick: integer ids, text labels, ...
pub trait AnswerKey: Eq + Hash + Clone + Display {}

impl<T: Eq + Hash + Clone + Display> AnswerKey for T {}

/// One respondent's response to a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote<A> {
    pub answer: A,
    /// Self-reported certainty, 1 (guess) to 5 (very high).
    pub confidence: i32,
    /// Estimated fraction of other participants who picked the same answer, 0 to 1.
    pub meta_judgment: f64,
}

impl<A> Vote<A> {
    pub fn new(answer: A, confidence: i32, meta_judgment: f64) -> Self {
        Self {
            answer,
            confidence,
            meta_judgment,
        }
    }

    pub fn normalized_confidence(&self) -> f64 {
        self.confidence as f64 / 5.0
    }
}

/// Running statistics for every vote sharing one answer value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedAnswer {
    total_respondants: usize,
    pub respondants: usize,
    pub weighted_respondants: f64,
    /// Running mean of the folded votes' meta-judgments.
    pub meta_judgment: f64,
    mean_meta: Option<f64>,
}

impl AggregatedAnswer {
    /// `total_respondants` is the vote count across all answers of the question.
    pub fn new(total_respondants: usize) -> Self {
        Self {
            total_respondants,
            respondants: 0,
            weighted_respondants: 0.0,
            meta_judgment: 0.0,
            mean_meta: None,
        }
    }

    pub fn total_respondants(&self) -> usize {
        self.total_respondants
    }

    /// Folds one vote into the aggregate.
    pub fn update<A>(&mut self, vote: &Vote<A>) -> &mut Self {
        self.respondants += 1;
        self.weighted_respondants += vote.normalized_confidence();
        self.meta_judgment += (vote.meta_judgment - self.meta_judgment) / self.respondants as f64;
        self
    }

    /// Observed share of the population that picked this answer.
    pub fn ratio(&self) -> f64 {
        self.respondants as f64 / self.total_respondants as f64
    }

    /// Computes and caches the expected share of this answer.
    ///
    /// `others` holds the aggregates of every other distinct answer to the
    /// same question. The own term is weighted by this answer's ratio while
    /// the others' defection terms are averaged uniformly:
    ///
    /// `ratio * meta_judgment + mean(other.ratio * (1 - other.meta_judgment))`
    ///
    /// A sole answer has an expected share of 0. Calling this again
    /// overwrites the cached value.
    pub fn calc_mean_meta(&mut self, others: &[AggregatedAnswer]) -> f64 {
        let mean_meta = if others.is_empty() {
            0.0
        } else {
            let defection: f64 = others
                .iter()
                .map(|other| other.ratio() * (1.0 - other.meta_judgment))
                .sum();
            self.ratio() * self.meta_judgment + defection / others.len() as f64
        };
        self.mean_meta = Some(mean_meta);
        mean_meta
    }

    pub fn mean_meta(&self) -> Result<f64> {
        self.mean_meta.ok_or(SpaError::MeanMetaNotComputed)
    }

    /// Observed share minus expected share.
    pub fn difference(&self) -> Result<f64> {
        Ok(self.ratio() - self.mean_meta()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn fold(total: usize, votes: &[Vote<u32>]) -> AggregatedAnswer {
        let mut agg = AggregatedAnswer::new(total);
        for vote in votes {
            agg.update(vote);
        }
        agg
    }

    #[test]
    fn normalized_confidence_scales_to_unit_interval() {
        assert_abs_diff_eq!(Vote::new(1, 1, 0.5).normalized_confidence(), 0.2);
        assert_abs_diff_eq!(Vote::new(1, 5, 0.5).normalized_confidence(), 1.0);
    }

    #[test]
    fn update_tracks_counts_weights_and_mean() {
        let agg = fold(4, &[Vote::new(7, 5, 0.2), Vote::new(7, 2, 0.6)]);

        assert_eq!(agg.respondants, 2);
        assert_eq!(agg.total_respondants(), 4);
        assert_abs_diff_eq!(agg.weighted_respondants, 1.4, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.meta_judgment, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.ratio(), 0.5);
    }

    #[test]
    fn update_chains() {
        let mut agg = AggregatedAnswer::new(2);
        agg.update(&Vote::new("a", 3, 0.1)).update(&Vote::new("a", 3, 0.3));
        assert_eq!(agg.respondants, 2);
        assert_abs_diff_eq!(agg.meta_judgment, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn mean_meta_is_unset_until_computed() {
        let agg = fold(1, &[Vote::new(1, 3, 0.5)]);
        assert!(matches!(agg.mean_meta(), Err(SpaError::MeanMetaNotComputed)));
        assert!(matches!(agg.difference(), Err(SpaError::MeanMetaNotComputed)));
    }

    #[test]
    fn sole_answer_expects_nothing() {
        let votes = [Vote::new(1, 3, 0.9), Vote::new(1, 4, 0.8), Vote::new(1, 1, 0.7)];
        let mut agg = fold(3, &votes);
        assert_eq!(agg.calc_mean_meta(&[]), 0.0);
        assert_abs_diff_eq!(agg.difference().unwrap(), agg.ratio());
    }

    #[test]
    fn others_are_averaged_without_their_ratio_weighting_the_mean() {
        // 10 voters: answer 1 x2 (meta 0.5), answer 2 x5 (meta 0.2), answer 3 x3 (meta 0.6)
        let mut one = fold(10, &vec![Vote::new(1, 3, 0.5); 2]);
        let two = fold(10, &vec![Vote::new(2, 3, 0.2); 5]);
        let three = fold(10, &vec![Vote::new(3, 3, 0.6); 3]);

        let mean_meta = one.calc_mean_meta(&[two, three]);
        // 0.2 * 0.5 + (0.5 * 0.8 + 0.3 * 0.4) / 2
        assert_abs_diff_eq!(mean_meta, 0.1 + 0.26, epsilon = 1e-12);
        assert_abs_diff_eq!(one.difference().unwrap(), 0.2 - 0.36, epsilon = 1e-12);
    }

    #[test]
    fn recomputing_mean_meta_overwrites_cache() {
        let mut one = fold(2, &[Vote::new(1, 3, 0.5)]);
        let two = fold(2, &[Vote::new(2, 3, 0.5)]);

        one.calc_mean_meta(&[two]);
        assert_abs_diff_eq!(one.mean_meta().unwrap(), 0.5, epsilon = 1e-12);
        one.calc_mean_meta(&[]);
        assert_eq!(one.mean_meta().unwrap(), 0.0);
    }

    #[test]
    fn votes_deserialize_from_json() {
        let json = r#"{"answer":"Canberra","confidence":4,"meta_judgment":0.25}"#;
        let vote: Vote<String> = serde_json::from_str(json).unwrap();
        assert_eq!(vote, Vote::new("Canberra".to_string(), 4, 0.25));
    }

    proptest! {
        #[test]
        fn meta_mean_ignores_fold_order(metas in proptest::collection::vec(0.0f64..=1.0, 1..50)) {
            let votes: Vec<Vote<u32>> = metas.iter().map(|m| Vote::new(0, 3, *m)).collect();
            let mut reversed = votes.clone();
            reversed.reverse();

            let forward = fold(votes.len(), &votes);
            let backward = fold(votes.len(), &reversed);
            let plain_mean = metas.iter().sum::<f64>() / metas.len() as f64;

            prop_assert!((forward.meta_judgment - backward.meta_judgment).abs() < 1e-9);
            prop_assert!((forward.meta_judgment - plain_mean).abs() < 1e-9);
        }
    }
}
