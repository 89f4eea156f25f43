//! Ranking Composer - Weighted aggregation of local priorities into a final ranking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AhpError, PriorityVector};

/// Scores closer than this are treated as tied.
pub const SCORE_TIE_TOLERANCE: f64 = 1e-12;

/// An alternative with its global score and competition rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub name: String,
    pub score: f64,
    pub rank: usize,
}

/// A criterion with its weight and its rank among criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCriterion {
    pub name: String,
    pub weight: f64,
    pub rank: usize,
}

/// Relative drop from one ranked alternative to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreGap {
    pub from: String,
    pub to: String,
    /// (from − to) / from × 100
    pub gap_percent: f64,
}

/// One criterion's share of an alternative's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: String,
    pub local_priority: f64,
    pub weighted: f64,
}

/// How an alternative's score is built up across criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedBreakdown {
    pub alternative: String,
    pub contributions: Vec<CriterionContribution>,
    pub total: f64,
}

/// Ranking composition functions.
pub struct RankingComposer;

impl RankingComposer {
    /// Combines criteria weights with per-criterion alternative priorities.
    ///
    /// # Algorithm
    /// score[a] = Σ_c w[c] × p_c[a], then a stable descending sort.
    /// Tied scores share the rank of the first of them and the next
    /// distinct score skips ahead (1, 2, 2, 4).
    ///
    /// # Errors
    /// `IncompleteData` when the criteria vector does not match the
    /// criteria names, a criterion has no vector, or a vector does not
    /// match the alternative count.
    pub fn compose_final_scores(
        criteria_priorities: &PriorityVector,
        alternative_priorities: &HashMap<String, PriorityVector>,
        criteria_names: &[String],
        alternative_names: &[String],
    ) -> Result<Vec<RankedAlternative>, AhpError> {
        let local = Self::local_vectors(
            criteria_priorities,
            alternative_priorities,
            criteria_names,
            alternative_names,
        )?;

        let mut scored: Vec<(String, f64)> = alternative_names
            .iter()
            .enumerate()
            .map(|(a, name)| {
                let score = criteria_priorities
                    .iter()
                    .zip(&local)
                    .map(|(weight, vector)| weight * vector.as_slice()[a])
                    .sum();
                (name.clone(), score)
            })
            .collect();

        // sort_by is stable, so ties keep input order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let ranks = competition_ranks(scored.iter().map(|(_, score)| *score));
        Ok(scored
            .into_iter()
            .zip(ranks)
            .map(|((name, score), rank)| RankedAlternative { name, score, rank })
            .collect())
    }

    /// Ranks criteria by weight, returning them in their original order.
    pub fn rank_criteria(
        criteria_priorities: &PriorityVector,
        criteria_names: &[String],
    ) -> Result<Vec<RankedCriterion>, AhpError> {
        if criteria_priorities.len() != criteria_names.len() {
            return Err(AhpError::incomplete(format!(
                "{} criteria weights for {} criteria",
                criteria_priorities.len(),
                criteria_names.len()
            )));
        }

        let mut order: Vec<usize> = (0..criteria_names.len()).collect();
        order.sort_by(|&a, &b| {
            let wa = criteria_priorities.as_slice()[a];
            let wb = criteria_priorities.as_slice()[b];
            wb.total_cmp(&wa)
        });

        let ranks = competition_ranks(order.iter().map(|&i| criteria_priorities.as_slice()[i]));
        let mut rank_by_index = vec![0; criteria_names.len()];
        for (&index, rank) in order.iter().zip(ranks) {
            rank_by_index[index] = rank;
        }

        Ok(criteria_names
            .iter()
            .zip(criteria_priorities.iter())
            .zip(rank_by_index)
            .map(|((name, weight), rank)| RankedCriterion {
                name: name.clone(),
                weight,
                rank,
            })
            .collect())
    }

    /// Gap between each ranked alternative and the one below it.
    ///
    /// # Edge Cases
    /// - Fewer than two alternatives: empty
    /// - Zero score at the upper position: gap of 0
    pub fn score_gaps(ranking: &[RankedAlternative]) -> Vec<ScoreGap> {
        ranking
            .windows(2)
            .map(|pair| {
                let (current, next) = (&pair[0], &pair[1]);
                let gap_percent = if current.score != 0.0 {
                    (current.score - next.score) / current.score * 100.0
                } else {
                    0.0
                };
                ScoreGap {
                    from: current.name.clone(),
                    to: next.name.clone(),
                    gap_percent,
                }
            })
            .collect()
    }

    /// Per-criterion contributions for every alternative, in input order.
    pub fn breakdown(
        criteria_priorities: &PriorityVector,
        alternative_priorities: &HashMap<String, PriorityVector>,
        criteria_names: &[String],
        alternative_names: &[String],
    ) -> Result<Vec<WeightedBreakdown>, AhpError> {
        let local = Self::local_vectors(
            criteria_priorities,
            alternative_priorities,
            criteria_names,
            alternative_names,
        )?;

        Ok(alternative_names
            .iter()
            .enumerate()
            .map(|(a, alternative)| {
                let contributions: Vec<CriterionContribution> = criteria_names
                    .iter()
                    .zip(criteria_priorities.iter())
                    .zip(&local)
                    .map(|((criterion, weight), vector)| {
                        let local_priority = vector.as_slice()[a];
                        CriterionContribution {
                            criterion: criterion.clone(),
                            local_priority,
                            weighted: weight * local_priority,
                        }
                    })
                    .collect();
                let total = contributions.iter().map(|c| c.weighted).sum();
                WeightedBreakdown {
                    alternative: alternative.clone(),
                    contributions,
                    total,
                }
            })
            .collect())
    }

    /// Resolves one vector per criterion, in criteria order.
    fn local_vectors<'a>(
        criteria_priorities: &PriorityVector,
        alternative_priorities: &'a HashMap<String, PriorityVector>,
        criteria_names: &[String],
        alternative_names: &[String],
    ) -> Result<Vec<&'a PriorityVector>, AhpError> {
        if criteria_priorities.len() != criteria_names.len() {
            return Err(AhpError::incomplete(format!(
                "{} criteria weights for {} criteria",
                criteria_priorities.len(),
                criteria_names.len()
            )));
        }

        criteria_names
            .iter()
            .map(|criterion| {
                let vector = alternative_priorities.get(criterion).ok_or_else(|| {
                    AhpError::incomplete(format!(
                        "no alternative priorities for criterion '{}'",
                        criterion
                    ))
                })?;
                if vector.len() != alternative_names.len() {
                    return Err(AhpError::incomplete(format!(
                        "criterion '{}' has {} priorities for {} alternatives",
                        criterion,
                        vector.len(),
                        alternative_names.len()
                    )));
                }
                Ok(vector)
            })
            .collect()
    }
}

/// Competition ranks for scores already sorted in descending order.
fn competition_ranks(sorted_scores: impl Iterator<Item = f64>) -> Vec<usize> {
    let mut ranks = Vec::new();
    let mut group: Option<(f64, usize)> = None;

    for (position, score) in sorted_scores.enumerate() {
        let rank = match group {
            Some((leader, rank)) if (leader - score).abs() <= SCORE_TIE_TOLERANCE => rank,
            _ => {
                group = Some((score, position + 1));
                position + 1
            }
        };
        ranks.push(rank);
    }

    ranks
}
