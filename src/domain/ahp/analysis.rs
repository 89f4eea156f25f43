//! AHP Analyzer - Runs the full pipeline over a hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, warn};

use super::{
    AhpError, ComparisonMatrix, ConsistencyChecker, ConsistencyResult, ConsistencyStatus,
    Hierarchy, HierarchySummary, PriorityEngine, PriorityVector, RankedAlternative,
    RankedCriterion, RankingComposer, ScoreGap, WeightedBreakdown,
};
use crate::domain::foundation::{AnalysisId, Timestamp};

/// Label of the criteria matrix in consistency listings.
pub const CRITERIA_MATRIX_LABEL: &str = "criteria";

/// Consistency of one matrix, labelled by what it compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConsistency {
    pub label: String,
    pub result: ConsistencyResult,
}

/// Local alternative priorities under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionPriorities {
    pub criterion: String,
    pub priorities: PriorityVector,
}

/// Immutable snapshot of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub generated_at: Timestamp,
    pub goal: String,
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    pub criteria_weights: PriorityVector,
    pub criteria_ranking: Vec<RankedCriterion>,
    /// In criteria order.
    pub alternative_priorities: Vec<CriterionPriorities>,
    /// Criteria matrix first, then one entry per criterion in order.
    pub consistency: Vec<MatrixConsistency>,
    pub ranking: Vec<RankedAlternative>,
    pub score_gaps: Vec<ScoreGap>,
    pub breakdown: Vec<WeightedBreakdown>,
    pub summary: HierarchySummary,
}

impl AnalysisReport {
    pub fn best_alternative(&self) -> Option<&RankedAlternative> {
        self.ranking.first()
    }

    /// Labels of matrices classified as inconsistent.
    pub fn inconsistent_matrices(&self) -> Vec<&str> {
        self.consistency
            .iter()
            .filter(|m| !m.result.status.is_usable())
            .map(|m| m.label.as_str())
            .collect()
    }

    pub fn is_fully_consistent(&self) -> bool {
        self.consistency
            .iter()
            .all(|m| m.result.status == ConsistencyStatus::Consistent)
    }

    pub fn priorities_for(&self, criterion: &str) -> Option<&PriorityVector> {
        self.alternative_priorities
            .iter()
            .find(|p| p.criterion == criterion)
            .map(|p| &p.priorities)
    }
}

/// Derives every priority vector, checks every matrix and composes the ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AhpAnalyzer {
    checker: ConsistencyChecker,
}

impl AhpAnalyzer {
    pub fn new(checker: ConsistencyChecker) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &ConsistencyChecker {
        &self.checker
    }

    /// Runs the analysis.
    ///
    /// Structural validation is the caller's job; this only requires that
    /// every matrix is well-formed. Inconsistent matrices do not stop the
    /// run, they are reported in the result.
    ///
    /// # Errors
    /// Any numeric failure (`InvalidMatrix`, `DivisionByZero`,
    /// `UnsupportedSize`) is propagated unchanged.
    pub fn analyze(&self, hierarchy: &Hierarchy) -> Result<AnalysisReport, AhpError> {
        let (criteria_weights, criteria_consistency) =
            self.evaluate_matrix(CRITERIA_MATRIX_LABEL, hierarchy.criteria_matrix())?;

        let mut consistency = vec![MatrixConsistency {
            label: CRITERIA_MATRIX_LABEL.to_string(),
            result: criteria_consistency,
        }];
        let mut alternative_priorities = Vec::with_capacity(hierarchy.criteria().len());
        let mut by_criterion = HashMap::with_capacity(hierarchy.criteria().len());

        for criterion in hierarchy.criteria() {
            let matrix = hierarchy.alternative_matrix(criterion).ok_or_else(|| {
                let reason = format!("criterion '{}' has no alternative matrix", criterion);
                AhpError::incomplete(reason)
            })?;
            let (priorities, result) = self.evaluate_matrix(criterion, matrix)?;

            consistency.push(MatrixConsistency {
                label: criterion.clone(),
                result,
            });
            by_criterion.insert(criterion.clone(), priorities.clone());
            alternative_priorities.push(CriterionPriorities {
                criterion: criterion.clone(),
                priorities,
            });
        }

        let ranking = RankingComposer::compose_final_scores(
            &criteria_weights,
            &by_criterion,
            hierarchy.criteria(),
            hierarchy.alternatives(),
        )?;
        let breakdown = RankingComposer::breakdown(
            &criteria_weights,
            &by_criterion,
            hierarchy.criteria(),
            hierarchy.alternatives(),
        )?;
        let criteria_ranking =
            RankingComposer::rank_criteria(&criteria_weights, hierarchy.criteria())?;
        let score_gaps = RankingComposer::score_gaps(&ranking);

        if let Some(best) = ranking.first() {
            debug!(alternative = %best.name, score = best.score, "Ranking composed");
        }

        Ok(AnalysisReport {
            analysis_id: AnalysisId::new(),
            generated_at: Timestamp::now(),
            goal: hierarchy.goal().to_string(),
            criteria: hierarchy.criteria().to_vec(),
            alternatives: hierarchy.alternatives().to_vec(),
            criteria_weights,
            criteria_ranking,
            alternative_priorities,
            consistency,
            ranking,
            score_gaps,
            breakdown,
            summary: hierarchy.summary(),
        })
    }

    fn evaluate_matrix(
        &self,
        label: &str,
        matrix: &ComparisonMatrix,
    ) -> Result<(PriorityVector, ConsistencyResult), AhpError> {
        let outcome = PriorityEngine::derive_priorities(matrix)
            .and_then(|priorities| {
                let result = self.checker.evaluate(matrix, &priorities)?;
                Ok((priorities, result))
            });

        match outcome {
            Ok((priorities, result)) => {
                debug!(
                    matrix = label,
                    order = result.order,
                    lambda_max = result.lambda_max,
                    cr = result.consistency_ratio,
                    status = %result.status,
                    "Matrix evaluated"
                );
                if result.status == ConsistencyStatus::Inconsistent {
                    warn!(
                        matrix = label,
                        cr = result.consistency_ratio,
                        "Judgments are inconsistent"
                    );
                }
                Ok((priorities, result))
            }
            Err(err @ AhpError::DivisionByZero { .. }) => {
                error!(matrix = label, error = %err, "Lambda max is undefined");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::reference::{
        reference_hierarchy, EXPECTED_CRITERIA_WEIGHTS, EXPECTED_RANKING,
    };
    use crate::domain::ahp::{MatrixRef, RandomIndexPolicy};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    fn reference_report() -> AnalysisReport {
        AhpAnalyzer::default().analyze(&reference_hierarchy().unwrap()).unwrap()
    }

    #[test]
    fn reference_criteria_weights_match_published_values() {
        let report = reference_report();
        for (actual, expected) in report.criteria_weights.iter().zip(EXPECTED_CRITERIA_WEIGHTS) {
            assert_close(actual, expected, 1e-6);
        }
    }

    #[test]
    fn reference_ranking_matches_published_order_and_ties() {
        let report = reference_report();

        assert_eq!(report.ranking.len(), EXPECTED_RANKING.len());
        for (ranked, (name, score, rank)) in report.ranking.iter().zip(EXPECTED_RANKING) {
            assert_eq!(ranked.name, name);
            assert_eq!(ranked.rank, rank);
            assert_close(ranked.score, score, 1e-6);
        }
        assert_eq!(report.best_alternative().unwrap().name, "Dosen E");
    }

    #[test]
    fn reference_scores_sum_to_one() {
        let total: f64 = reference_report().ranking.iter().map(|r| r.score).sum();
        assert_close(total, 1.0, 1e-9);
    }

    #[test]
    fn consistency_lists_criteria_first_then_each_criterion() {
        let report = reference_report();
        let labels: Vec<&str> = report.consistency.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "criteria",
                "Pendidikan",
                "Penelitian",
                "Pengabdian Masyarakat",
                "Kegiatan Penunjang"
            ]
        );
        let first = &report.consistency[0].result;
        assert_close(first.consistency_ratio, 0.0158232, 1e-6);
    }

    #[test]
    fn reference_local_priorities() {
        let report = reference_report();
        let research = report.priorities_for("Penelitian").unwrap();
        assert_close(research.as_slice()[0], 0.280525310, 1e-6);
        assert_close(research.as_slice()[3], 0.050937153, 1e-6);

        let support = report.priorities_for("Kegiatan Penunjang").unwrap();
        assert_close(support.as_slice()[4], 0.037743204, 1e-6);
    }

    #[test]
    fn supplementary_views_are_populated() {
        let report = reference_report();

        assert_eq!(report.criteria_ranking[0].rank, 1);
        assert_eq!(report.criteria_ranking[1].rank, 2);
        assert_eq!(report.criteria_ranking[2].rank, 2);
        assert_eq!(report.criteria_ranking[3].rank, 4);

        assert_eq!(report.score_gaps.len(), 4);
        assert_eq!(report.score_gaps[1].gap_percent, 0.0);

        assert_eq!(report.breakdown.len(), 5);
        assert_eq!(report.summary.total_matrices, 5);
        assert_eq!(report.summary.total_comparisons, 46);
    }

    #[test]
    fn neutral_hierarchy_yields_uniform_scores() {
        let h = Hierarchy::new(
            "g",
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into(), "z".into(), "w".into()],
        )
        .unwrap();
        let report = AhpAnalyzer::default().analyze(&h).unwrap();

        for ranked in &report.ranking {
            assert_close(ranked.score, 0.25, 1e-12);
            assert_eq!(ranked.rank, 1);
        }
        assert!(report.is_fully_consistent());
        assert!(report.inconsistent_matrices().is_empty());
    }

    #[test]
    fn inconsistent_matrix_is_reported_not_fatal() {
        let mut h = Hierarchy::new(
            "g",
            vec!["a".into(), "b".into(), "c".into()],
            vec!["x".into(), "y".into()],
        )
        .unwrap();
        h.set_matrix_entry(&MatrixRef::Criteria, 0, 1, 5.0).unwrap();
        h.set_matrix_entry(&MatrixRef::Criteria, 1, 2, 5.0).unwrap();
        h.set_matrix_entry(&MatrixRef::Criteria, 2, 0, 7.0).unwrap();

        let report = AhpAnalyzer::default().analyze(&h).unwrap();
        assert_eq!(report.inconsistent_matrices(), vec!["criteria"]);
        assert!(!report.is_fully_consistent());
    }

    #[test]
    fn oversized_hierarchy_fails_under_reject_policy() {
        let criteria: Vec<String> = (0..16).map(|i| format!("c{}", i)).collect();
        let mut matrices = std::collections::BTreeMap::new();
        for c in &criteria {
            matrices.insert(c.clone(), ComparisonMatrix::neutral(2));
        }
        let h = Hierarchy::from_parts(
            "g".into(),
            criteria,
            vec!["x".into(), "y".into()],
            ComparisonMatrix::neutral(16),
            matrices,
        )
        .unwrap();

        let result = AhpAnalyzer::default().analyze(&h);
        let too_large = AhpError::UnsupportedSize { order: 16, max: 15 };
        assert_eq!(result, Err(too_large));

        let lenient = AhpAnalyzer::new(ConsistencyChecker::new(
            Default::default(),
            RandomIndexPolicy::TreatAsZero,
        ));
        assert!(lenient.analyze(&h).is_ok());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = reference_report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["goal"], "Menentukan Dosen Terbaik STMIK Primakara");
        assert_eq!(json["ranking"][0]["name"], "Dosen E");
        assert_eq!(json["consistency"][0]["result"]["status"], "Consistent");
    }
}
