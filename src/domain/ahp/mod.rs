//! AHP Module - Pairwise comparison priority engine.
//!
//! Turns pairwise judgments into priority weights, checks how consistent
//! the judgments are, and aggregates local priorities into a ranking.
//!
//! # Components
//!
//! - `ComparisonMatrix` - Reciprocal judgment matrix with pure resize
//! - `PriorityEngine` - Column-normalization priorities and lambda max
//! - `ConsistencyChecker` - CI, CR and classification against the random index
//! - `Hierarchy` - Goal, criteria, alternatives and their matrices
//! - `RankingComposer` - Weighted scores, competition ranking, gaps, breakdown
//! - `AhpAnalyzer` - Runs all of the above over a hierarchy
//!
//! # Design Philosophy
//!
//! Everything here is synchronous and free of I/O. Hierarchies are plain
//! owned values; callers that share them provide their own locking.

mod analysis;
mod comparison_matrix;
mod consistency;
mod errors;
mod hierarchy;
mod priority_engine;
mod random_index;
mod ranking;
pub mod reference;

pub use analysis::{
    AhpAnalyzer, AnalysisReport, CriterionPriorities, MatrixConsistency, CRITERIA_MATRIX_LABEL,
};
pub use comparison_matrix::{ComparisonMatrix, NEUTRAL_JUDGMENT};
pub use consistency::{
    ConsistencyChecker, ConsistencyResult, ConsistencyStatus, ConsistencyThresholds,
    ACCEPTABLE_THRESHOLD, CONSISTENT_THRESHOLD,
};
pub use errors::AhpError;
pub use hierarchy::{
    EntityKind, Hierarchy, HierarchyLimits, HierarchySummary, MatrixRef, ValidationResult,
    MAX_ENTITIES, MIN_ENTITIES,
};
pub use priority_engine::{PriorityEngine, PriorityVector, PRIORITY_SUM_TOLERANCE};
pub use random_index::{RandomIndexPolicy, RandomIndexTable, MAX_TABLE_ORDER, RANDOM_INDEX_VALUES};
pub use ranking::{
    CriterionContribution, RankedAlternative, RankedCriterion, RankingComposer, ScoreGap,
    WeightedBreakdown, SCORE_TIE_TOLERANCE,
};
