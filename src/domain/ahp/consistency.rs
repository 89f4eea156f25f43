//! Consistency Checker - CI, CR and classification of a comparison matrix.

use serde::{Deserialize, Serialize};

use super::{AhpError, PriorityEngine, PriorityVector, RandomIndexPolicy, RandomIndexTable};

/// CR below this is "Consistent".
pub const CONSISTENT_THRESHOLD: f64 = 0.10;

/// CR below this (and at least [`CONSISTENT_THRESHOLD`]) is "Acceptable".
pub const ACCEPTABLE_THRESHOLD: f64 = 0.20;

/// Discrete classification of a consistency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsistencyStatus {
    Consistent,
    Acceptable,
    Inconsistent,
}

impl ConsistencyStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            ConsistencyStatus::Consistent => "Consistent",
            ConsistencyStatus::Acceptable => "Acceptable",
            ConsistencyStatus::Inconsistent => "Inconsistent",
        }
    }

    /// True for every status except `Inconsistent`.
    pub fn is_usable(&self) -> bool {
        !matches!(self, ConsistencyStatus::Inconsistent)
    }
}

impl std::fmt::Display for ConsistencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// CR cut-offs between the three classifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyThresholds {
    pub consistent: f64,
    pub acceptable: f64,
}

impl ConsistencyThresholds {
    pub fn classify(&self, consistency_ratio: f64) -> ConsistencyStatus {
        if consistency_ratio < self.consistent {
            ConsistencyStatus::Consistent
        } else if consistency_ratio < self.acceptable {
            ConsistencyStatus::Acceptable
        } else {
            ConsistencyStatus::Inconsistent
        }
    }
}

impl Default for ConsistencyThresholds {
    fn default() -> Self {
        Self {
            consistent: CONSISTENT_THRESHOLD,
            acceptable: ACCEPTABLE_THRESHOLD,
        }
    }
}

/// Result of evaluating one matrix against its priority vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub order: usize,
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    pub consistency_ratio: f64,
    pub status: ConsistencyStatus,
}

/// Evaluates judgment consistency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConsistencyChecker {
    thresholds: ConsistencyThresholds,
    policy: RandomIndexPolicy,
}

impl ConsistencyChecker {
    pub fn new(thresholds: ConsistencyThresholds, policy: RandomIndexPolicy) -> Self {
        Self { thresholds, policy }
    }

    pub fn thresholds(&self) -> ConsistencyThresholds {
        self.thresholds
    }

    pub fn policy(&self) -> RandomIndexPolicy {
        self.policy
    }

    /// Computes λmax, CI, RI and CR for `matrix` and classifies the result.
    ///
    /// # Edge Cases
    /// - n = 1: CI = 0 and CR = 0
    /// - n ≤ 2: RI = 0 so CR = 0
    /// - n > 15: `UnsupportedSize` or RI = 0, depending on the policy
    pub fn evaluate<M>(
        &self,
        matrix: &M,
        priorities: &PriorityVector,
    ) -> Result<ConsistencyResult, AhpError>
    where
        M: AsRef<[Vec<f64>]> + ?Sized,
    {
        let order = matrix.as_ref().len();
        let lambda_max = PriorityEngine::compute_lambda_max(matrix, priorities)?;

        let consistency_index = if order > 1 {
            (lambda_max - order as f64) / (order as f64 - 1.0)
        } else {
            0.0
        };

        let random_index = RandomIndexTable::lookup_with_policy(order, self.policy)?;
        let consistency_ratio = if random_index != 0.0 {
            consistency_index / random_index
        } else {
            0.0
        };

        Ok(ConsistencyResult {
            order,
            lambda_max,
            consistency_index,
            random_index,
            consistency_ratio,
            status: self.thresholds.classify(consistency_ratio),
        })
    }

    pub fn classify(&self, consistency_ratio: f64) -> ConsistencyStatus {
        self.thresholds.classify(consistency_ratio)
    }
}
