//! Priority Engine - Column-normalization priorities and lambda max.

use serde::{Deserialize, Serialize};

use super::AhpError;

/// Tolerance for "sums to one" checks on priority vectors.
pub const PRIORITY_SUM_TOLERANCE: f64 = 1e-9;

/// Normalized weights derived from a comparison matrix, one per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityVector(Vec<f64>);

impl PriorityVector {
    /// Wraps weights produced elsewhere (imports, tests).
    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when the weights sum to 1 within [`PRIORITY_SUM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= PRIORITY_SUM_TOLERANCE
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

/// Priority derivation functions.
///
/// The approximation is the arithmetic one: normalize every column by its
/// sum, then average each row. Reference outputs depend on this exact
/// method, so it must not be swapped for the geometric mean of rows.
pub struct PriorityEngine;

impl PriorityEngine {
    /// Divides every entry by its column sum.
    ///
    /// # Errors
    /// `InvalidMatrix` when the matrix is empty, non-square, or holds an
    /// entry that is not a positive finite number.
    pub fn normalize<M>(matrix: &M) -> Result<Vec<Vec<f64>>, AhpError>
    where
        M: AsRef<[Vec<f64>]> + ?Sized,
    {
        let rows = matrix.as_ref();
        let n = Self::check_shape(rows)?;

        let mut column_sums = vec![0.0; n];
        for row in rows {
            for (j, value) in row.iter().enumerate() {
                column_sums[j] += value;
            }
        }

        Ok(rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&column_sums)
                    .map(|(value, sum)| value / sum)
                    .collect()
            })
            .collect())
    }

    /// Derives the priority vector: mean of each normalized row.
    ///
    /// # Edge Cases
    /// - 1×1 matrix: returns `[1.0]`
    /// - All-ones matrix: returns `1/n` for every entry
    pub fn derive_priorities<M>(matrix: &M) -> Result<PriorityVector, AhpError>
    where
        M: AsRef<[Vec<f64>]> + ?Sized,
    {
        let normalized = Self::normalize(matrix)?;
        let n = normalized.len() as f64;

        let priorities = normalized
            .iter()
            .map(|row| row.iter().sum::<f64>() / n)
            .collect();

        Ok(PriorityVector(priorities))
    }

    /// Approximates the principal eigenvalue.
    ///
    /// # Algorithm
    /// λmax = mean over i of (Σ_j m[i][j] × p[j]) / p[i]
    ///
    /// # Errors
    /// - `InvalidMatrix` on a malformed matrix or a vector of the wrong length
    /// - `DivisionByZero` if any priority is exactly zero
    pub fn compute_lambda_max<M>(matrix: &M, priorities: &PriorityVector) -> Result<f64, AhpError>
    where
        M: AsRef<[Vec<f64>]> + ?Sized,
    {
        let rows = matrix.as_ref();
        let n = Self::check_shape(rows)?;

        if priorities.len() != n {
            return Err(AhpError::invalid_matrix(format!(
                "priority vector has {} entries for a matrix of order {}",
                priorities.len(),
                n
            )));
        }
        if let Some(index) = priorities.iter().position(|p| p == 0.0) {
            return Err(AhpError::DivisionByZero { index });
        }

        let total: f64 = rows
            .iter()
            .zip(priorities.iter())
            .map(|(row, own)| {
                let weighted_sum: f64 = row
                    .iter()
                    .zip(priorities.iter())
                    .map(|(value, p)| value * p)
                    .sum();
                weighted_sum / own
            })
            .sum();

        Ok(total / n as f64)
    }

    /// Returns the order of a well-formed matrix.
    fn check_shape(rows: &[Vec<f64>]) -> Result<usize, AhpError> {
        let n = rows.len();
        if n == 0 {
            return Err(AhpError::invalid_matrix("matrix is empty"));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AhpError::invalid_matrix(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite() || *v <= 0.0) {
                return Err(AhpError::invalid_matrix(format!(
                    "entry ({}, {}) must be a positive number",
                    i, j
                )));
            }
        }

        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::ComparisonMatrix;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    fn reference_criteria_rows() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 3.0, 3.0, 5.0],
            vec![0.333, 1.0, 1.0, 3.0],
            vec![0.333, 1.0, 1.0, 3.0],
            vec![0.2, 0.333, 0.333, 1.0],
        ]
    }

    #[test]
    fn derive_priorities_empty_matrix_fails() {
        let rows: Vec<Vec<f64>> = vec![];
        let result = PriorityEngine::derive_priorities(&rows);
        assert!(matches!(result, Err(AhpError::InvalidMatrix(_))));
    }

    #[test]
    fn derive_priorities_non_square_matrix_fails() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![0.5, 1.0, 2.0]];
        let result = PriorityEngine::derive_priorities(&rows);
        assert!(matches!(result, Err(AhpError::InvalidMatrix(_))));
    }

    #[test]
    fn derive_priorities_single_entry() {
        let priorities = PriorityEngine::derive_priorities(&vec![vec![1.0]]).unwrap();
        assert_eq!(priorities.as_slice(), &[1.0]);
    }

    #[test]
    fn derive_priorities_all_ones_is_uniform() {
        for n in 1..=15 {
            let matrix = ComparisonMatrix::neutral(n);
            let priorities = PriorityEngine::derive_priorities(&matrix).unwrap();

            assert_eq!(priorities.len(), n);
            for p in priorities.iter() {
                assert_close(p, 1.0 / n as f64, 1e-12);
            }
        }
    }

    #[test]
    fn derive_priorities_reference_criteria_matrix() {
        let priorities = PriorityEngine::derive_priorities(&reference_criteria_rows()).unwrap();

        assert_close(priorities.as_slice()[0], 0.519410666, 1e-6);
        assert_close(priorities.as_slice()[1], 0.200870008, 1e-6);
        assert_close(priorities.as_slice()[2], 0.200870008, 1e-6);
        assert_close(priorities.as_slice()[3], 0.078849319, 1e-6);
        assert!(priorities.is_normalized());
    }

    #[test]
    fn normalize_columns_sum_to_one() {
        let normalized = PriorityEngine::normalize(&reference_criteria_rows()).unwrap();
        for j in 0..4 {
            let column_sum: f64 = normalized.iter().map(|row| row[j]).sum();
            assert_close(column_sum, 1.0, 1e-12);
        }
    }

    #[test]
    fn lambda_max_of_consistent_matrix_equals_order() {
        // Perfectly consistent: m[i][j] = w[i] / w[j] with w = (4, 2, 1)
        let rows = vec![
            vec![1.0, 2.0, 4.0],
            vec![0.5, 1.0, 2.0],
            vec![0.25, 0.5, 1.0],
        ];
        let priorities = PriorityEngine::derive_priorities(&rows).unwrap();
        let lambda = PriorityEngine::compute_lambda_max(&rows, &priorities).unwrap();

        assert_close(lambda, 3.0, 1e-12);
        assert_close(priorities.as_slice()[0], 4.0 / 7.0, 1e-12);
    }

    #[test]
    fn lambda_max_reference_criteria_matrix() {
        let rows = reference_criteria_rows();
        let priorities = PriorityEngine::derive_priorities(&rows).unwrap();
        let lambda = PriorityEngine::compute_lambda_max(&rows, &priorities).unwrap();

        assert_close(lambda, 4.042722711596, 1e-9);
    }

    #[test]
    fn lambda_max_zero_priority_fails() {
        let rows = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let priorities = PriorityVector::from_weights(vec![1.0, 0.0]);

        let result = PriorityEngine::compute_lambda_max(&rows, &priorities);
        assert_eq!(result, Err(AhpError::DivisionByZero { index: 1 }));
    }

    #[test]
    fn lambda_max_length_mismatch_fails() {
        let rows = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let priorities = PriorityVector::from_weights(vec![1.0]);

        let result = PriorityEngine::compute_lambda_max(&rows, &priorities);
        assert!(matches!(result, Err(AhpError::InvalidMatrix(_))));
    }

    #[test]
    fn priority_vector_serializes_as_plain_array() {
        let v = PriorityVector::from_weights(vec![0.25, 0.75]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.25,0.75]");
    }
}
