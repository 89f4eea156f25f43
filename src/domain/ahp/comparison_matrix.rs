//! Comparison Matrix - Reciprocal matrix of pairwise judgments.

use serde::{Deserialize, Serialize};

use super::AhpError;

/// Neutral judgment ("equally important").
pub const NEUTRAL_JUDGMENT: f64 = 1.0;

/// A square matrix of positive pairwise judgments with a unit diagonal.
///
/// The reciprocal invariant `m[j][i] == 1 / m[i][j]` is maintained by
/// [`ComparisonMatrix::set_judgment`], the only mutation path. Matrices
/// built from raw rows are checked for shape, positivity and the diagonal
/// but not for reciprocity; use [`ComparisonMatrix::is_reciprocal`] to
/// inspect imported data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ComparisonMatrix {
    rows: Vec<Vec<f64>>,
}

impl ComparisonMatrix {
    /// Creates an all-ones matrix of the given order.
    pub fn neutral(order: usize) -> Self {
        Self {
            rows: vec![vec![NEUTRAL_JUDGMENT; order]; order],
        }
    }

    /// Builds a matrix from rows, checking shape, entries and diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AhpError> {
        let order = rows.len();

        for (i, row) in rows.iter().enumerate() {
            if row.len() != order {
                return Err(AhpError::invalid_matrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    order
                )));
            }

            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(AhpError::invalid_matrix(format!(
                        "entry ({}, {}) must be a positive number, got {}",
                        i, j, value
                    )));
                }
            }

            if row[i] != NEUTRAL_JUDGMENT {
                return Err(AhpError::invalid_matrix(format!(
                    "diagonal entry ({}, {}) must be 1, got {}",
                    i, i, row[i]
                )));
            }
        }

        Ok(Self { rows })
    }

    /// Number of rows (and columns).
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the judgment at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Writes `value` at (row, col) and `1 / value` at (col, row).
    ///
    /// Nothing is written when the judgment is rejected.
    pub fn set_judgment(&mut self, row: usize, col: usize, value: f64) -> Result<(), AhpError> {
        let order = self.order();
        if row >= order || col >= order {
            return Err(AhpError::invalid_judgment(
                row,
                col,
                format!("index out of range for matrix of order {}", order),
            ));
        }
        if row == col {
            let reason = "diagonal is fixed at 1";
            return Err(AhpError::invalid_judgment(row, col, reason));
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(AhpError::invalid_judgment(
                row,
                col,
                format!("judgment must be a positive number, got {}", value),
            ));
        }
        let reciprocal = 1.0 / value;
        if !reciprocal.is_finite() || reciprocal <= 0.0 {
            return Err(AhpError::invalid_judgment(
                row,
                col,
                format!("reciprocal of {} is not a positive finite number", value),
            ));
        }

        self.rows[row][col] = value;
        self.rows[col][row] = reciprocal;
        Ok(())
    }

    /// Builds a matrix of order `new_size` from `self`.
    ///
    /// `mapping[k]` names the old index that becomes new index `k`, or
    /// `None` for a newly inserted entity. Cells between two carried-over
    /// entities keep their judgment; every other off-diagonal cell is
    /// neutral.
    pub fn resize(&self, new_size: usize, mapping: &[Option<usize>]) -> Result<Self, AhpError> {
        if mapping.len() != new_size {
            return Err(AhpError::invalid_matrix(format!(
                "resize mapping has {} entries, expected {}",
                mapping.len(),
                new_size
            )));
        }
        if let Some(bad) = mapping.iter().flatten().find(|&&old| old >= self.order()) {
            return Err(AhpError::invalid_matrix(format!(
                "resize mapping refers to index {} of a matrix of order {}",
                bad,
                self.order()
            )));
        }

        Ok(self.remap(mapping))
    }

    /// Grows the matrix by one neutral entity at the end.
    pub fn with_appended_entity(&self) -> Self {
        let mapping: Vec<Option<usize>> = (0..self.order())
            .map(Some)
            .chain(std::iter::once(None))
            .collect();
        self.remap(&mapping)
    }

    /// Drops the row and column at `index`.
    pub fn without_entity(&self, index: usize) -> Result<Self, AhpError> {
        if index >= self.order() {
            return Err(AhpError::invalid_matrix(format!(
                "cannot remove index {} from a matrix of order {}",
                index,
                self.order()
            )));
        }
        let mapping: Vec<Option<usize>> = (0..self.order())
            .filter(|&k| k != index)
            .map(Some)
            .collect();
        self.resize(mapping.len(), &mapping)
    }

    // Caller guarantees every `Some` index is in range.
    fn remap(&self, mapping: &[Option<usize>]) -> Self {
        let rows = mapping
            .iter()
            .enumerate()
            .map(|(i, &from_row)| {
                mapping
                    .iter()
                    .enumerate()
                    .map(|(j, &from_col)| match (from_row, from_col) {
                        _ if i == j => NEUTRAL_JUDGMENT,
                        (Some(a), Some(b)) => self.rows[a][b],
                        _ => NEUTRAL_JUDGMENT,
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Checks `m[j][i] * m[i][j] == 1` within `tolerance` for every pair.
    pub fn is_reciprocal(&self, tolerance: f64) -> bool {
        let order = self.order();
        (0..order).all(|i| {
            (i + 1..order).all(|j| (self.rows[i][j] * self.rows[j][i] - 1.0).abs() <= tolerance)
        })
    }
}

impl AsRef<[Vec<f64>]> for ComparisonMatrix {
    fn as_ref(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

impl TryFrom<Vec<Vec<f64>>> for ComparisonMatrix {
    type Error = AhpError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<ComparisonMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ComparisonMatrix) -> Self {
        matrix.rows
    }
}
