//! Saaty random consistency index table.

use serde::{Deserialize, Serialize};

use super::AhpError;

/// Largest matrix order covered by the table.
pub const MAX_TABLE_ORDER: usize = 15;

/// RI(n) for n = 1..=15.
pub const RANDOM_INDEX_VALUES: [f64; MAX_TABLE_ORDER] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// What to do when a matrix is larger than the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomIndexPolicy {
    /// Fail with `UnsupportedSize`.
    #[default]
    Reject,
    /// Use RI = 0, which forces CR = 0.
    TreatAsZero,
}

/// Fixed lookup from matrix order to RI.
pub struct RandomIndexTable;

impl RandomIndexTable {
    /// Returns RI(n), or `None` when `order` is 0 or beyond the table.
    pub fn lookup(order: usize) -> Option<f64> {
        if order == 0 {
            return None;
        }
        RANDOM_INDEX_VALUES.get(order - 1).copied()
    }

    /// Looks up RI(n), resolving out-of-table orders with `policy`.
    pub fn lookup_with_policy(order: usize, policy: RandomIndexPolicy) -> Result<f64, AhpError> {
        if order == 0 {
            return Err(AhpError::invalid_matrix("matrix order must be at least 1"));
        }

        match (Self::lookup(order), policy) {
            (Some(ri), _) => Ok(ri),
            (None, RandomIndexPolicy::TreatAsZero) => Ok(0.0),
            (None, RandomIndexPolicy::Reject) => Err(AhpError::UnsupportedSize {
                order,
                max: MAX_TABLE_ORDER,
            }),
        }
    }
}
