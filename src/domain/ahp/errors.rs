//! AHP-specific error types.

use thiserror::Error;

use super::EntityKind;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the priority engine and the hierarchy operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// Matrix is empty, non-square, or holds non-positive entries.
    #[error("Invalid comparison matrix: {0}")]
    InvalidMatrix(String),

    /// A zero priority makes lambda max undefined.
    #[error("Priority at index {index} is zero, lambda max is undefined")]
    DivisionByZero { index: usize },

    /// Matrix order is beyond the random index table.
    #[error("Matrix order {order} exceeds the random index table (maximum {max})")]
    UnsupportedSize { order: usize, max: usize },

    #[error("{kind} name cannot be empty")]
    EmptyName { kind: EntityKind },

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: EntityKind, name: String },

    #[error("{kind} index {index} is out of bounds ({count} present)")]
    InvalidIndex {
        kind: EntityKind,
        index: usize,
        count: usize,
    },

    #[error("At least {min} {} are required", .kind.plural())]
    MinimumCardinality { kind: EntityKind, min: usize },

    #[error("At most {max} {} are allowed", .kind.plural())]
    MaximumCardinality { kind: EntityKind, max: usize },

    /// Rejected write to a comparison matrix cell.
    #[error("Invalid judgment at ({row}, {col}): {reason}")]
    InvalidJudgment {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("Unknown criterion '{0}'")]
    UnknownCriterion(String),

    /// Ranking composition is missing a required per-criterion vector.
    #[error("Incomplete data: {0}")]
    IncompleteData(String),
}

impl AhpError {
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        AhpError::InvalidMatrix(reason.into())
    }

    pub fn invalid_judgment(row: usize, col: usize, reason: impl Into<String>) -> Self {
        AhpError::InvalidJudgment {
            row,
            col,
            reason: reason.into(),
        }
    }

    pub fn incomplete(reason: impl Into<String>) -> Self {
        AhpError::IncompleteData(reason.into())
    }

    /// Structural errors come from user input; numeric ones signal a broken precondition.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AhpError::EmptyName { .. }
                | AhpError::DuplicateName { .. }
                | AhpError::InvalidIndex { .. }
                | AhpError::MinimumCardinality { .. }
                | AhpError::MaximumCardinality { .. }
                | AhpError::InvalidJudgment { .. }
                | AhpError::UnknownCriterion(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::InvalidMatrix(_) => ErrorCode::InvalidMatrix,
            AhpError::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            AhpError::UnsupportedSize { .. } => ErrorCode::UnsupportedSize,
            AhpError::EmptyName { .. } => ErrorCode::EmptyName,
            AhpError::DuplicateName { .. } => ErrorCode::DuplicateName,
            AhpError::InvalidIndex { .. } => ErrorCode::InvalidIndex,
            AhpError::MinimumCardinality { .. } => ErrorCode::MinimumCardinality,
            AhpError::MaximumCardinality { .. } => ErrorCode::MaximumCardinality,
            AhpError::InvalidJudgment { .. } => ErrorCode::InvalidJudgment,
            AhpError::UnknownCriterion(_) => ErrorCode::CriterionNotFound,
            AhpError::IncompleteData(_) => ErrorCode::IncompleteData,
        }
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
