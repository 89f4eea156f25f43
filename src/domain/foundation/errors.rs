//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyName,
    DuplicateName,
    InvalidIndex,
    MinimumCardinality,
    MaximumCardinality,
    InvalidJudgment,

    // Numeric errors
    InvalidMatrix,
    DivisionByZero,
    UnsupportedSize,
    IncompleteData,

    // Not found errors
    HierarchyNotFound,
    CriterionNotFound,

    // Infrastructure errors
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyName => "EMPTY_NAME",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::InvalidIndex => "INVALID_INDEX",
            ErrorCode::MinimumCardinality => "MINIMUM_CARDINALITY",
            ErrorCode::MaximumCardinality => "MAXIMUM_CARDINALITY",
            ErrorCode::InvalidJudgment => "INVALID_JUDGMENT",
            ErrorCode::InvalidMatrix => "INVALID_MATRIX",
            ErrorCode::DivisionByZero => "DIVISION_BY_ZERO",
            ErrorCode::UnsupportedSize => "UNSUPPORTED_SIZE",
            ErrorCode::IncompleteData => "INCOMPLETE_DATA",
            ErrorCode::HierarchyNotFound => "HIERARCHY_NOT_FOUND",
            ErrorCode::CriterionNotFound => "CRITERION_NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let ValidationError::InvalidFormat { field, .. } = &err;
        let field = field.clone();
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("hierarchy_id", "not a uuid");
        assert_eq!(
            format!("{}", err),
            "Field 'hierarchy_id' has invalid format: not a uuid"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::HierarchyNotFound, "Hierarchy not found");
        assert_eq!(
            format!("{}", err),
            "[HIERARCHY_NOT_FOUND] Hierarchy not found"
        );
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::InvalidMatrix, "Matrix is not square")
            .with_detail("rows", "3")
            .with_detail("columns", "4");

        assert_eq!(err.details.get("rows"), Some(&"3".to_string()));
        assert_eq!(err.details.get("columns"), Some(&"4".to_string()));
    }

    #[test]
    fn validation_error_converts_to_domain_error_with_field() {
        let err: DomainError = ValidationError::invalid_format("id", "not a uuid").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"id".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(ErrorCode::DivisionByZero.to_string(), "DIVISION_BY_ZERO");
        assert_eq!(ErrorCode::UnsupportedSize.to_string(), "UNSUPPORTED_SIZE");
    }
}
