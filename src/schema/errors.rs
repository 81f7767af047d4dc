//! Validation error types
//!
//! A `ValidationError` collects every rule a payload breaks, so a client
//! learns about all bad fields in one round trip.

use std::fmt;

use thiserror::Error;

/// Which data-model rule a field broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required field absent, null or empty
    Required,
    /// Longer than the field's maximum length
    TooLong,
    /// Value outside the field's enumerated set
    NotInEnum,
    /// Value does not match the field's pattern
    PatternMismatch,
}

/// One broken rule on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Serialized field name
    pub field: &'static str,
    pub kind: ViolationKind,
    /// Client-facing message
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A payload that breaks one or more data-model rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Messages joined in field declaration order
    pub fn message(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether `field` broke a rule of the given kind
    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_joins_violations() {
        let err = ValidationError::new(vec![
            FieldViolation::new("name", ViolationKind::Required, "Please add a name"),
            FieldViolation::new("portfolio", ViolationKind::Required, "Please add a portfolio"),
        ]);
        assert_eq!(err.to_string(), "Please add a name, Please add a portfolio");
        assert!(err.has("portfolio", ViolationKind::Required));
        assert!(!err.has("portfolio", ViolationKind::TooLong));
    }
}
