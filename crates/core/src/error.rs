//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Ledger arithmetic never fails: malformed numbers are coerced. These errors
/// only arise when converting outside input (field names coming from the
/// presentation layer) into domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an attempt to write a derived field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field name did not match any known field.
    #[error("unknown {kind} field: {name}")]
    UnknownField { kind: &'static str, name: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_field(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownField {
            kind,
            name: name.into(),
        }
    }
}
