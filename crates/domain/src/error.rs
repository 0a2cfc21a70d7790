//! Unified error types for the domain layer
//!
//! Validation failures of user input are NOT errors here: they are values
//! (`StepValidation`) returned by the step validator. `DomainError` covers
//! broken invariants such as a malformed step plan or a draft that cannot be
//! turned into a create payload.

use thiserror::Error;

use crate::media::MediaSlot;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A step plan does not satisfy the wizard's structural rules
    #[error("Invalid step plan: {0}")]
    InvalidStepPlan(String),

    /// A media slot still holds a transient file where an identifier is required
    #[error("Media slot '{slot}' has not been resolved to an uploaded identifier")]
    UnresolvedMedia { slot: MediaSlot },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if title.is_empty() {
    ///     return Err(DomainError::validation("Series title cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid step plan error
    pub fn invalid_step_plan(msg: impl Into<String>) -> Self {
        Self::InvalidStepPlan(msg.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
