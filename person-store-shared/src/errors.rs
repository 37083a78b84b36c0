//! Error types for the person domain model.

use thiserror::Error;

/// Errors raised locally by the domain model, before any request reaches the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Invalid entity state (blank name, negative credit limit, empty id).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A date cannot be represented as a day offset (or vice versa).
    #[error("Encoding error: {0}")]
    EncodingError(String),
}

impl ModelError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::EncodingError(msg.into())
    }
}
