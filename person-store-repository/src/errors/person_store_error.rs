//! Person store error types.
//!
//! This module defines the unified error type for all repository operations,
//! covering local validation failures, missing entities and transport failures.

use person_store_shared::ModelError;
use thiserror::Error;

/// Unified errors from person store operations.
///
/// Used by the `PersonRepository` and `DocumentTransport` traits and by `PersonService`.
/// Errors fall into four groups:
///
/// - **Validation**: invalid entity state detected before any request is sent
/// - **Not found**: a lookup by id found nothing (only raised by `PersonService`)
/// - **Transport**: connection failures, non-success status codes and malformed
///   response envelopes (see [`PersonStoreError::is_transport`])
/// - **Encoding**: a date outside the representable day-offset range
///
/// Nothing in this crate retries on any of these errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonStoreError {
    /// Validation error (e.g., blank name, negative credit limit, empty id).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No person exists for the requested id.
    #[error("Person not found: {0}")]
    NotFound(String),

    /// A date cannot be converted to or from a day offset.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// The request could not be delivered to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The search engine answered with a non-success status code.
    #[error("Request failed with status {status}{}", format_reason(.reason))]
    RequestFailed {
        status: u16,
        /// The reason reported in the engine's error envelope, if any.
        reason: Option<String>,
    },

    /// Failed to parse a response envelope from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn format_reason(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {}", reason),
        None => String::new(),
    }
}

impl PersonStoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a not found error for the given person id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create an encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::EncodingError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a request failed error.
    pub fn request_failed(status: u16, reason: Option<String>) -> Self {
        Self::RequestFailed { status, reason }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Whether the error was raised while talking to the search engine.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_)
                | Self::RequestFailed { .. }
                | Self::ParseError(_)
                | Self::SerializationError(_)
        )
    }
}

impl From<ModelError> for PersonStoreError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ValidationError(msg) => Self::ValidationError(msg),
            ModelError::EncodingError(msg) => Self::EncodingError(msg),
        }
    }
}
