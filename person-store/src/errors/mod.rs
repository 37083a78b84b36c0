//! Error types for the person store binary.

use person_store_repository::PersonStoreError;
use thiserror::Error;

/// Errors that can occur during startup or while running the workflow.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the person store.
    #[error("Store error: {0}")]
    Store(#[from] PersonStoreError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
