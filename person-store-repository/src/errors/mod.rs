//! Error types for the person store repository.
//!
//! This module provides a unified error type for all repository operations.

mod person_store_error;

pub use person_store_error::PersonStoreError;
