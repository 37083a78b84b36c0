//! # Person Store
//!
//! Demonstration binary for the person store: stores a handful of persons in the
//! configured backend, queries them back, and removes the index again.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`workflow`]: The insert, update and query workflow
//! - [`errors`]: Error types for the binary

pub mod config;
pub mod errors;
pub mod workflow;

pub use config::{Backend, Dependencies, Settings};
pub use errors::AppError;
pub use workflow::{WorkflowConfig, WorkflowReport};
