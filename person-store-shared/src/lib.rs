//! # Person Store Shared
//!
//! This crate defines the domain entity and its storage representation used across
//! the person store crates. It includes the `Person` entity, the `PersonDocument`
//! indexed in the search engine, and the date codec that makes birth dates
//! range-queryable.

pub mod date_offset;
pub mod errors;
pub mod types;

pub use errors::ModelError;
pub use types::person::Person;
pub use types::person_document::PersonDocument;
