//! This module defines the core data structures shared across the person store.
//! It re-exports the `Person` entity and its `PersonDocument` representation.

pub mod person;
pub mod person_document;

pub use person::Person;
pub use person_document::PersonDocument;
