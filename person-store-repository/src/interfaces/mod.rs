//! Interface definitions for the person store.
//!
//! `PersonRepository` is the public contract application code depends on.
//! `DocumentTransport` is the narrower seam the document-backed repository uses to
//! move documents and queries to a search engine, allowing swappable backends.

mod document_transport;
mod person_repository;

pub use document_transport::DocumentTransport;
pub use person_repository::PersonRepository;
