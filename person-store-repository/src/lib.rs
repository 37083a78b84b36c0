//! # Person Store Repository
//!
//! This crate provides the persistence contract for `Person` entities and its
//! implementations backed by a document search index. It includes the error type,
//! the query builder, the `DocumentTransport` seam with OpenSearch, raw HTTP and
//! in-memory transports, and the `PersonService` used by application code.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod http;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod query;
pub mod repository;
pub mod service;
pub mod types;

#[cfg(test)]
mod test_server;

pub use config::{Credentials, RepositorySource, StoreConfig};
pub use errors::PersonStoreError;
pub use http::HttpTransport;
pub use interfaces::{DocumentTransport, PersonRepository};
pub use memory::InMemoryTransport;
pub use opensearch::OpenSearchTransport;
pub use query::{PersonQuery, QueryRequest};
pub use repository::{
    DocumentPersonRepository, HttpPersonRepository, InMemoryPersonRepository,
    OpenSearchPersonRepository,
};
pub use service::PersonService;
pub use types::DocumentHit;
