//! Document transport trait definition.
//!
//! This module defines the abstract interface for moving person documents and
//! queries to a search engine, allowing for different backend implementations
//! (typed OpenSearch client, raw HTTP, in-memory).

use async_trait::async_trait;
use person_store_shared::PersonDocument;

use crate::errors::PersonStoreError;
use crate::query::PersonQuery;
use crate::types::DocumentHit;

/// Abstracts how documents reach the search engine.
///
/// Transports know nothing about `Person`: they index, fetch and search
/// `PersonDocument`s. Every implementation must produce the same observable
/// behavior so that the repository built on top of them behaves identically.
///
/// # Index lifecycle
///
/// Creating an index that already exists and deleting an index that does not exist
/// both succeed. Every other failure is returned to the caller.
#[async_trait]
pub trait DocumentTransport: Send + Sync {
    /// Index a document, returning its document id.
    ///
    /// When `id` is `None` the engine assigns a new id; otherwise the document stored
    /// under `id` is created or replaced.
    async fn index_document(
        &self,
        id: Option<&str>,
        document: &PersonDocument,
    ) -> Result<String, PersonStoreError>;

    /// Execute a query and return the matching documents.
    ///
    /// Point lookups are resolved with a direct document fetch and yield zero or one
    /// hit; every other query is a search.
    async fn fetch(&self, query: &PersonQuery) -> Result<Vec<DocumentHit>, PersonStoreError>;

    /// Create the index.
    async fn create_index(&self) -> Result<(), PersonStoreError>;

    /// Delete the index.
    async fn delete_index(&self) -> Result<(), PersonStoreError>;
}
