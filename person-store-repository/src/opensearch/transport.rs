//! OpenSearch transport implementation.
//!
//! This module provides the concrete implementation of `DocumentTransport`
//! using the OpenSearch Rust crate. Responses are decoded into typed envelopes.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts},
    GetParts, IndexParts, OpenSearch, SearchParts,
};
use person_store_shared::PersonDocument;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::StoreConfig;
use crate::envelope::{self, INDEX_ALREADY_EXISTS, INDEX_NOT_FOUND};
use crate::errors::PersonStoreError;
use crate::interfaces::DocumentTransport;
use crate::opensearch::index_config::get_index_settings;
use crate::query::{PersonQuery, QueryRequest};
use crate::types::DocumentHit;

#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<PersonDocument>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Option<PersonDocument>,
}

/// OpenSearch transport implementation.
///
/// Owns its client; the client's connection pool is released when the transport is
/// dropped.
///
/// # Example
///
/// ```ignore
/// use person_store_repository::{DocumentPersonRepository, OpenSearchTransport, StoreConfig};
///
/// let config = StoreConfig::new("http://localhost:9200", "persons");
/// let transport = OpenSearchTransport::new(&config)?;
/// let repository = DocumentPersonRepository::new(transport);
/// ```
pub struct OpenSearchTransport {
    client: OpenSearch,
    index_name: String,
    max_results: usize,
}

impl OpenSearchTransport {
    /// Create a new OpenSearch transport for the configured URL and index.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchTransport)` - A new transport instance
    /// * `Err(PersonStoreError)` - If the URL is invalid or the client cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self, PersonStoreError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| PersonStoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(credentials) = &config.credentials {
            builder = builder.auth(Credentials::Basic(
                credentials.username.clone(),
                credentials.password.clone(),
            ));
        }
        let transport = builder
            .build()
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            index = %config.index_name,
            "Created OpenSearch transport"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            index_name: config.index_name.clone(),
            max_results: config.max_results,
        })
    }

    /// Pass successful responses through; turn any other status into an error.
    async fn ensure_success(
        response: Response,
        operation: &str,
    ) -> Result<Response, PersonStoreError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, operation, "Request failed");
        Err(envelope::request_failed(status.as_u16(), &error_body))
    }

    async fn parse<T>(response: Response) -> Result<T, PersonStoreError>
    where
        T: serde::de::DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|e| PersonStoreError::parse(e.to_string()))
    }

    async fn get_document(&self, id: &str) -> Result<Vec<DocumentHit>, PersonStoreError> {
        let response = self
            .client
            .get(GetParts::IndexId(&self.index_name, id))
            .send()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        // 404 is expected when the document does not exist, but not when the index is missing
        if response.status_code().as_u16() == 404 {
            let body = response.text().await.unwrap_or_default();
            if envelope::is_document_missing(&body) {
                debug!(doc_id = %id, "Document not found");
                return Ok(Vec::new());
            }
            error!(status = 404, body = %body, "Get request failed");
            return Err(envelope::request_failed(404, &body));
        }

        let response = Self::ensure_success(response, "get").await?;
        let found: GetResponse = Self::parse(response).await?;

        Ok(match (found.found, found.source) {
            (true, Some(document)) => vec![DocumentHit::new(id, document)],
            _ => Vec::new(),
        })
    }

    async fn search(&self, body: Value) -> Result<Vec<DocumentHit>, PersonStoreError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_name.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        let response = Self::ensure_success(response, "search").await?;
        let result: SearchResponse = Self::parse(response).await?;

        Ok(result
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| hit.source.map(|document| DocumentHit::new(hit.id, document)))
            .collect())
    }
}

#[async_trait]
impl DocumentTransport for OpenSearchTransport {
    async fn index_document(
        &self,
        id: Option<&str>,
        document: &PersonDocument,
    ) -> Result<String, PersonStoreError> {
        // Without an id the engine assigns one; with an id the document is replaced
        let parts = match id {
            Some(id) => IndexParts::IndexId(&self.index_name, id),
            None => IndexParts::Index(&self.index_name),
        };

        let response = self
            .client
            .index(parts)
            .body(document)
            .send()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        let response = Self::ensure_success(response, "index").await?;
        let indexed: IndexResponse = Self::parse(response).await?;

        debug!(doc_id = %indexed.id, "Document indexed");
        Ok(indexed.id)
    }

    async fn fetch(&self, query: &PersonQuery) -> Result<Vec<DocumentHit>, PersonStoreError> {
        match query.request(self.max_results)? {
            QueryRequest::Lookup(id) => self.get_document(&id).await,
            QueryRequest::Search(body) => self.search(body).await,
        }
    }

    async fn create_index(&self) -> Result<(), PersonStoreError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if envelope::error_type(&error_body).as_deref() == Some(INDEX_ALREADY_EXISTS) {
                warn!(index = %self.index_name, "Index already exists");
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(envelope::request_failed(status.as_u16(), &error_body));
        }

        info!(index = %self.index_name, "Created index");
        Ok(())
    }

    async fn delete_index(&self) -> Result<(), PersonStoreError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[self.index_name.as_str()]))
            .send()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if envelope::error_type(&error_body).as_deref() == Some(INDEX_NOT_FOUND) {
                warn!(index = %self.index_name, "Index does not exist, nothing to delete");
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(envelope::request_failed(status.as_u16(), &error_body));
        }

        info!(index = %self.index_name, "Deleted index");
        Ok(())
    }
}
