//! Raw HTTP transport implementation.
//!
//! Talks to the search engine's REST API with `reqwest` and parses the response
//! envelopes by hand.

use async_trait::async_trait;
use person_store_shared::PersonDocument;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{Credentials, StoreConfig};
use crate::envelope::{self, INDEX_ALREADY_EXISTS, INDEX_NOT_FOUND};
use crate::errors::PersonStoreError;
use crate::interfaces::DocumentTransport;
use crate::opensearch::get_index_settings;
use crate::query::{PersonQuery, QueryRequest};
use crate::types::DocumentHit;

const DOC_ENDPOINT: &str = "_doc";
const SEARCH_ENDPOINT: &str = "_search";

/// A completed HTTP exchange: the status code and the raw response body.
#[derive(Debug)]
struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Document transport over plain HTTP.
///
/// # Example
///
/// ```ignore
/// use person_store_repository::{DocumentPersonRepository, HttpTransport, StoreConfig};
///
/// let transport = HttpTransport::new(&StoreConfig::new("http://localhost:9200", "persons"))?;
/// let repository = DocumentPersonRepository::new(transport);
/// ```
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    index_name: String,
    credentials: Option<Credentials>,
    max_results: usize,
}

impl HttpTransport {
    /// Create a new HTTP transport for the configured URL and index.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpTransport)` - A new transport instance
    /// * `Err(PersonStoreError)` - If the URL is invalid or the client cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self, PersonStoreError> {
        let base_url =
            Url::parse(&config.url).map_err(|e| PersonStoreError::connection(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(PersonStoreError::connection(format!(
                "URL cannot be used as a base: {}",
                config.url
            )));
        }

        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            index = %config.index_name,
            "Created HTTP transport"
        );

        Ok(Self {
            client,
            base_url,
            index_name: config.index_name.clone(),
            credentials: config.credentials.clone(),
            max_results: config.max_results,
        })
    }

    /// Build a URL below the base URL, percent-encoding every segment.
    fn url(&self, segments: &[&str]) -> Result<Url, PersonStoreError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                PersonStoreError::connection(format!(
                    "URL cannot be used as a base: {}",
                    self.base_url
                ))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn index_url(&self) -> Result<Url, PersonStoreError> {
        self.url(&[self.index_name.as_str()])
    }

    fn document_url(&self, id: Option<&str>) -> Result<Url, PersonStoreError> {
        match id {
            Some(id) => self.url(&[self.index_name.as_str(), DOC_ENDPOINT, id]),
            None => self.url(&[self.index_name.as_str(), DOC_ENDPOINT]),
        }
    }

    fn search_url(&self) -> Result<Url, PersonStoreError> {
        self.url(&[self.index_name.as_str(), SEARCH_ENDPOINT])
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse, PersonStoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PersonStoreError::connection(e.to_string()))?;
        Ok(RawResponse { status, body })
    }

    /// Pass successful responses through; turn any other status into an error.
    fn ensure_success(
        response: RawResponse,
        operation: &str,
    ) -> Result<RawResponse, PersonStoreError> {
        if response.is_success() {
            return Ok(response);
        }
        error!(status = response.status, body = %response.body, operation, "Request failed");
        Err(envelope::request_failed(response.status, &response.body))
    }

    async fn get_document(&self, id: &str) -> Result<Vec<DocumentHit>, PersonStoreError> {
        let request = self.request(Method::GET, self.document_url(Some(id))?);
        let response = self.send(request).await?;

        // 404 is expected when the document does not exist, but not when the index is missing
        if response.status == 404 && envelope::is_document_missing(&response.body) {
            debug!(doc_id = %id, "Document not found");
            return Ok(Vec::new());
        }

        let response = Self::ensure_success(response, "get")?;
        Ok(envelope::document_source(&response.body)?
            .map(|document| vec![DocumentHit::new(id, document)])
            .unwrap_or_default())
    }

    async fn search(&self, body: &Value) -> Result<Vec<DocumentHit>, PersonStoreError> {
        let request = self.request(Method::POST, self.search_url()?).json(body);
        let response = Self::ensure_success(self.send(request).await?, "search")?;
        envelope::search_hits(&response.body)
    }

    /// Run an index lifecycle request, tolerating one expected error type.
    async fn index_lifecycle(
        &self,
        request: RequestBuilder,
        tolerated: &str,
    ) -> Result<bool, PersonStoreError> {
        let response = self.send(request).await?;
        if response.is_success() {
            return Ok(true);
        }
        if envelope::error_type(&response.body).as_deref() == Some(tolerated) {
            return Ok(false);
        }
        error!(status = response.status, body = %response.body, "Index request failed");
        Err(envelope::request_failed(response.status, &response.body))
    }
}

#[async_trait]
impl DocumentTransport for HttpTransport {
    async fn index_document(
        &self,
        id: Option<&str>,
        document: &PersonDocument,
    ) -> Result<String, PersonStoreError> {
        let body = serde_json::to_value(document)
            .map_err(|e| PersonStoreError::serialization(e.to_string()))?;

        // Without an id the engine assigns one; with an id the document is replaced
        let method = if id.is_some() { Method::PUT } else { Method::POST };
        let request = self.request(method, self.document_url(id)?).json(&body);
        let response = Self::ensure_success(self.send(request).await?, "index")?;

        let doc_id = envelope::document_id(&response.body)?;
        debug!(doc_id = %doc_id, "Document indexed");
        Ok(doc_id)
    }

    async fn fetch(&self, query: &PersonQuery) -> Result<Vec<DocumentHit>, PersonStoreError> {
        match query.request(self.max_results)? {
            QueryRequest::Lookup(id) => self.get_document(&id).await,
            QueryRequest::Search(body) => self.search(&body).await,
        }
    }

    async fn create_index(&self) -> Result<(), PersonStoreError> {
        let request = self
            .request(Method::PUT, self.index_url()?)
            .json(&get_index_settings());

        if self.index_lifecycle(request, INDEX_ALREADY_EXISTS).await? {
            info!(index = %self.index_name, "Created index");
        } else {
            warn!(index = %self.index_name, "Index already exists");
        }
        Ok(())
    }

    async fn delete_index(&self) -> Result<(), PersonStoreError> {
        let request = self.request(Method::DELETE, self.index_url()?);

        if self.index_lifecycle(request, INDEX_NOT_FOUND).await? {
            info!(index = %self.index_name, "Deleted index");
        } else {
            warn!(index = %self.index_name, "Index does not exist, nothing to delete");
        }
        Ok(())
    }
}
