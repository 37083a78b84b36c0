//! Configuration types for the person store.

use std::fmt;

use crate::errors::PersonStoreError;
use crate::http::HttpTransport;
use crate::interfaces::PersonRepository;
use crate::memory::InMemoryTransport;
use crate::opensearch::{OpenSearchTransport, DEFAULT_INDEX_NAME};
use crate::repository::DocumentPersonRepository;

/// Default search engine URL.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default upper bound on the number of hits a search returns.
///
/// Matches the engine's default `index.max_result_window`.
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

/// Basic authentication credentials for the search engine.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Connection and index configuration shared by the wire transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The search engine URL (e.g., "http://localhost:9200").
    pub url: String,
    /// The index holding person documents.
    pub index_name: String,
    /// Optional basic authentication.
    pub credentials: Option<Credentials>,
    /// Maximum number of hits returned by a single search.
    pub max_results: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            credentials: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl StoreConfig {
    /// Create a config for the given URL and index, with default limits and no credentials.
    pub fn new(url: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index_name: index_name.into(),
            ..Self::default()
        }
    }

    /// Use basic authentication.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Limit the number of hits returned by a single search.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Selects which transport backs the repository.
///
/// The choice is made explicitly at composition time.
///
/// # Example
///
/// ```
/// use person_store_repository::{RepositorySource, StoreConfig};
///
/// // Tests and local development
/// let repository = RepositorySource::InMemory.into_repository().unwrap();
///
/// // Typed OpenSearch client
/// let repository = RepositorySource::OpenSearch(StoreConfig::default())
///     .into_repository()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    /// Documents kept in process memory.
    InMemory,
    /// The typed OpenSearch client.
    OpenSearch(StoreConfig),
    /// Raw HTTP requests with manual envelope parsing.
    Http(StoreConfig),
}

impl RepositorySource {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InMemory => "memory",
            Self::OpenSearch(_) => "opensearch",
            Self::Http(_) => "http",
        }
    }

    /// Build the repository for this source.
    ///
    /// # Errors
    ///
    /// * `PersonStoreError::ConnectionError` - If the URL is invalid or the client cannot be built
    pub fn into_repository(self) -> Result<Box<dyn PersonRepository>, PersonStoreError> {
        let repository: Box<dyn PersonRepository> = match self {
            Self::InMemory => Box::new(DocumentPersonRepository::new(InMemoryTransport::new())),
            Self::OpenSearch(config) => {
                Box::new(DocumentPersonRepository::new(OpenSearchTransport::new(&config)?))
            }
            Self::Http(config) => {
                Box::new(DocumentPersonRepository::new(HttpTransport::new(&config)?))
            }
        };
        Ok(repository)
    }
}
