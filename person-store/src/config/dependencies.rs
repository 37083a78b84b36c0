//! Dependency initialization and wiring for the person store.

use std::env;
use std::time::Duration;
use tracing::info;

use crate::workflow::WorkflowConfig;
use crate::AppError;
use person_store_repository::config::{DEFAULT_MAX_RESULTS, DEFAULT_URL};
use person_store_repository::opensearch::DEFAULT_INDEX_NAME;
use person_store_repository::{Credentials, PersonService, RepositorySource, StoreConfig};

/// Default wait for newly indexed documents to become searchable, in milliseconds.
const DEFAULT_INDEXING_WAIT_MS: u64 = 1000;

/// Which transport backs the person repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Typed OpenSearch client.
    OpenSearch,
    /// Raw HTTP requests.
    Http,
    /// In-process memory, no search engine required.
    Memory,
}

impl Backend {
    /// Parse a backend name (case-insensitive).
    ///
    /// Valid values: "opensearch", "http" or "memory"
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "opensearch" => Some(Self::OpenSearch),
            "http" => Some(Self::Http),
            "memory" | "in-memory" | "inmemory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: Backend,
    pub store: StoreConfig,
    pub indexing_wait: Duration,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `PERSON_STORE_BACKEND`: "opensearch", "http" or "memory" (default: opensearch)
    /// - `OPENSEARCH_URL`: Search engine URL (default: http://localhost:9200)
    /// - `PERSON_INDEX`: Index name (default: "persons")
    /// - `ES_USERNAME` / `ES_PASSWORD`: Basic auth, used only when both are set
    /// - `SEARCH_MAX_RESULTS`: Maximum hits per search (default: 10000)
    /// - `INDEXING_WAIT_MS`: Wait before querying freshly written documents (default: 1000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build settings from any variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let backend = match var("PERSON_STORE_BACKEND") {
            Some(value) => Backend::parse(&value).ok_or_else(|| {
                AppError::config(format!(
                    "Invalid PERSON_STORE_BACKEND '{}', expected opensearch, http or memory",
                    value
                ))
            })?,
            None => Backend::OpenSearch,
        };

        let url = var("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let index_name = var("PERSON_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let max_results = parse_number(&var, "SEARCH_MAX_RESULTS", DEFAULT_MAX_RESULTS)?;
        let indexing_wait_ms = parse_number(&var, "INDEXING_WAIT_MS", DEFAULT_INDEXING_WAIT_MS)?;

        let mut store = StoreConfig::new(url, index_name).with_max_results(max_results);
        if let (Some(username), Some(password)) = (var("ES_USERNAME"), var("ES_PASSWORD")) {
            store = store.with_credentials(Credentials::basic(username, password));
        }

        Ok(Self {
            backend,
            store,
            indexing_wait: Duration::from_millis(indexing_wait_ms),
        })
    }

    /// The repository source selected by these settings.
    pub fn source(&self) -> RepositorySource {
        match self.backend {
            Backend::OpenSearch => RepositorySource::OpenSearch(self.store.clone()),
            Backend::Http => RepositorySource::Http(self.store.clone()),
            Backend::Memory => RepositorySource::InMemory,
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match var(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("Invalid {} '{}'", key, value))),
        None => Ok(default),
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The person service backed by the configured repository.
    pub service: PersonService,
    /// Configuration for the demonstration workflow.
    pub workflow_config: WorkflowConfig,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the configuration is invalid or the client cannot be built
    pub fn new() -> Result<Self, AppError> {
        Self::from_settings(Settings::from_env()?)
    }

    /// Initialize dependencies from already loaded settings.
    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let source = settings.source();

        info!(
            backend = source.name(),
            url = %settings.store.url,
            index = %settings.store.index_name,
            authenticated = settings.store.credentials.is_some(),
            max_results = settings.store.max_results,
            indexing_wait_ms = settings.indexing_wait.as_millis() as u64,
            "Initializing dependencies"
        );

        let repository = source.into_repository().map_err(|e| {
            AppError::config(format!("Failed to create person repository: {}", e))
        })?;

        Ok(Self {
            service: PersonService::new(repository),
            workflow_config: WorkflowConfig {
                indexing_wait: settings.indexing_wait,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.backend, Backend::OpenSearch);
        assert_eq!(settings.store, StoreConfig::default());
        assert_eq!(settings.indexing_wait, Duration::from_millis(1000));
        assert_eq!(settings.source().name(), "opensearch");
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("PERSON_STORE_BACKEND", "HTTP"),
            ("OPENSEARCH_URL", "https://search.internal:9200"),
            ("PERSON_INDEX", "people"),
            ("SEARCH_MAX_RESULTS", "250"),
            ("INDEXING_WAIT_MS", "0"),
        ])
        .unwrap();

        assert_eq!(settings.backend, Backend::Http);
        assert_eq!(settings.store.url, "https://search.internal:9200");
        assert_eq!(settings.store.index_name, "people");
        assert_eq!(settings.store.max_results, 250);
        assert_eq!(settings.indexing_wait, Duration::ZERO);
        assert!(matches!(settings.source(), RepositorySource::Http(_)));
    }

    #[test]
    fn test_credentials_need_both_values() {
        let settings_user_only = settings(&[("ES_USERNAME", "elastic")]).unwrap();
        assert_eq!(settings_user_only.store.credentials, None);

        let settings_both =
            settings(&[("ES_USERNAME", "elastic"), ("ES_PASSWORD", "changeme")]).unwrap();
        assert_eq!(
            settings_both.store.credentials,
            Some(Credentials::basic("elastic", "changeme"))
        );
    }

    #[test]
    fn test_invalid_values() {
        let result = settings(&[("PERSON_STORE_BACKEND", "postgres")]);
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        let result = settings(&[("SEARCH_MAX_RESULTS", "many")]);
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        let result = settings(&[("INDEXING_WAIT_MS", "-5")]);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("opensearch"), Some(Backend::OpenSearch));
        assert_eq!(Backend::parse(" Memory "), Some(Backend::Memory));
        assert_eq!(Backend::parse("http"), Some(Backend::Http));
        assert_eq!(Backend::parse(""), None);
    }

    #[test]
    fn test_memory_dependencies() {
        let settings = settings(&[("PERSON_STORE_BACKEND", "memory"), ("INDEXING_WAIT_MS", "5")])
            .unwrap();

        let deps = Dependencies::from_settings(settings).unwrap();

        assert_eq!(deps.workflow_config.indexing_wait, Duration::from_millis(5));
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let settings = settings(&[("OPENSEARCH_URL", "not a url")]).unwrap();

        let result = Dependencies::from_settings(settings);

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
