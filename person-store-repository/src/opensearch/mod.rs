//! OpenSearch implementation of the document transport.
//!
//! This module provides a concrete implementation of `DocumentTransport`
//! using the typed OpenSearch client as the backend.

mod index_config;
mod transport;

pub use index_config::{get_index_settings, DEFAULT_INDEX_NAME};
pub use transport::OpenSearchTransport;
