//! In-memory implementation of the document transport, for tests and local runs.

mod transport;

pub use transport::InMemoryTransport;
