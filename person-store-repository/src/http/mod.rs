//! Raw HTTP implementation of the document transport.

mod transport;

pub use transport::HttpTransport;
