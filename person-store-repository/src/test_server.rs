//! Local HTTP server that answers each connection with a canned JSON response.
//!
//! Used to exercise the wire transports against real HTTP exchanges. Every response
//! closes its connection, so each request arrives on a fresh one.

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Body returned by a document lookup for an id that is not stored.
pub const DOCUMENT_MISSING: &str = r#"{"_index":"persons","_id":"nope","found":false}"#;

/// Body returned by any request against an index that does not exist.
pub const INDEX_MISSING: &str = concat!(
    r#"{"error":{"root_cause":[{"type":"index_not_found_exception","#,
    r#""reason":"no such index [persons]"}],"type":"index_not_found_exception","#,
    r#""reason":"no such index [persons]","index":"persons"},"status":404}"#
);

/// Body returned when creating an index that already exists.
pub const INDEX_EXISTS: &str = concat!(
    r#"{"error":{"type":"resource_already_exists_exception","#,
    r#""reason":"index [persons/x1] already exists"},"status":400}"#
);

/// Body returned when the engine fails for an unexpected reason.
pub const SHARDS_FAILED: &str = concat!(
    r#"{"error":{"type":"search_phase_execution_exception","#,
    r#""reason":"all shards failed"},"status":503}"#
);

/// A request as seen by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct TestServer {
    pub url: String,
    handle: JoinHandle<Vec<ReceivedRequest>>,
}

impl TestServer {
    /// Serve `responses` in order, one `(status, body)` pair per connection.
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut received = Vec::new();
            for (status, body) in responses {
                let (stream, _) = listener.accept().await.unwrap();
                let mut reader = BufReader::new(stream);

                let mut request_line = String::new();
                reader.read_line(&mut request_line).await.unwrap();

                let mut content_length = 0;
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).await.unwrap();
                    let header = header.trim_end();
                    if header.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = header.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }

                let mut request_body = vec![0; content_length];
                reader.read_exact(&mut request_body).await.unwrap();

                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let target = parts.next().unwrap_or_default();
                let path = target.split('?').next().unwrap_or_default().to_string();
                received.push(ReceivedRequest {
                    method,
                    path,
                    body: String::from_utf8(request_body).unwrap(),
                });

                let response = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let mut stream = reader.into_inner();
                stream.write_all(response.as_bytes()).await.unwrap();
                let _ = stream.shutdown().await;
            }
            received
        });

        Self { url, handle }
    }

    /// Wait until every response was served and return the requests received.
    pub async fn received(self) -> Vec<ReceivedRequest> {
        self.handle.await.unwrap()
    }
}

/// Body of a successful index request for `id`.
pub fn indexed(id: &str) -> String {
    format!(
        r#"{{"_index":"persons","_id":"{}","_version":1,"result":"created"}}"#,
        id
    )
}

/// Body of a successful lookup for `id` holding `source`.
pub fn found(id: &str, source: &str) -> String {
    format!(
        r#"{{"_index":"persons","_id":"{}","_version":1,"found":true,"_source":{}}}"#,
        id, source
    )
}

/// Body of a search response with one hit per `(id, source)` pair.
pub fn search_result(hits: &[(&str, &str)]) -> String {
    let hits: Vec<String> = hits
        .iter()
        .map(|(id, source)| {
            format!(
                r#"{{"_index":"persons","_id":"{}","_score":1.0,"_source":{}}}"#,
                id, source
            )
        })
        .collect();
    format!(
        r#"{{"took":1,"timed_out":false,"hits":{{"total":{{"value":{},"relation":"eq"}},"#,
        hits.len()
    ) + &format!(r#""hits":[{}]}}}}"#, hits.join(","))
}
