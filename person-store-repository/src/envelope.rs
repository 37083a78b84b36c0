//! Parsing of search engine response envelopes.
//!
//! The raw HTTP transport walks these envelopes by hand as `serde_json::Value`s:
//!
//! - index response: `{"_id": "..."}`
//! - get response: `{"found": true, "_source": {...}}`
//! - search response: `{"hits": {"hits": [{"_id": "...", "_source": {...}}]}}`
//! - error response: `{"error": {"type": "...", "reason": "...", "root_cause": [...]}}`
//!
//! Error envelopes are parsed the same way by every wire transport.

use person_store_shared::PersonDocument;
use serde_json::Value;

use crate::errors::PersonStoreError;
use crate::types::DocumentHit;

/// Error type reported when the target index does not exist.
pub const INDEX_NOT_FOUND: &str = "index_not_found_exception";

/// Error type reported when creating an index that already exists.
pub const INDEX_ALREADY_EXISTS: &str = "resource_already_exists_exception";

fn parse_json(body: &str) -> Result<Value, PersonStoreError> {
    serde_json::from_str(body)
        .map_err(|e| PersonStoreError::parse(format!("Invalid JSON response: {}", e)))
}

fn parse_source(source: &Value) -> Result<PersonDocument, PersonStoreError> {
    serde_json::from_value(source.clone())
        .map_err(|e| PersonStoreError::parse(format!("Invalid person document: {}", e)))
}

/// Extract the document id from an index response.
pub fn document_id(body: &str) -> Result<String, PersonStoreError> {
    let json = parse_json(body)?;
    json.get("_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PersonStoreError::parse("Index response has no '_id'"))
}

/// Extract the document from a get response.
///
/// Returns `None` when the response reports `"found": false` or carries no source.
pub fn document_source(body: &str) -> Result<Option<PersonDocument>, PersonStoreError> {
    let json = parse_json(body)?;
    if json.get("found").and_then(Value::as_bool) == Some(false) {
        return Ok(None);
    }
    match json.get("_source") {
        Some(source) if !source.is_null() => parse_source(source).map(Some),
        _ => Ok(None),
    }
}

/// Extract every hit from a search response.
///
/// Hits without a source are skipped.
pub fn search_hits(body: &str) -> Result<Vec<DocumentHit>, PersonStoreError> {
    let json = parse_json(body)?;
    let hits = json
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| PersonStoreError::parse("Search response has no 'hits.hits' array"))?;

    let mut documents = Vec::with_capacity(hits.len());
    for hit in hits {
        let id = hit
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| PersonStoreError::parse("Search hit has no '_id'"))?;
        match hit.get("_source") {
            Some(source) if !source.is_null() => {
                documents.push(DocumentHit::new(id, parse_source(source)?));
            }
            _ => {}
        }
    }
    Ok(documents)
}

/// Whether a not-found get response means "no such document" rather than a failure.
pub fn is_document_missing(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("found").and_then(Value::as_bool))
        == Some(false)
}

/// Extract the reason from an error response.
///
/// Looks at `error.reason`, then `error.root_cause[0].reason`, then `error` itself
/// when the engine reports the error as a plain string.
pub fn error_reason(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let error = json.get("error")?;

    if let Some(reason) = error.as_str() {
        return Some(reason.to_string());
    }

    error
        .get("reason")
        .and_then(Value::as_str)
        .or_else(|| {
            error
                .get("root_cause")
                .and_then(Value::as_array)
                .and_then(|causes| causes.first())
                .and_then(|cause| cause.get("reason"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
}

/// Extract the error type (e.g. `index_not_found_exception`) from an error response.
pub fn error_type(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("error")?
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Build the error for a non-success response.
pub fn request_failed(status: u16, body: &str) -> PersonStoreError {
    PersonStoreError::request_failed(status, error_reason(body))
}
