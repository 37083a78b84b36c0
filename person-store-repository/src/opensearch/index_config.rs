//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the person index. Both
//! wire transports send them when creating the index.

use serde_json::{json, Value};

use crate::query::{BIRTH_DATE_FIELD, CREDIT_LIMIT_FIELD, CUSTOMER_FIELD, NAME_FIELD};

/// The default name of the person index.
pub const DEFAULT_INDEX_NAME: &str = "persons";

/// Get the index settings and mappings for the person index.
///
/// The configuration includes:
/// - **text**: `name`, analyzed so fuzzy matches are case-insensitive
/// - **integer**: `birthDate`, stored as days since 1970-01-01
/// - **double**: `creditLimit`, for inclusive range queries
/// - **boolean**: `customer`, for exact-match filtering
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                NAME_FIELD: {
                    "type": "text"
                },
                BIRTH_DATE_FIELD: {
                    "type": "integer"
                },
                CREDIT_LIMIT_FIELD: {
                    "type": "double"
                },
                CUSTOMER_FIELD: {
                    "type": "boolean"
                }
            }
        }
    })
}
