//! Query construction for person searches.
//!
//! A [`PersonQuery`] captures the intent of a read operation. Wire transports turn it
//! into a [`QueryRequest`]: either a direct document lookup or a search request body
//! in the OpenSearch/Elasticsearch query DSL. The in-memory transport evaluates it
//! directly.

use rust_decimal::Decimal;
use serde_json::{json, Number, Value};

use crate::errors::PersonStoreError;

/// Document field holding the person's name.
pub const NAME_FIELD: &str = "name";

/// Document field holding the birth date as a day offset.
pub const BIRTH_DATE_FIELD: &str = "birthDate";

/// Document field holding the credit limit.
pub const CREDIT_LIMIT_FIELD: &str = "creditLimit";

/// Document field holding the customer flag.
pub const CUSTOMER_FIELD: &str = "customer";

/// Maximum number of character edits tolerated by name searches.
pub const NAME_FUZZINESS: u8 = 2;

/// A read operation against the person index.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonQuery {
    /// Point lookup of a single document.
    ById(String),
    /// Every document, optionally only those flagged as customers.
    All { only_customers: bool },
    /// Fuzzy text match on the name field.
    ByName(String),
    /// Inclusive range on the credit limit field.
    ByCreditLimitRange { min: Decimal, max: Decimal },
}

/// How a transport should execute a [`PersonQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRequest {
    /// Fetch the document with this id directly.
    Lookup(String),
    /// Run a search with this request body.
    Search(Value),
}

impl PersonQuery {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::ById(id.into())
    }

    pub fn all(only_customers: bool) -> Self {
        Self::All { only_customers }
    }

    pub fn by_name(text: impl Into<String>) -> Self {
        Self::ByName(text.into())
    }

    pub fn by_credit_limit_range(min: Decimal, max: Decimal) -> Self {
        Self::ByCreditLimitRange { min, max }
    }

    /// Build the wire request for this query.
    ///
    /// Search bodies carry `size = max_results`, so list operations are not cut
    /// down to the engine's default of ten hits.
    ///
    /// # Errors
    ///
    /// * `PersonStoreError::ValidationError` - If a credit limit bound cannot be
    ///   expressed as a JSON number
    pub fn request(&self, max_results: usize) -> Result<QueryRequest, PersonStoreError> {
        let query = match self {
            Self::ById(id) => return Ok(QueryRequest::Lookup(id.clone())),
            Self::All {
                only_customers: false,
            } => json!({ "match_all": {} }),
            Self::All {
                only_customers: true,
            } => json!({
                "term": { CUSTOMER_FIELD: true }
            }),
            Self::ByName(text) => json!({
                "match": {
                    NAME_FIELD: {
                        "query": text,
                        "fuzziness": NAME_FUZZINESS.to_string()
                    }
                }
            }),
            Self::ByCreditLimitRange { min, max } => json!({
                "range": {
                    CREDIT_LIMIT_FIELD: {
                        "gte": decimal_number(*min)?,
                        "lte": decimal_number(*max)?
                    }
                }
            }),
        };

        Ok(QueryRequest::Search(json!({
            "size": max_results,
            "query": query
        })))
    }
}

/// Express a decimal as an exact JSON number, matching how credit limits are indexed.
fn decimal_number(value: Decimal) -> Result<Value, PersonStoreError> {
    value
        .to_string()
        .parse::<Number>()
        .map(Value::Number)
        .map_err(|e| {
            PersonStoreError::validation(format!("Cannot express {} as a number: {}", value, e))
        })
}
