//! Person document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine
//! and the mapping between it and the [`Person`] entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::date_offset::{from_day_offset, to_day_offset};
use crate::errors::ModelError;
use crate::types::person::Person;

/// Document representation of a person in the search index.
///
/// The document id is the search engine's document identifier and is not part of
/// the body. Unknown fields are ignored when decoding.
///
/// # Fields
///
/// - `name`: Display name (fuzzy-searchable)
/// - `birthDate`: Days since 1970-01-01, so dates can be range-queried
/// - `creditLimit`: Credit limit stored as an exact JSON number
/// - `customer`: Customer flag, always written as a boolean
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<i32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub credit_limit: Option<Decimal>,
    #[serde(default)]
    pub customer: Option<bool>,
}

impl PersonDocument {
    /// Build the document stored for a person.
    ///
    /// # Errors
    ///
    /// * `ModelError::EncodingError` - If the birth date cannot be encoded as a day offset
    pub fn from_person(person: &Person) -> Result<Self, ModelError> {
        Ok(Self {
            name: person.name().to_string(),
            birth_date: to_day_offset(person.birth_date())?,
            credit_limit: person.credit_limit(),
            customer: Some(person.is_customer()),
        })
    }

    /// Rebuild the person stored under `id`.
    ///
    /// # Errors
    ///
    /// * `ModelError::ValidationError` - If `id` is blank or the document holds an invalid person
    /// * `ModelError::EncodingError` - If the birth date offset is out of range
    pub fn into_person(self, id: impl Into<String>) -> Result<Person, ModelError> {
        let birth_date = from_day_offset(self.birth_date)?;
        Person::with_id(id, self.name, birth_date, self.credit_limit, self.customer)
    }
}
