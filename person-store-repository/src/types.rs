//! Response types shared by the document transports.

use person_store_shared::{Person, PersonDocument};

use crate::errors::PersonStoreError;

/// A document returned by the search engine together with its document id.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHit {
    /// The engine-assigned document identifier.
    pub id: String,
    /// The decoded document body.
    pub document: PersonDocument,
}

impl DocumentHit {
    pub fn new(id: impl Into<String>, document: PersonDocument) -> Self {
        Self {
            id: id.into(),
            document,
        }
    }

    /// Rebuild the person stored in this hit, identified by the hit's document id.
    pub fn into_person(self) -> Result<Person, PersonStoreError> {
        Ok(self.document.into_person(self.id)?)
    }
}
