//! Person repository trait definition.

use async_trait::async_trait;
use person_store_shared::Person;
use rust_decimal::Decimal;

use crate::errors::PersonStoreError;

/// Persistence contract for `Person` entities.
///
/// Implementations are injected into `PersonService` (or used directly) and can be
/// swapped at composition time through `RepositorySource`.
///
/// Every `Person` returned by a read operation has its id set. No operation waits for
/// newly written documents to become searchable: the engine is eventually
/// consistent, and callers that need read-after-write visibility must wait
/// themselves.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert or replace a person.
    ///
    /// If the person has no id, the engine assigns one and it is written back into
    /// `person`. If the person has an id, the stored document for that id is
    /// replaced (upsert). On failure the person's id is left untouched.
    async fn save(&self, person: &mut Person) -> Result<(), PersonStoreError>;

    /// Look up a person by id, returning `None` when no document exists for it.
    async fn get(&self, id: &str) -> Result<Option<Person>, PersonStoreError>;

    /// List every person, or only customers when `only_customers` is true.
    ///
    /// Results are unordered.
    async fn get_all(&self, only_customers: bool) -> Result<Vec<Person>, PersonStoreError>;

    /// Fuzzy match on the person's name, tolerating up to two character edits.
    async fn query_by_name(&self, name: &str) -> Result<Vec<Person>, PersonStoreError>;

    /// Persons whose credit limit lies in `min..=max`.
    async fn query_by_credit_limit(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Person>, PersonStoreError>;

    /// Create the index backing this repository. Succeeds if it already exists.
    async fn create_index(&self) -> Result<(), PersonStoreError>;

    /// Delete the index backing this repository. Succeeds if it does not exist.
    async fn delete_index(&self) -> Result<(), PersonStoreError>;
}
