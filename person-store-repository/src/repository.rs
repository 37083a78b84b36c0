//! Document-backed implementation of `PersonRepository`.
//!
//! Maps `Person` entities to `PersonDocument`s, turns each read operation into a
//! `PersonQuery`, and hands both to a `DocumentTransport`. The mapping and query
//! logic lives here once; transports only move documents.

use async_trait::async_trait;
use person_store_shared::{Person, PersonDocument};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::errors::PersonStoreError;
use crate::http::HttpTransport;
use crate::interfaces::{DocumentTransport, PersonRepository};
use crate::memory::InMemoryTransport;
use crate::opensearch::OpenSearchTransport;
use crate::query::PersonQuery;
use crate::types::DocumentHit;

/// Repository backed by the typed OpenSearch client.
pub type OpenSearchPersonRepository = DocumentPersonRepository<OpenSearchTransport>;

/// Repository backed by raw HTTP requests.
pub type HttpPersonRepository = DocumentPersonRepository<HttpTransport>;

/// Repository backed by process memory.
pub type InMemoryPersonRepository = DocumentPersonRepository<InMemoryTransport>;

/// `PersonRepository` implemented on top of any `DocumentTransport`.
///
/// # Example
///
/// ```
/// use person_store_repository::{InMemoryPersonRepository, PersonRepository};
/// use person_store_shared::Person;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = InMemoryPersonRepository::default();
///
/// let mut john = Person::new("John", None, None, None)?;
/// repository.save(&mut john).await?;
///
/// let stored = repository.get(john.id().unwrap_or_default()).await?;
/// assert_eq!(stored, Some(john));
/// # Ok(())
/// # }
/// ```
pub struct DocumentPersonRepository<T: DocumentTransport> {
    transport: T,
}

impl<T: DocumentTransport> DocumentPersonRepository<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The transport this repository sends documents through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn find(&self, query: PersonQuery) -> Result<Vec<Person>, PersonStoreError> {
        let hits = self.transport.fetch(&query).await?;
        debug!(query = ?query, hits = hits.len(), "Query executed");
        hits.into_iter().map(DocumentHit::into_person).collect()
    }
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self::new(InMemoryTransport::new())
    }
}

#[async_trait]
impl<T: DocumentTransport> PersonRepository for DocumentPersonRepository<T> {
    async fn save(&self, person: &mut Person) -> Result<(), PersonStoreError> {
        let document = PersonDocument::from_person(person)?;
        let id = self.transport.index_document(person.id(), &document).await?;

        // Only a successful write assigns the id
        person.initialize(id)?;

        info!(person_id = person.id().unwrap_or_default(), name = %person.name(), "Saved person");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Person>, PersonStoreError> {
        if id.trim().is_empty() {
            return Err(PersonStoreError::validation("Person ID is required"));
        }
        Ok(self.find(PersonQuery::by_id(id)).await?.into_iter().next())
    }

    async fn get_all(&self, only_customers: bool) -> Result<Vec<Person>, PersonStoreError> {
        self.find(PersonQuery::all(only_customers)).await
    }

    async fn query_by_name(&self, name: &str) -> Result<Vec<Person>, PersonStoreError> {
        self.find(PersonQuery::by_name(name)).await
    }

    async fn query_by_credit_limit(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Person>, PersonStoreError> {
        self.find(PersonQuery::by_credit_limit_range(min, max)).await
    }

    async fn create_index(&self) -> Result<(), PersonStoreError> {
        self.transport.create_index().await
    }

    async fn delete_index(&self) -> Result<(), PersonStoreError> {
        self.transport.delete_index().await
    }
}
