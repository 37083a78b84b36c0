//! Person service implementation.
//!
//! This module provides the application-facing service for storing and querying
//! persons. It validates requests and delegates to a `PersonRepository`.

use person_store_shared::Person;
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::PersonStoreError;
use crate::interfaces::PersonRepository;

/// The main service for storing and querying persons.
///
/// This is the high-level API that application code should use. It adds request
/// validation and turns a missing person into `PersonStoreError::NotFound`, while
/// the injected `PersonRepository` does the actual storage work.
///
/// # Example
///
/// ```no_run
/// use person_store_repository::{PersonService, RepositorySource, StoreConfig};
/// use person_store_shared::Person;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = RepositorySource::OpenSearch(StoreConfig::default()).into_repository()?;
/// let service = PersonService::new(repository);
///
/// let mut person = Person::new("Hilary", None, None, Some(true))?;
/// service.insert(&mut person).await?;
///
/// let stored = service.get(person.id().unwrap_or_default()).await?;
/// # Ok(())
/// # }
/// ```
pub struct PersonService {
    repository: Box<dyn PersonRepository>,
}

impl PersonService {
    /// Create a new PersonService.
    ///
    /// # Arguments
    ///
    /// * `repository` - A boxed implementation of `PersonRepository`
    pub fn new(repository: Box<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    /// The repository this service delegates to.
    pub fn repository(&self) -> &dyn PersonRepository {
        self.repository.as_ref()
    }

    /// Store a person, assigning its id when it has none.
    ///
    /// A person that already has an id is stored under that id.
    pub async fn insert(&self, person: &mut Person) -> Result<(), PersonStoreError> {
        self.repository.save(person).await
    }

    /// Replace the stored document of an already persisted person.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was replaced
    /// * `Err(PersonStoreError::ValidationError)` - If the person has no id
    /// * `Err(PersonStoreError)` - If the operation fails
    pub async fn update(&self, person: &mut Person) -> Result<(), PersonStoreError> {
        if !person.is_persisted() {
            return Err(PersonStoreError::validation("Person ID is required for update"));
        }
        self.repository.save(person).await
    }

    /// Look up a person by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Person)` - The stored person
    /// * `Err(PersonStoreError::NotFound)` - If no person is stored under `id`
    /// * `Err(PersonStoreError)` - If the operation fails
    pub async fn get(&self, id: &str) -> Result<Person, PersonStoreError> {
        match self.repository.get(id).await? {
            Some(person) => Ok(person),
            None => {
                debug!(person_id = %id, "Person not found");
                Err(PersonStoreError::not_found(id))
            }
        }
    }

    /// List every person, or only customers.
    pub async fn get_all(&self, only_customers: bool) -> Result<Vec<Person>, PersonStoreError> {
        self.repository.get_all(only_customers).await
    }

    /// Fuzzy search on the person's name.
    pub async fn query_by_name(&self, name: &str) -> Result<Vec<Person>, PersonStoreError> {
        if name.trim().is_empty() {
            return Err(PersonStoreError::validation("Name query is required"));
        }
        self.repository.query_by_name(name).await
    }

    /// Persons whose credit limit lies in `min..=max`.
    ///
    /// # Returns
    ///
    /// * `Err(PersonStoreError::ValidationError)` - If `min` is greater than `max`
    pub async fn query_by_credit_limit(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Person>, PersonStoreError> {
        if min > max {
            return Err(PersonStoreError::validation(format!(
                "Invalid credit limit range: {} > {}",
                min, max
            )));
        }
        self.repository.query_by_credit_limit(min, max).await
    }
}
