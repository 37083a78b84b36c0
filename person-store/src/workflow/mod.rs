//! Demonstration workflow for the person store.
//!
//! Creates the index, stores a fixed set of persons, updates one of them, runs every
//! query the repository supports, and deletes the index again.

use std::time::Duration;

use chrono::NaiveDate;
use person_store_repository::{PersonService, PersonStoreError};
use person_store_shared::Person;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Name searched for by the workflow.
pub const NAME_QUERY: &str = "johnson";

/// Configuration for the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// How long to wait for written documents to become searchable.
    pub indexing_wait: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            indexing_wait: Duration::from_millis(1000),
        }
    }
}

/// Everything the workflow stored and read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    /// Persons stored by the workflow, in insertion order, with their final state.
    pub inserted: Vec<Person>,
    /// The updated person as read back by id.
    pub fetched: Person,
    /// Every stored person.
    pub all: Vec<Person>,
    /// Stored persons flagged as customers.
    pub customers: Vec<Person>,
    /// Result of the fuzzy name query for [`NAME_QUERY`].
    pub by_name: Vec<Person>,
    /// Persons with a credit limit between 1500 and 2000 inclusive.
    pub by_credit_limit: Vec<Person>,
}

/// Run the workflow against the given service.
///
/// The index is deleted at the end even when a step fails. If both a step and the
/// cleanup fail, the step's error is returned.
#[instrument(skip_all)]
pub async fn run(
    service: &PersonService,
    config: &WorkflowConfig,
) -> Result<WorkflowReport, PersonStoreError> {
    info!("Starting person store workflow");

    let result = run_steps(service, config).await;
    let cleanup = service.repository().delete_index().await;

    match (result, cleanup) {
        (Ok(report), Ok(())) => {
            info!("Person store workflow completed");
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_error)) => {
            warn!(error = %cleanup_error, "Failed to delete index after workflow failure");
            Err(e)
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, PersonStoreError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        PersonStoreError::validation(format!("Invalid date {}-{}-{}", year, month, day))
    })
}

fn initial_persons() -> Result<Vec<Person>, PersonStoreError> {
    Ok(vec![
        Person::new("John", Some(date(1980, 12, 20)?), Some(Decimal::from(1000)), None)?,
        Person::new("Hilary", Some(date(1985, 8, 5)?), Some(Decimal::from(1500)), Some(true))?,
        Person::new(
            "Anna Johnson",
            Some(date(1980, 11, 21)?),
            Some(Decimal::from(3000)),
            Some(true),
        )?,
        Person::new(
            "Joseph Johnson",
            Some(date(1980, 10, 22)?),
            Some(Decimal::from(2000)),
            Some(false),
        )?,
    ])
}

fn log_persons(label: &str, persons: &[Person]) {
    info!(query = label, count = persons.len(), "Query results");
    for person in persons {
        info!(query = label, person = %person, "Found person");
    }
}

async fn run_steps(
    service: &PersonService,
    config: &WorkflowConfig,
) -> Result<WorkflowReport, PersonStoreError> {
    service.repository().create_index().await?;

    let mut inserted = initial_persons()?;
    for person in inserted.iter_mut() {
        service.insert(person).await?;
    }

    let mut emma = Person::new("Emma", Some(date(1980, 12, 20)?), Some(Decimal::ZERO), None)?;
    service.insert(&mut emma).await?;
    emma.update_credit_limit(Decimal::from(1500))?;
    service.update(&mut emma).await?;

    let emma_id = emma.id().unwrap_or_default().to_string();
    let fetched = service.get(&emma_id).await?;
    info!(person = %fetched, "Fetched updated person");
    inserted.push(emma);

    // Writes are only searchable after the engine refreshes the index
    if !config.indexing_wait.is_zero() {
        info!(wait_ms = config.indexing_wait.as_millis() as u64, "Waiting for indexing");
        sleep(config.indexing_wait).await;
    }

    let all = service.get_all(false).await?;
    log_persons("all", &all);

    let customers = service.get_all(true).await?;
    log_persons("customers", &customers);

    let by_name = service.query_by_name(NAME_QUERY).await?;
    log_persons("name", &by_name);

    let by_credit_limit = service
        .query_by_credit_limit(Decimal::from(1500), Decimal::from(2000))
        .await?;
    log_persons("credit_limit", &by_credit_limit);

    Ok(WorkflowReport {
        inserted,
        fetched,
        all,
        customers,
        by_name,
        by_credit_limit,
    })
}
