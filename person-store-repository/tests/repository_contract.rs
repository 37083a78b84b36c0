//! Behavior every `PersonRepository` must show, exercised against the in-memory source.

use chrono::NaiveDate;
use person_store_repository::{PersonRepository, PersonService, PersonStoreError, RepositorySource};
use person_store_shared::Person;
use rust_decimal::Decimal;

fn person(name: &str, birth: (i32, u32, u32), credit_limit: i64, customer: bool) -> Person {
    Person::new(
        name,
        NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2),
        Some(Decimal::from(credit_limit)),
        Some(customer),
    )
    .unwrap()
}

fn sorted_names(persons: &[Person]) -> Vec<&str> {
    let mut names: Vec<&str> = persons.iter().map(Person::name).collect();
    names.sort();
    names
}

async fn seeded() -> Box<dyn PersonRepository> {
    let repository = RepositorySource::InMemory.into_repository().unwrap();
    repository.create_index().await.unwrap();

    for mut p in [
        person("John", (1980, 12, 20), 1000, false),
        person("Hilary", (1985, 8, 5), 1500, true),
        person("Anna Johnson", (1980, 11, 21), 3000, true),
        person("Joseph Johnson", (1980, 10, 22), 2000, false),
    ] {
        repository.save(&mut p).await.unwrap();
        assert!(p.is_persisted());
    }

    repository
}

#[tokio::test]
async fn saved_person_round_trips() {
    let repository = seeded().await;

    let mut emma = person("Emma", (1980, 12, 20), 0, false);
    repository.save(&mut emma).await.unwrap();
    let id = emma.id().unwrap().to_string();

    let stored = repository.get(&id).await.unwrap().unwrap();

    assert_eq!(stored, emma);
    assert_eq!(stored.birth_date(), NaiveDate::from_ymd_opt(1980, 12, 20));
    assert_eq!(stored.credit_limit(), Some(Decimal::ZERO));
    assert!(!stored.is_customer());
}

#[tokio::test]
async fn saving_again_replaces_the_document() {
    let repository = seeded().await;

    let mut emma = person("Emma", (1980, 12, 20), 0, false);
    repository.save(&mut emma).await.unwrap();
    let id = emma.id().unwrap().to_string();

    emma.update_credit_limit(Decimal::from(1500)).unwrap();
    repository.save(&mut emma).await.unwrap();

    assert_eq!(emma.id(), Some(id.as_str()));
    let stored = repository.get(&id).await.unwrap().unwrap();
    assert_eq!(stored.credit_limit(), Some(Decimal::from(1500)));
    assert_eq!(repository.get_all(false).await.unwrap().len(), 5);
}

#[tokio::test]
async fn get_unknown_id_is_none() {
    let repository = seeded().await;
    assert_eq!(repository.get("no-such-person").await.unwrap(), None);
}

#[tokio::test]
async fn get_all_filters_customers() {
    let repository = seeded().await;

    let all = repository.get_all(false).await.unwrap();
    assert_eq!(
        sorted_names(&all),
        vec!["Anna Johnson", "Hilary", "John", "Joseph Johnson"]
    );
    assert!(all.iter().all(Person::is_persisted));

    let customers = repository.get_all(true).await.unwrap();
    assert_eq!(sorted_names(&customers), vec!["Anna Johnson", "Hilary"]);
}

#[tokio::test]
async fn query_by_name_is_fuzzy() {
    let repository = seeded().await;

    // "John" is three edits away from "johnson", so it falls outside the tolerance.
    // A real engine may still rank it when its analyzer splits tokens differently;
    // that is accepted fuzziness, not a bug.
    let johnsons = repository.query_by_name("johnson").await.unwrap();
    assert_eq!(sorted_names(&johnsons), vec!["Anna Johnson", "Joseph Johnson"]);

    let misspelled = repository.query_by_name("Jonhson").await.unwrap();
    assert_eq!(sorted_names(&misspelled), vec!["Anna Johnson", "Joseph Johnson"]);

    let none = repository.query_by_name("Zebediah").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn query_by_credit_limit_is_inclusive() {
    let repository = seeded().await;

    let found = repository
        .query_by_credit_limit(Decimal::from(1500), Decimal::from(2000))
        .await
        .unwrap();

    assert_eq!(sorted_names(&found), vec!["Hilary", "Joseph Johnson"]);
}

#[tokio::test]
async fn index_lifecycle_is_idempotent() {
    let repository = seeded().await;

    repository.create_index().await.unwrap();
    assert_eq!(repository.get_all(false).await.unwrap().len(), 4);

    repository.delete_index().await.unwrap();
    repository.delete_index().await.unwrap();

    let err = repository.get_all(false).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn service_reports_not_found() {
    let service = PersonService::new(seeded().await);

    let err = service.get("no-such-person").await.unwrap_err();
    assert_eq!(err, PersonStoreError::not_found("no-such-person"));

    let mut unsaved = person("Emma", (1980, 12, 20), 0, false);
    let err = service.update(&mut unsaved).await.unwrap_err();
    assert!(matches!(err, PersonStoreError::ValidationError(_)));
    assert_eq!(unsaved.id(), None);
}
