//! In-memory transport implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use person_store_shared::PersonDocument;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::PersonStoreError;
use crate::interfaces::DocumentTransport;
use crate::query::{PersonQuery, NAME_FUZZINESS};
use crate::types::DocumentHit;

/// Document transport that keeps every document in process memory.
///
/// Mirrors the engine's observable behavior: writes create the index when it is
/// missing, reads against a missing index fail with a 404, and ids are assigned as
/// UUIDs when the caller does not supply one. Documents become visible to searches
/// immediately.
///
/// Name queries emulate the engine's fuzzy `match`: the query and the stored name are
/// lowercased and split on whitespace, and a document matches when any query token
/// is within two edits of any name token.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    index: RwLock<Option<HashMap<String, PersonDocument>>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents, or `None` when the index does not exist.
    pub async fn document_count(&self) -> Option<usize> {
        self.index.read().await.as_ref().map(HashMap::len)
    }
}

fn missing_index() -> PersonStoreError {
    PersonStoreError::request_failed(404, Some("no such index".to_string()))
}

fn is_match(query: &PersonQuery, document: &PersonDocument) -> bool {
    match query {
        PersonQuery::ById(_) => false,
        PersonQuery::All { only_customers } => !only_customers || document.customer == Some(true),
        PersonQuery::ByName(text) => fuzzy_match(text, &document.name),
        PersonQuery::ByCreditLimitRange { min, max } => document
            .credit_limit
            .is_some_and(|limit| *min <= limit && limit <= *max),
    }
}

fn fuzzy_match(query: &str, name: &str) -> bool {
    let name_tokens: Vec<String> = name.split_whitespace().map(str::to_lowercase).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .any(|token| {
            name_tokens
                .iter()
                .any(|candidate| edit_distance(&token, candidate) <= usize::from(NAME_FUZZINESS))
        })
}

/// Edit distance counting insertions, deletions, substitutions and transpositions of
/// adjacent characters as one edit each.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // rows[i][j] = distance between a[..i] and b[..j]
    let mut rows = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in rows.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in rows[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (rows[i - 1][j] + 1)
                .min(rows[i][j - 1] + 1)
                .min(rows[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(rows[i - 2][j - 2] + 1);
            }
            rows[i][j] = best;
        }
    }

    rows[a.len()][b.len()]
}

#[async_trait]
impl DocumentTransport for InMemoryTransport {
    async fn index_document(
        &self,
        id: Option<&str>,
        document: &PersonDocument,
    ) -> Result<String, PersonStoreError> {
        let doc_id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut index = self.index.write().await;
        index
            .get_or_insert_with(HashMap::new)
            .insert(doc_id.clone(), document.clone());

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(doc_id)
    }

    async fn fetch(&self, query: &PersonQuery) -> Result<Vec<DocumentHit>, PersonStoreError> {
        let index = self.index.read().await;
        let documents = index.as_ref().ok_or_else(missing_index)?;

        if let PersonQuery::ById(id) = query {
            return Ok(documents
                .get(id)
                .map(|document| vec![DocumentHit::new(id.as_str(), document.clone())])
                .unwrap_or_default());
        }

        Ok(documents
            .iter()
            .filter(|(_, document)| is_match(query, document))
            .map(|(id, document)| DocumentHit::new(id.as_str(), document.clone()))
            .collect())
    }

    async fn create_index(&self) -> Result<(), PersonStoreError> {
        let mut index = self.index.write().await;
        if index.is_some() {
            warn!("Index already exists");
        } else {
            *index = Some(HashMap::new());
            info!("Created index");
        }
        Ok(())
    }

    async fn delete_index(&self) -> Result<(), PersonStoreError> {
        let mut index = self.index.write().await;
        if index.take().is_some() {
            info!("Deleted index");
        } else {
            warn!("Index does not exist, nothing to delete");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn document(name: &str, credit_limit: Option<i64>, customer: bool) -> PersonDocument {
        PersonDocument {
            name: name.to_string(),
            birth_date: None,
            credit_limit: credit_limit.map(Decimal::from),
            customer: Some(customer),
        }
    }

    async fn names(transport: &InMemoryTransport, query: PersonQuery) -> Vec<String> {
        let mut names: Vec<String> = transport
            .fetch(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|hit| hit.document.name)
            .collect();
        names.sort();
        names
    }

    async fn seeded() -> InMemoryTransport {
        let transport = InMemoryTransport::new();
        for doc in [
            document("John", Some(1000), false),
            document("Hilary", Some(1500), true),
            document("Anna Johnson", Some(3000), true),
            document("Joseph Johnson", Some(2000), false),
            document("Nobody", None, false),
        ] {
            transport.index_document(None, &doc).await.unwrap();
        }
        transport
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("johnson", "johnson"), 0);
        assert_eq!(edit_distance("jonson", "johnson"), 1);
        assert_eq!(edit_distance("jhonson", "johnson"), 1);
        assert_eq!(edit_distance("jonsen", "johnson"), 2);
        assert_eq!(edit_distance("john", "johnson"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("héllo", "hello"), 1);
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("johnson", "Anna Johnson"));
        assert!(fuzzy_match("JOHNSNO", "Joseph Johnson"));
        assert!(fuzzy_match("anna smith", "Anna Johnson"));
        assert!(!fuzzy_match("johnson", "John"));
        assert!(!fuzzy_match("", "John"));
    }

    #[tokio::test]
    async fn test_index_assigns_uuid() {
        let transport = InMemoryTransport::new();

        let id = transport
            .index_document(None, &document("John", None, false))
            .await
            .unwrap();

        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(transport.document_count().await, Some(1));
    }

    #[tokio::test]
    async fn test_index_with_id_replaces() {
        let transport = InMemoryTransport::new();

        transport
            .index_document(Some("emma"), &document("Emma", Some(0), false))
            .await
            .unwrap();
        let id = transport
            .index_document(Some("emma"), &document("Emma", Some(1500), false))
            .await
            .unwrap();

        assert_eq!(id, "emma");
        assert_eq!(transport.document_count().await, Some(1));

        let hits = transport.fetch(&PersonQuery::by_id("emma")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.credit_limit, Some(Decimal::from(1500)));
    }

    #[tokio::test]
    async fn test_fetch_by_unknown_id() {
        let transport = seeded().await;
        let hits = transport.fetch(&PersonQuery::by_id("unknown")).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_and_customers() {
        let transport = seeded().await;

        assert_eq!(names(&transport, PersonQuery::all(false)).await.len(), 5);
        assert_eq!(
            names(&transport, PersonQuery::all(true)).await,
            vec!["Anna Johnson", "Hilary"]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_name() {
        let transport = seeded().await;

        assert_eq!(
            names(&transport, PersonQuery::by_name("johnson")).await,
            vec!["Anna Johnson", "Joseph Johnson"]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_credit_limit_is_inclusive() {
        let transport = seeded().await;

        assert_eq!(
            names(
                &transport,
                PersonQuery::by_credit_limit_range(Decimal::from(1500), Decimal::from(2000))
            )
            .await,
            vec!["Hilary", "Joseph Johnson"]
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_index() {
        let transport = InMemoryTransport::new();

        let err = transport.fetch(&PersonQuery::all(false)).await.unwrap_err();
        assert!(matches!(err, PersonStoreError::RequestFailed { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_index_lifecycle() {
        let transport = InMemoryTransport::new();
        assert_eq!(transport.document_count().await, None);

        transport.create_index().await.unwrap();
        transport.create_index().await.unwrap();
        assert_eq!(transport.document_count().await, Some(0));

        transport.delete_index().await.unwrap();
        transport.delete_index().await.unwrap();
        assert_eq!(transport.document_count().await, None);
    }
}
