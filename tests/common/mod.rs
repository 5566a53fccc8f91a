//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

pub use fixturedb::{
    fixtures, Batch, DuplicatePolicy, Error, FixtureDocument, FixtureStore, LoadSummary,
    MemoryStore, Storage,
};
use serde_json::json;

/// A store over a fresh backend, returning the backend too so tests can
/// flip it offline or inspect it directly.
pub fn store_with_backend() -> (FixtureStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    (FixtureStore::new(backend.clone()), backend)
}

/// Load the reference set and assert it went in cleanly.
pub fn load_reference(store: &FixtureStore) -> LoadSummary {
    let summary = store
        .load_all(&fixtures::reference_batches())
        .expect("reference load");
    assert!(summary.is_clean(), "reference load had failures");
    summary
}

/// `n` small documents under `/test-data/<collection>/`
pub fn numbered_batch(collection: &str, n: usize) -> Batch {
    let docs = (1..=n)
        .map(|i| {
            FixtureDocument::new(
                format!("/test-data/{}/doc{}.json", collection, i),
                json!({ "id": format!("{}-{:03}", collection, i), "collections": [collection] }),
            )
        })
        .collect();
    Batch::new(collection, docs)
}

/// Live counts for the given collections
pub fn counts(store: &FixtureStore, collections: &[&str]) -> BTreeMap<String, usize> {
    collections
        .iter()
        .map(|c| (c.to_string(), store.count(c).expect("count")))
        .collect()
}

/// Assert the store holds exactly the reference counts
pub fn assert_reference_counts(store: &FixtureStore) {
    assert_eq!(
        counts(store, &[fixtures::RED, fixtures::BLUE]),
        fixtures::reference_expectations()
    );
    assert!(store
        .verify(&fixtures::reference_expectations())
        .expect("verify")
        .is_empty());
}
