//! Loading the reference set into an empty store

use crate::common::*;
use fixturedb::{Capability, Permission};

#[test]
fn reference_load_reports_ten_documents() {
    let store = FixtureStore::in_memory();
    let summary = load_reference(&store);

    assert_eq!(summary.total_inserted, 10);
    assert_eq!(summary.total_failed, 0);
    assert_eq!(summary.per_collection_inserted.get("red"), Some(&5));
    assert_eq!(summary.per_collection_inserted.get("blue"), Some(&5));
    assert_eq!(summary.per_collection_inserted.len(), 2);
}

#[test]
fn reference_counts_match_expectations() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    assert_eq!(store.count("red").unwrap(), 5);
    assert_eq!(store.count("blue").unwrap(), 5);
    assert_eq!(store.count("green").unwrap(), 0);
    assert_eq!(store.len().unwrap(), 10);
    assert_reference_counts(&store);
}

#[test]
fn every_reference_document_round_trips_by_uri() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    for batch in fixtures::reference_batches() {
        for fixture in &batch.documents {
            let doc = store
                .get(&fixture.uri)
                .unwrap()
                .unwrap_or_else(|| panic!("{} missing", fixture.uri));
            assert_eq!(doc.content(), &fixture.content);
            assert!(doc.in_collection(&batch.collection));
            assert_eq!(doc.collections().len(), 1);
        }
    }
}

#[test]
fn payload_ids_follow_collection_numbering() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    let doc = store.get("/test-data/red/song1.json").unwrap().unwrap();
    assert_eq!(doc.content()["id"], "red-001");
    assert_eq!(doc.content()["title"], "Tom Sawyer");

    let doc = store.get("/test-data/blue/event1.json").unwrap().unwrap();
    assert_eq!(doc.content()["id"], "blue-005");
}

#[test]
fn uris_are_listed_per_collection() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    let red: Vec<String> = store
        .uris("red")
        .unwrap()
        .iter()
        .map(|u| u.to_string())
        .collect();
    assert_eq!(
        red,
        vec![
            "/test-data/red/article1.json",
            "/test-data/red/customer1.json",
            "/test-data/red/product1.json",
            "/test-data/red/song1.json",
            "/test-data/red/song2.json",
        ]
    );
}

#[test]
fn documents_carry_default_permissions() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    let doc = store.get("/test-data/blue/song3.json").unwrap().unwrap();
    assert_eq!(
        doc.permissions(),
        &[
            Permission::new("rest-reader", Capability::Read),
            Permission::new("rest-writer", Capability::Update),
        ]
    );
}

#[test]
fn reset_empties_the_store() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    assert_eq!(store.reset().unwrap(), 10);
    assert_eq!(store.count("red").unwrap(), 0);
    assert!(store.is_empty().unwrap());

    load_reference(&store);
    assert_reference_counts(&store);
}
