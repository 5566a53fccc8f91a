//! URI collisions across collections and failure isolation

use crate::common::*;
use serde_json::json;

fn colliding_batches() -> Vec<Batch> {
    vec![
        Batch::new(
            "red",
            vec![FixtureDocument::new("/shared/doc.json", json!({ "from": "red" }))],
        ),
        Batch::new(
            "blue",
            vec![FixtureDocument::new("/shared/doc.json", json!({ "from": "blue" }))],
        ),
    ]
}

#[test]
fn one_collision_in_a_batch_fails_only_that_document() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    let batch = Batch::new(
        "red",
        vec![
            FixtureDocument::new("/test-data/red/new1.json", json!({ "id": "red-006" })),
            FixtureDocument::new("/test-data/red/song1.json", json!({ "id": "red-001" })),
            FixtureDocument::new("/test-data/red/new2.json", json!({ "id": "red-007" })),
        ],
    );
    let result = store.insert_batch(&batch.documents, &batch.collection).unwrap();

    assert_eq!(result.inserted_count, batch.documents.len() - 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].uri, "/test-data/red/song1.json");
    // the document after the collision was still attempted
    assert_eq!(result.inserted[1].uri.as_str(), "/test-data/red/new2.json");
    assert_eq!(store.count("red").unwrap(), 7);
}

#[test]
fn colliding_uri_under_reject_keeps_first_document() {
    let store = FixtureStore::in_memory();
    let summary = store.load_all(&colliding_batches()).unwrap();

    assert_eq!(summary.total_inserted, 1);
    assert_eq!(summary.total_failed, 1);
    assert_eq!(store.count("red").unwrap(), 1);
    assert_eq!(store.count("blue").unwrap(), 0);

    let doc = store.get("/shared/doc.json").unwrap().unwrap();
    assert_eq!(doc.content()["from"], "red");
}

#[test]
fn colliding_uri_under_overwrite_moves_the_document() {
    let store = FixtureStore::in_memory().with_policy(DuplicatePolicy::Overwrite);
    let summary = store.load_all(&colliding_batches()).unwrap();

    assert_eq!(summary.total_inserted, 2);
    assert_eq!(store.count("red").unwrap(), 0);
    assert_eq!(store.count("blue").unwrap(), 1);
    assert_eq!(store.len().unwrap(), 1);

    let doc = store.get("/shared/doc.json").unwrap().unwrap();
    assert_eq!(doc.content()["from"], "blue");
    assert!(!doc.in_collection("red"));
}

#[test]
fn bad_documents_do_not_block_good_ones() {
    let store = FixtureStore::in_memory();
    let batch = Batch::new(
        "red",
        vec![
            FixtureDocument::new("/test-data/red/ok1.json", json!({ "n": 1 })),
            FixtureDocument::new("no-leading-slash.json", json!({ "n": 2 })),
            FixtureDocument::new("/test-data/red/scalar.json", json!(42)),
            FixtureDocument::new("/test-data/red/ok2.json", json!({ "n": 3 })),
        ],
    );

    let summary = store.load_all(&[batch]).unwrap();
    assert_eq!(summary.total_inserted, 2);
    assert_eq!(summary.total_failed, 2);
    let failed: Vec<&str> = summary.failures().map(|f| f.uri.as_str()).collect();
    assert_eq!(failed, vec!["no-leading-slash.json", "/test-data/red/scalar.json"]);
    assert_eq!(store.count("red").unwrap(), 2);
}

#[test]
fn invalid_collection_aborts_before_any_insert() {
    let store = FixtureStore::in_memory();
    let bad = numbered_batch("bad name", 2);

    let err = store
        .load_all(&[numbered_batch("red", 2), bad])
        .unwrap_err();
    assert!(matches!(err, Error::LoadAborted { batch: 1, .. }));
    assert_eq!(store.count("red").unwrap(), 2);
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn offline_backend_aborts_the_load() {
    let (store, backend) = store_with_backend();
    backend.set_online(false);

    let err = store.load_all(&fixtures::reference_batches()).unwrap_err();
    let Error::LoadAborted { batch, source, .. } = err else {
        panic!("expected LoadAborted");
    };
    assert_eq!(batch, 0);
    assert!(matches!(*source, Error::Unavailable(_)));
}
