//! Loading the same batches more than once

use std::sync::Arc;

use crate::common::*;

#[test]
fn reload_under_reject_fails_every_document_and_keeps_counts() {
    let store = FixtureStore::in_memory();
    load_reference(&store);

    let second = store.load_all(&fixtures::reference_batches()).unwrap();
    assert_eq!(second.total_inserted, 0);
    assert_eq!(second.total_failed, 10);
    assert!(second
        .failures()
        .all(|f| f.error.contains("already exists")));
    assert_reference_counts(&store);
}

#[test]
fn reload_under_overwrite_replaces_and_keeps_counts() {
    let store = FixtureStore::in_memory().with_policy(DuplicatePolicy::Overwrite);
    load_reference(&store);

    let second = store.load_all(&fixtures::reference_batches()).unwrap();
    assert_eq!(second.total_inserted, 10);
    assert!(second.is_clean());
    assert_eq!(
        second.batches.iter().map(|b| b.replaced_count()).sum::<usize>(),
        10
    );
    assert_reference_counts(&store);
}

#[test]
fn reload_with_clear_existing_is_clean() {
    let store = FixtureStore::in_memory().with_clear_existing(true);
    load_reference(&store);
    load_reference(&store);
    assert_reference_counts(&store);
}

#[test]
fn clear_existing_leaves_other_collections_alone() {
    let store = FixtureStore::in_memory().with_clear_existing(true);
    store.load_all(&[numbered_batch("green", 3)]).unwrap();
    load_reference(&store);

    assert_eq!(store.count("green").unwrap(), 3);
    assert_reference_counts(&store);
}

#[test]
fn config_file_drives_the_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(fixturedb::CONFIG_FILE_NAME);
    std::fs::write(&path, "on_duplicate = \"overwrite\"\nclear_existing = false\n").unwrap();

    let config = fixturedb::LoaderConfig::from_file(&path).unwrap();
    let store = FixtureStore::from_config(Arc::new(MemoryStore::new()), &config).unwrap();
    assert_eq!(store.policy(), DuplicatePolicy::Overwrite);

    load_reference(&store);
    load_reference(&store);
    assert_reference_counts(&store);
}
