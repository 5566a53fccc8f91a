//! Collection index consistency for MemoryStore
//!
//! Random insert/overwrite/delete sequences are replayed against a plain
//! model; after every step `count_in` and `uris_in` must agree with the
//! documents actually tagged.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::thread;

use fixturedb_core::{
    CollectionName, Document, DocumentUri, DuplicatePolicy, Error, InsertOutcome, Permission,
    Storage,
};
use fixturedb_storage::MemoryStore;
use proptest::prelude::*;
use serde_json::json;

const COLLECTIONS: &[&str] = &["red", "blue", "green"];

#[derive(Debug, Clone)]
enum Op {
    Insert {
        uri: usize,
        tags: BTreeSet<usize>,
        overwrite: bool,
    },
    Delete {
        uri: usize,
    },
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..8usize, prop::collection::btree_set(0..COLLECTIONS.len(), 1..=3), any::<bool>())
            .prop_map(|(uri, tags, overwrite)| Op::Insert { uri, tags, overwrite }),
        3 => (0..8usize).prop_map(|uri| Op::Delete { uri }),
        1 => Just(Op::Clear),
    ]
}

fn uri(i: usize) -> DocumentUri {
    DocumentUri::new(format!("/p/doc{}.json", i)).unwrap()
}

fn document(i: usize, tags: &BTreeSet<usize>) -> Document {
    let collections = tags
        .iter()
        .map(|&t| CollectionName::new(COLLECTIONS[t]).unwrap())
        .collect();
    Document::with_collections(
        uri(i),
        json!({ "i": i }).into(),
        collections,
        Permission::default_set(),
    )
    .unwrap()
}

fn assert_consistent(
    store: &MemoryStore,
    model: &BTreeMap<usize, BTreeSet<usize>>,
) -> Result<(), TestCaseError> {
    for (c, name) in COLLECTIONS.iter().enumerate() {
        let expected: Vec<DocumentUri> = model
            .iter()
            .filter(|(_, tags)| tags.contains(&c))
            .map(|(&i, _)| uri(i))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        prop_assert_eq!(store.count_in(name).unwrap(), expected.len());
        prop_assert_eq!(store.uris_in(name).unwrap(), expected);
    }
    prop_assert_eq!(store.len().unwrap(), model.len());
    let live: Vec<String> = model
        .values()
        .flat_map(|tags| tags.iter().map(|&t| COLLECTIONS[t].to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    prop_assert_eq!(store.collection_names().unwrap(), live);
    Ok(())
}

proptest! {
    #[test]
    fn index_tracks_tagged_documents(ops in prop::collection::vec(arb_op(), 1..40)) {
        let store = MemoryStore::new();
        let mut model: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert { uri: i, tags, overwrite } => {
                    let policy = if overwrite {
                        DuplicatePolicy::Overwrite
                    } else {
                        DuplicatePolicy::Reject
                    };
                    let result = store.insert(document(i, &tags), policy);
                    match (model.contains_key(&i), overwrite) {
                        (false, _) => {
                            prop_assert_eq!(result.unwrap(), InsertOutcome::Created);
                            model.insert(i, tags);
                        }
                        (true, true) => {
                            prop_assert_eq!(result.unwrap(), InsertOutcome::Replaced);
                            model.insert(i, tags);
                        }
                        (true, false) => {
                            prop_assert!(matches!(result, Err(Error::DuplicateUri(_))));
                        }
                    }
                }
                Op::Delete { uri: i } => {
                    let removed = store.delete(&uri(i)).unwrap();
                    prop_assert_eq!(removed.is_some(), model.remove(&i).is_some());
                }
                Op::Clear => {
                    prop_assert_eq!(store.clear().unwrap(), model.len());
                    model.clear();
                }
            }
            assert_consistent(&store, &model)?;
        }
    }
}

#[test]
fn concurrent_inserts_keep_counts_exact() {
    let store = Arc::new(MemoryStore::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100 {
                    let n = t * 100 + i;
                    let tags = BTreeSet::from([n % 2]);
                    store
                        .insert(document(n, &tags), DuplicatePolicy::Reject)
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.len().unwrap(), 400);
    assert_eq!(store.count_in("red").unwrap(), 200);
    assert_eq!(store.count_in("blue").unwrap(), 200);
    assert_eq!(store.count_in("green").unwrap(), 0);
}

#[test]
fn concurrent_overwrites_of_one_uri_leave_one_tag_set() {
    let store = Arc::new(MemoryStore::new());
    let handles: Vec<_> = (0..COLLECTIONS.len())
        .map(|c| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..50 {
                    store
                        .insert(document(0, &BTreeSet::from([c])), DuplicatePolicy::Overwrite)
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let total: usize = COLLECTIONS
        .iter()
        .map(|c| store.count_in(c).unwrap())
        .sum();
    assert_eq!(total, 1);
    assert_eq!(store.len().unwrap(), 1);
}
