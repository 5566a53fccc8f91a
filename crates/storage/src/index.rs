//! Secondary index: collection → URIs
//!
//! Collection membership is a many-to-many tag relation. The index is
//! derived entirely from the documents' tag sets; it is updated under the
//! same lock as the document map so the two never disagree.

use fixturedb_core::{CollectionName, DocumentUri};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Secondary index: CollectionName → URIs
///
/// Enables O(1) counts and O(collection size) listings instead of
/// scanning every stored document.
#[derive(Debug, Default)]
pub struct CollectionIndex {
    index: FxHashMap<CollectionName, BTreeSet<DocumentUri>>,
}

impl CollectionIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
        }
    }

    /// Add `uri` under every collection in `tags`
    pub fn insert<'a>(
        &mut self,
        uri: &DocumentUri,
        tags: impl IntoIterator<Item = &'a CollectionName>,
    ) {
        for tag in tags {
            self.index.entry(tag.clone()).or_default().insert(uri.clone());
        }
    }

    /// Remove `uri` from every collection in `tags`
    ///
    /// Collections left with no members are dropped, so the index never
    /// accumulates empty sets.
    pub fn remove<'a>(
        &mut self,
        uri: &DocumentUri,
        tags: impl IntoIterator<Item = &'a CollectionName>,
    ) {
        for tag in tags {
            if let Some(uris) = self.index.get_mut(tag) {
                uris.remove(uri);
                if uris.is_empty() {
                    self.index.remove(tag);
                }
            }
        }
    }

    /// Members of a collection, or None if it has none
    pub fn get(&self, collection: &str) -> Option<&BTreeSet<DocumentUri>> {
        self.index.get(collection)
    }

    /// Number of documents tagged with `collection`
    pub fn count(&self, collection: &str) -> usize {
        self.index.get(collection).map_or(0, BTreeSet::len)
    }

    /// Collections that currently have at least one member
    pub fn collections(&self) -> impl Iterator<Item = &CollectionName> {
        self.index.keys()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the number of non-empty collections
    pub fn len(&self) -> usize {
        self.index.len()
    }
}
