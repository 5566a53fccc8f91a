//! MemoryStore: in-memory document backend
//!
//! This module implements the Storage trait using:
//! - `BTreeMap<DocumentUri, Vec<u8>>` holding MessagePack-encoded documents
//! - `CollectionIndex` for collection-scoped counts and listings
//! - a single `parking_lot::RwLock` over both, so the document map and the
//!   collection index always change together
//!
//! # Design Notes
//!
//! - **Encode outside the lock**: a document is serialized before the write
//!   lock is taken. An encoding failure leaves the store untouched, and a
//!   reader never observes a half-written document.
//! - **Access mode and availability**: the store can be opened read-only or
//!   taken offline. Both surface as fatal errors so callers can tell "the
//!   store refused the whole load" apart from "some documents failed".

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use fixturedb_core::{
    Document, DocumentUri, DuplicatePolicy, Error, InsertOutcome, Result, Storage,
};

use crate::index::CollectionIndex;

/// Whether the store accepts writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Reads and writes allowed
    #[default]
    ReadWrite,
    /// Writes fail with `Error::ReadOnly`
    ReadOnly,
}

#[derive(Debug, Default)]
struct Inner {
    docs: BTreeMap<DocumentUri, Vec<u8>>,
    collections: CollectionIndex,
}

/// In-memory storage backend
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicBool`.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    access_mode: AccessMode,
    online: AtomicBool,
}

impl MemoryStore {
    /// Create an empty read-write store
    pub fn new() -> Self {
        Self::with_access_mode(AccessMode::ReadWrite)
    }

    /// Create an empty store with the given access mode
    pub fn with_access_mode(access_mode: AccessMode) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            access_mode,
            online: AtomicBool::new(true),
        }
    }

    /// Access mode this store was opened with
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    /// Take the store offline or bring it back.
    ///
    /// While offline every operation fails with `Error::Unavailable`.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Whether the store is reachable
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Names of collections that currently have members, sorted
    pub fn collection_names(&self) -> Result<Vec<String>> {
        self.ensure_online()?;
        let inner = self.inner.read();
        let mut names: Vec<String> = inner
            .collections
            .collections()
            .map(|c| c.as_str().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn ensure_online(&self) -> Result<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(Error::unavailable("memory store is offline"))
        }
    }

    fn encode(document: &Document) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(document).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Document> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStore {
    fn check_writable(&self) -> Result<()> {
        self.ensure_online()?;
        match self.access_mode {
            AccessMode::ReadWrite => Ok(()),
            AccessMode::ReadOnly => Err(Error::ReadOnly),
        }
    }

    fn insert(&self, document: Document, policy: DuplicatePolicy) -> Result<InsertOutcome> {
        self.check_writable()?;
        let bytes = Self::encode(&document)?;
        let uri = document.uri().clone();

        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let previous = match inner.docs.get(&uri) {
            Some(_) if policy == DuplicatePolicy::Reject => {
                return Err(Error::DuplicateUri(uri));
            }
            Some(bytes) => Some(Self::decode(bytes)?),
            None => None,
        };
        let outcome = match previous {
            Some(previous) => {
                inner.collections.remove(&uri, previous.collections());
                InsertOutcome::Replaced
            }
            None => InsertOutcome::Created,
        };

        inner.collections.insert(&uri, document.collections());
        inner.docs.insert(uri.clone(), bytes);
        debug!(uri = %uri, ?outcome, "stored document");
        Ok(outcome)
    }

    fn get(&self, uri: &DocumentUri) -> Result<Option<Document>> {
        self.ensure_online()?;
        let inner = self.inner.read();
        inner.docs.get(uri).map(|b| Self::decode(b)).transpose()
    }

    fn delete(&self, uri: &DocumentUri) -> Result<Option<Document>> {
        self.check_writable()?;
        let mut inner = self.inner.write();
        let Some(bytes) = inner.docs.get(uri) else {
            return Ok(None);
        };
        let document = Self::decode(bytes)?;
        inner.docs.remove(uri);
        inner.collections.remove(uri, document.collections());
        debug!(uri = %uri, "deleted document");
        Ok(Some(document))
    }

    fn count_in(&self, collection: &str) -> Result<usize> {
        self.ensure_online()?;
        Ok(self.inner.read().collections.count(collection))
    }

    fn uris_in(&self, collection: &str) -> Result<Vec<DocumentUri>> {
        self.ensure_online()?;
        let inner = self.inner.read();
        Ok(inner
            .collections
            .get(collection)
            .map(|uris| uris.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn len(&self) -> Result<usize> {
        self.ensure_online()?;
        Ok(self.inner.read().docs.len())
    }

    fn clear(&self) -> Result<usize> {
        self.check_writable()?;
        let mut inner = self.inner.write();
        let removed = inner.docs.len();
        inner.docs.clear();
        inner.collections.clear();
        debug!(removed, "cleared store");
        Ok(removed)
    }
}
