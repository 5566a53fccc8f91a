//! FixtureStore: collection-scoped document store facade
//!
//! ## Design: STATELESS FACADE
//!
//! FixtureStore holds an `Arc<dyn Storage>` plus its insert settings
//! (duplicate policy, recorded permissions, clear-before-load). All document
//! state lives in the backend, so several FixtureStores over one backend see
//! the same data.
//!
//! ## Failure isolation
//!
//! `insert_batch` processes documents strictly in order. A document-level
//! error is recorded in the `BatchResult` and the loop moves on. A fatal
//! error (store offline, read-only) ends the batch and is returned.

use std::sync::Arc;

use fixturedb_core::{
    CollectionName, Document, DocumentUri, DuplicatePolicy, Error, InsertOutcome, Permission,
    Result, Storage,
};
use fixturedb_storage::MemoryStore;
use tracing::{debug, info, warn};

use crate::batch::{BatchResult, FixtureDocument};
use crate::config::LoaderConfig;

/// Collection-scoped fixture store
///
/// # Example
///
/// ```
/// use fixturedb_engine::{FixtureDocument, FixtureStore};
/// use serde_json::json;
///
/// let store = FixtureStore::in_memory();
/// let result = store
///     .insert_batch(
///         &[FixtureDocument::new("/test-data/red/song1.json", json!({"id": "red-001"}))],
///         "red",
///     )
///     .unwrap();
/// assert_eq!(result.inserted_count, 1);
/// assert_eq!(store.count("red").unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct FixtureStore {
    storage: Arc<dyn Storage>,
    policy: DuplicatePolicy,
    permissions: Vec<Permission>,
    clear_existing: bool,
}

impl FixtureStore {
    /// Create a store over a backend with default settings
    /// (reject duplicates, default permissions, no clearing)
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            policy: DuplicatePolicy::default(),
            permissions: Permission::default_set(),
            clear_existing: false,
        }
    }

    /// Create a store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Create a store over a backend with settings from a config.
    ///
    /// # Errors
    ///
    /// `Error::Config` if the config's duplicate policy is invalid.
    pub fn from_config(storage: Arc<dyn Storage>, config: &LoaderConfig) -> Result<Self> {
        Ok(Self {
            storage,
            policy: config.duplicate_policy()?,
            permissions: config.permission_set(),
            clear_existing: config.clear_existing,
        })
    }

    /// Set the duplicate URI policy
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the permissions recorded on inserted documents
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Clear target collections at the start of `load_all`
    pub fn with_clear_existing(mut self, clear_existing: bool) -> Self {
        self.clear_existing = clear_existing;
        self
    }

    /// Duplicate URI policy in effect
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Whether `load_all` clears target collections first
    pub fn clear_existing(&self) -> bool {
        self.clear_existing
    }

    /// Get the underlying backend
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert `documents` in order, tagging each with `collection`.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchResult)` - every document was attempted; per-document
    ///   failures are listed in `failures`
    /// * `Err(InvalidInput)` - `documents` is empty
    /// * `Err(InvalidCollection)` - `collection` is not a valid name
    /// * `Err(Unavailable | ReadOnly)` - the backend refused the batch;
    ///   documents already inserted stay inserted
    pub fn insert_batch(
        &self,
        documents: &[FixtureDocument],
        collection: &str,
    ) -> Result<BatchResult> {
        if documents.is_empty() {
            return Err(Error::invalid_input(format!(
                "batch for collection '{}' has no documents",
                collection
            )));
        }
        let collection_name = CollectionName::new(collection)?;
        self.storage.check_writable()?;

        let mut result = BatchResult::new(collection);
        for fixture in documents {
            match self.insert_one(fixture, &collection_name) {
                Ok((uri, outcome)) => {
                    info!(
                        target: "fixturedb::load",
                        uri = %uri,
                        collection,
                        ?outcome,
                        "Inserted document"
                    );
                    result.record_success(uri, outcome);
                }
                Err(e) if e.is_fatal() => {
                    warn!(
                        target: "fixturedb::load",
                        uri = %fixture.uri,
                        collection,
                        error = %e,
                        "Store failed mid-batch"
                    );
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        target: "fixturedb::load",
                        uri = %fixture.uri,
                        collection,
                        error = %e,
                        "Failed to insert document"
                    );
                    result.record_failure(fixture.uri.clone(), e);
                }
            }
        }

        info!(
            target: "fixturedb::load",
            collection,
            inserted = result.inserted_count,
            failed = result.failures.len(),
            "Batch complete"
        );
        Ok(result)
    }

    fn insert_one(
        &self,
        fixture: &FixtureDocument,
        collection: &CollectionName,
    ) -> Result<(DocumentUri, InsertOutcome)> {
        let uri = DocumentUri::new(fixture.uri.as_str())?;
        let document = Document::new(
            uri.clone(),
            fixture.content.clone(),
            collection.clone(),
            self.permissions.clone(),
        )?;
        let outcome = self.storage.insert(document, self.policy)?;
        Ok((uri, outcome))
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Number of documents tagged with `collection`.
    ///
    /// Unknown collections, including names that could never be valid,
    /// count as 0. Errors only come from the backend.
    pub fn count(&self, collection: &str) -> Result<usize> {
        self.storage.count_in(collection)
    }

    /// Fetch a document by URI. Invalid URIs are simply absent.
    pub fn get(&self, uri: &str) -> Result<Option<Document>> {
        match DocumentUri::new(uri) {
            Ok(uri) => self.storage.get(&uri),
            Err(_) => Ok(None),
        }
    }

    /// URIs tagged with `collection`, sorted
    pub fn uris(&self, collection: &str) -> Result<Vec<DocumentUri>> {
        self.storage.uris_in(collection)
    }

    /// Total number of documents
    pub fn len(&self) -> Result<usize> {
        self.storage.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> Result<bool> {
        self.storage.is_empty()
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Delete one document by URI, returning it if it existed
    pub fn delete(&self, uri: &str) -> Result<Option<Document>> {
        match DocumentUri::new(uri) {
            Ok(uri) => self.storage.delete(&uri),
            Err(_) => Ok(None),
        }
    }

    /// Delete every document tagged with any of `collections`.
    ///
    /// Returns how many documents were deleted. A document tagged with two
    /// of the collections is deleted (and counted) once.
    pub fn clear_collections<S: AsRef<str>>(&self, collections: &[S]) -> Result<usize> {
        self.storage.check_writable()?;
        let mut removed = 0;
        for collection in collections {
            for uri in self.storage.uris_in(collection.as_ref())? {
                if self.storage.delete(&uri)?.is_some() {
                    removed += 1;
                }
            }
        }
        info!(target: "fixturedb::load", removed, "Cleared existing documents");
        Ok(removed)
    }

    /// Remove every document from the store
    pub fn reset(&self) -> Result<usize> {
        let removed = self.storage.clear()?;
        debug!(target: "fixturedb::load", removed, "Store reset");
        Ok(removed)
    }
}

impl std::fmt::Debug for FixtureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureStore")
            .field("policy", &self.policy)
            .field("permissions", &self.permissions)
            .field("clear_existing", &self.clear_existing)
            .finish_non_exhaustive()
    }
}
