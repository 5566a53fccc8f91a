//! Storage abstraction
//!
//! The `Storage` trait is the seam between the fixture store facade and
//! whatever actually holds the documents. The in-memory backend lives in
//! `fixturedb-storage`; tests plug in failing or flaky backends through the
//! same trait object.

use crate::document::Document;
use crate::error::Result;
use crate::types::{DocumentUri, DuplicatePolicy, InsertOutcome};

/// Document storage backend
///
/// Thread safety: all methods must be safe to call from multiple threads
/// (requires Send + Sync), even though the loader itself is single-writer.
///
/// Invariants every implementation must keep:
/// - URIs are unique.
/// - `count_in(c)` equals the number of stored documents whose tag set
///   contains `c`.
/// - An insert is all-or-nothing: afterwards the document is either fully
///   visible or not present.
pub trait Storage: Send + Sync {
    /// Fail unless the backend currently accepts writes.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the backend cannot be reached, `ReadOnly` if it
    /// refuses writes.
    fn check_writable(&self) -> Result<()>;

    /// Insert a document under the given duplicate policy.
    ///
    /// # Errors
    ///
    /// `DuplicateUri` if the URI exists and `policy` is `Reject`.
    /// Backend errors otherwise.
    fn insert(&self, document: Document, policy: DuplicatePolicy) -> Result<InsertOutcome>;

    /// Fetch a document by URI
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, uri: &DocumentUri) -> Result<Option<Document>>;

    /// Remove a document by URI, returning it if it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn delete(&self, uri: &DocumentUri) -> Result<Option<Document>>;

    /// Number of documents tagged with `collection`; 0 if none
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn count_in(&self, collection: &str) -> Result<usize>;

    /// URIs of documents tagged with `collection`, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn uris_in(&self, collection: &str) -> Result<Vec<DocumentUri>>;

    /// Total number of stored documents
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn len(&self) -> Result<usize>;

    /// Whether the store holds no documents
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove every document, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn clear(&self) -> Result<usize>;
}
