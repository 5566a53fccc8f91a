//! Batch input and per-batch accounting

use fixturedb_core::{DocumentUri, InsertOutcome, JsonValue};
use serde::{Deserialize, Serialize};

/// A document as written in a fixture: unvalidated URI plus payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    /// Target URI, validated at insertion time
    pub uri: String,
    /// Document payload
    pub content: JsonValue,
}

impl FixtureDocument {
    /// Create a fixture document
    pub fn new(uri: impl Into<String>, content: impl Into<JsonValue>) -> Self {
        Self {
            uri: uri.into(),
            content: content.into(),
        }
    }
}

/// Documents destined for one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Collection every document in the batch is tagged with
    pub collection: String,
    /// Documents, inserted in order
    pub documents: Vec<FixtureDocument>,
}

impl Batch {
    /// Create a batch
    pub fn new(collection: impl Into<String>, documents: Vec<FixtureDocument>) -> Self {
        Self {
            collection: collection.into(),
            documents,
        }
    }
}

/// One successfully inserted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertRecord {
    /// Document URI
    pub uri: DocumentUri,
    /// Collection it was tagged with
    pub collection: String,
    /// Whether it was new or replaced an existing document
    pub outcome: InsertOutcome,
}

/// One document that could not be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertFailure {
    /// URI as given in the input (may be invalid)
    pub uri: String,
    /// Rendered error
    pub error: String,
}

/// Outcome of `FixtureStore::insert_batch`
///
/// `inserted_count + failures.len()` always equals the number of documents
/// submitted, and both lists keep input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Target collection
    pub collection: String,
    /// Number of documents inserted
    pub inserted_count: usize,
    /// Per-document success records
    pub inserted: Vec<InsertRecord>,
    /// Per-document failure records
    pub failures: Vec<InsertFailure>,
}

impl BatchResult {
    pub(crate) fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            inserted_count: 0,
            inserted: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn record_success(&mut self, uri: DocumentUri, outcome: InsertOutcome) {
        self.inserted_count += 1;
        self.inserted.push(InsertRecord {
            uri,
            collection: self.collection.clone(),
            outcome,
        });
    }

    pub(crate) fn record_failure(&mut self, uri: impl Into<String>, error: impl ToString) {
        self.failures.push(InsertFailure {
            uri: uri.into(),
            error: error.to_string(),
        });
    }

    /// Documents attempted
    pub fn attempted(&self) -> usize {
        self.inserted_count + self.failures.len()
    }

    /// Whether every document went in
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Documents that replaced an existing URI
    pub fn replaced_count(&self) -> usize {
        self.inserted
            .iter()
            .filter(|r| r.outcome == InsertOutcome::Replaced)
            .count()
    }
}
