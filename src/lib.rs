//! FixtureDB - Collection-scoped document store and test-fixture loader
//!
//! FixtureDB stores JSON documents under unique URIs, tags each one with
//! collections, and loads batches of fixture documents into named
//! collections with per-document failure isolation.
//!
//! # Quick Start
//!
//! ```
//! use fixturedb::{fixtures, FixtureStore};
//!
//! let store = FixtureStore::in_memory();
//! let summary = store.load_all(&fixtures::reference_batches())?;
//!
//! assert_eq!(summary.total_inserted, 10);
//! assert_eq!(store.count("red")?, 5);
//! assert_eq!(store.count("blue")?, 5);
//! # Ok::<(), fixturedb::Error>(())
//! ```
//!
//! # Architecture
//!
//! [`FixtureStore`] is the entry point. It runs over any [`Storage`]
//! backend; [`MemoryStore`] is the one shipped here.

pub use fixturedb_core::{
    Capability, CollectionName, Document, DocumentUri, DuplicatePolicy, Error, InsertOutcome,
    JsonValue, LimitError, LoadId, Permission, Result, Storage,
};
pub use fixturedb_engine::{
    fixtures, Batch, BatchResult, CountMismatch, FixtureDocument, FixtureStore, InsertFailure,
    InsertRecord, LoadSummary, LoaderConfig, PermissionConfig, CONFIG_FILE_NAME,
};
pub use fixturedb_storage::{AccessMode, MemoryStore};
