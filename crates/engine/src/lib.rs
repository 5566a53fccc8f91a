//! Fixture store and loader
//!
//! `FixtureStore` is a facade over a [`Storage`](fixturedb_core::Storage)
//! backend that inserts batches of documents into named collections,
//! isolating per-document failures, and reports counts per collection.
//!
//! ```
//! use fixturedb_engine::{fixtures, FixtureStore};
//!
//! let store = FixtureStore::in_memory();
//! let summary = store.load_all(&fixtures::reference_batches()).unwrap();
//! assert_eq!(summary.total_inserted, 10);
//! assert!(store.verify(&fixtures::reference_expectations()).unwrap().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod fixtures;
pub mod load;
pub mod store;

pub use batch::{Batch, BatchResult, FixtureDocument, InsertFailure, InsertRecord};
pub use config::{LoaderConfig, PermissionConfig, CONFIG_FILE_NAME};
pub use load::{CountMismatch, LoadSummary};
pub use store::FixtureStore;
