//! Storage layer for FixtureDB
//!
//! This crate implements the in-memory storage backend with:
//! - MemoryStore: BTreeMap of encoded documents behind a RwLock
//! - CollectionIndex: derived collection → URI index
//! - AccessMode: read-write or read-only stores

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod memory;

pub use index::CollectionIndex;
pub use memory::{AccessMode, MemoryStore};
