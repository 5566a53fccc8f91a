//! Core types and traits for FixtureDB
//!
//! This crate defines the foundational types used throughout the system:
//! - DocumentUri / CollectionName: validated identifiers
//! - LoadId: correlation id for one fixture load
//! - JsonValue: document payload with size/depth/array limits
//! - Document: a stored document with its collection tags and permissions
//! - Permission / Capability: recorded access-control descriptor
//! - DuplicatePolicy / InsertOutcome: insert semantics
//! - Error: error type hierarchy
//! - Storage: backend trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod json;
pub mod traits;
pub mod types;

pub use document::Document;
pub use error::{Error, Result};
pub use json::{JsonValue, LimitError, MAX_ARRAY_SIZE, MAX_DOCUMENT_SIZE, MAX_NESTING_DEPTH};
pub use traits::Storage;
pub use types::{
    Capability, CollectionName, DocumentUri, DuplicatePolicy, InsertOutcome, LoadId, Permission,
    MAX_COLLECTION_NAME_LENGTH, MAX_URI_LENGTH,
};
