//! Error types for FixtureDB
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Errors fall into two classes:
//! - **Document-level**: a single document could not be inserted. The loader
//!   records these and moves on to the next document.
//! - **Fatal**: the surrounding operation cannot continue (store offline,
//!   no write access, bad input to the batch itself). These abort the batch
//!   and the load. See [`Error::is_fatal`].

use crate::json::LimitError;
use crate::types::{DocumentUri, LoadId};
use std::io;
use thiserror::Error;

/// Result type alias for FixtureDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for FixtureDB
#[derive(Debug, Error)]
pub enum Error {
    /// Document URI failed validation
    #[error("Invalid document URI '{uri}': {reason}")]
    InvalidUri {
        /// The rejected URI
        uri: String,
        /// Why it was rejected
        reason: String,
    },

    /// Collection name failed validation
    #[error("Invalid collection name '{name}': {reason}")]
    InvalidCollection {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Document payload is not an acceptable document root
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Document payload exceeds a size limit
    #[error("Document limit exceeded: {0}")]
    Limit(#[from] LimitError),

    /// A document with this URI already exists and the policy forbids overwrite
    #[error("Document already exists: {0}")]
    DuplicateUri(DocumentUri),

    /// Transient backend failure scoped to one document
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backend cannot be reached at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Backend refuses writes
    #[error("Store is read-only")]
    ReadOnly,

    /// Invalid argument to a batch or load operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (fixture files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be read or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Clearing the target collections failed before any batch ran
    #[error("Load {load_id} aborted while clearing {collections:?}: {source}")]
    ClearFailed {
        /// Load that was aborted
        load_id: LoadId,
        /// Collections that were being cleared
        collections: Vec<String>,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },

    /// A load stopped partway through
    #[error("Load {load_id} aborted at batch {batch} ('{collection}'): {source}")]
    LoadAborted {
        /// Load that was aborted
        load_id: LoadId,
        /// Zero-based index of the batch that failed
        batch: usize,
        /// Target collection of that batch
        collection: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Construct a transient storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Construct an unavailable-store error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Error::Unavailable(msg.into())
    }

    /// Construct an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Construct a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error, raised while inserting one document, must abort
    /// the batch (and the load) instead of being recorded against that
    /// document.
    ///
    /// Checks made on the batch itself before any document is attempted
    /// (empty batch, invalid collection name) abort the batch regardless of
    /// this classification.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Unavailable(_)
                | Error::ReadOnly
                | Error::InvalidInput(_)
                | Error::Io(_)
                | Error::Config(_)
                | Error::ClearFailed { .. }
                | Error::LoadAborted { .. }
        )
    }

    /// Whether this error is a duplicate-URI rejection
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::DuplicateUri(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
