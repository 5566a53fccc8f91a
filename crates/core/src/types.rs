//! Core types for FixtureDB
//!
//! This module defines the foundational types:
//! - DocumentUri: Validated, unique document address
//! - CollectionName: Validated collection tag
//! - LoadId: Unique identifier for one fixture load
//! - Capability / Permission: Recorded access-control descriptor
//! - DuplicatePolicy: What to do when a URI is already taken
//! - InsertOutcome: Whether an insert created or replaced a document

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Maximum URI length in bytes
pub const MAX_URI_LENGTH: usize = 1024;

/// Maximum collection name length in bytes
pub const MAX_COLLECTION_NAME_LENGTH: usize = 256;

// =============================================================================
// DocumentUri
// =============================================================================

/// Unique document address, e.g. `/test-data/red/song1.json`
///
/// A URI must be non-empty, start with `/`, contain no whitespace or
/// control characters, contain no empty path segment (`//`), and be at most
/// [`MAX_URI_LENGTH`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Validate and wrap a URI
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let reject = |reason: &str| {
            Err(Error::InvalidUri {
                uri: uri.clone(),
                reason: reason.to_string(),
            })
        };

        if uri.is_empty() {
            return reject("must not be empty");
        }
        if !uri.starts_with('/') {
            return reject("must start with '/'");
        }
        if uri.len() > MAX_URI_LENGTH {
            return reject("exceeds maximum length");
        }
        if uri.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return reject("must not contain whitespace or control characters");
        }
        if uri.contains("//") {
            return reject("must not contain empty path segments");
        }
        Ok(Self(uri))
    }

    /// The URI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment (`song1.json` for `/test-data/red/song1.json`)
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentUri {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<DocumentUri> for String {
    fn from(uri: DocumentUri) -> Self {
        uri.0
    }
}

impl Borrow<str> for DocumentUri {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CollectionName
// =============================================================================

/// Name of a collection tag, e.g. `red`
///
/// Non-empty, at most [`MAX_COLLECTION_NAME_LENGTH`] bytes, no whitespace
/// or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Validate and wrap a collection name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.len() > MAX_COLLECTION_NAME_LENGTH {
            Some("exceeds maximum length")
        } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("must not contain whitespace or control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::InvalidCollection {
                name,
                reason: reason.to_string(),
            }),
            None => Ok(Self(name)),
        }
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CollectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

impl Borrow<str> for CollectionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// LoadId
// =============================================================================

/// Unique identifier for one `load_all` invocation
///
/// Wraps a UUID v4. Carried on log spans and on the load summary so the
/// log lines of one load can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadId(Uuid);

impl LoadId {
    /// Create a new random LoadId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a LoadId from its string form
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for LoadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Permissions
// =============================================================================

/// Capability granted to a role on a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// May read the document
    Read,
    /// May update the document
    Update,
    /// May insert documents
    Insert,
    /// May execute the document as code
    Execute,
}

impl Capability {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Read => "read",
            Capability::Update => "update",
            Capability::Insert => "insert",
            Capability::Execute => "execute",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "read" => Ok(Capability::Read),
            "update" => Ok(Capability::Update),
            "insert" => Ok(Capability::Insert),
            "execute" => Ok(Capability::Execute),
            other => Err(Error::invalid_input(format!(
                "unknown capability '{}'",
                other
            ))),
        }
    }
}

/// A role/capability pair recorded on a document.
///
/// Recorded for fidelity with the source data set; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    /// Role name, e.g. `rest-reader`
    pub role: String,
    /// Granted capability
    pub capability: Capability,
}

impl Permission {
    /// Create a permission
    pub fn new(role: impl Into<String>, capability: Capability) -> Self {
        Self {
            role: role.into(),
            capability,
        }
    }

    /// `rest-reader:read` and `rest-writer:update`
    pub fn default_set() -> Vec<Permission> {
        vec![
            Permission::new("rest-reader", Capability::Read),
            Permission::new("rest-writer", Capability::Update),
        ]
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role, self.capability)
    }
}

// =============================================================================
// Insert policy
// =============================================================================

/// What an insert does when the URI is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the insert with `Error::DuplicateUri`
    #[default]
    Reject,
    /// Replace the existing document, including its collection tags
    Overwrite,
}

impl DuplicatePolicy {
    /// Lowercase name as used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(Error::config(format!(
                "invalid duplicate policy '{}'. Expected \"reject\" or \"overwrite\".",
                other
            ))),
        }
    }
}

/// Result of a successful insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertOutcome {
    /// URI was not present before
    Created,
    /// URI was present and the previous document was replaced
    Replaced,
}
