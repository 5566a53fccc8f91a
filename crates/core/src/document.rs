//! Stored document representation

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::json::JsonValue;
use crate::types::{CollectionName, DocumentUri, Permission};

/// A URI-addressed JSON document with its collection tags.
///
/// Collection tags are fixed at construction. A document that needs
/// different tags is replaced as a whole.
///
/// ```
/// use fixturedb_core::{CollectionName, Document, DocumentUri, Permission};
///
/// let doc = Document::new(
///     DocumentUri::new("/test-data/red/song1.json").unwrap(),
///     serde_json::json!({"id": "red-001"}).into(),
///     CollectionName::new("red").unwrap(),
///     Permission::default_set(),
/// )
/// .unwrap();
/// assert!(doc.in_collection("red"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    uri: DocumentUri,
    content: JsonValue,
    collections: BTreeSet<CollectionName>,
    permissions: Vec<Permission>,
    inserted_at: DateTime<Utc>,
}

impl Document {
    /// Build a document tagged with a single collection.
    ///
    /// Fails with `MalformedPayload` or `Limit` if `content` is not a
    /// storable document root.
    pub fn new(
        uri: DocumentUri,
        content: JsonValue,
        collection: CollectionName,
        permissions: Vec<Permission>,
    ) -> Result<Self> {
        Self::with_collections(uri, content, BTreeSet::from([collection]), permissions)
    }

    /// Build a document tagged with several collections.
    ///
    /// An empty tag set is rejected.
    pub fn with_collections(
        uri: DocumentUri,
        content: JsonValue,
        collections: BTreeSet<CollectionName>,
        permissions: Vec<Permission>,
    ) -> Result<Self> {
        if collections.is_empty() {
            return Err(Error::InvalidCollection {
                name: String::new(),
                reason: format!("document {} must belong to at least one collection", uri),
            });
        }
        content.validate_document()?;
        Ok(Self {
            uri,
            content,
            collections,
            permissions,
            inserted_at: Utc::now(),
        })
    }

    /// Document address
    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    /// Payload
    pub fn content(&self) -> &JsonValue {
        &self.content
    }

    /// Collection tags (never empty)
    pub fn collections(&self) -> &BTreeSet<CollectionName> {
        &self.collections
    }

    /// Whether the document carries the given collection tag
    pub fn in_collection(&self, collection: &str) -> bool {
        self.collections.contains(collection)
    }

    /// Recorded permissions
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// When the document was built for insertion
    pub fn inserted_at(&self) -> DateTime<Utc> {
        self.inserted_at
    }

    /// Take the payload out of the document
    pub fn into_content(self) -> JsonValue {
        self.content
    }
}
