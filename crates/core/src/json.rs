//! JSON payload type and document limits
//!
//! `JsonValue` wraps `serde_json::Value` and carries the checks a document
//! payload must pass before it is stored.
//!
//! | Limit | Value | Constant |
//! |-------|-------|----------|
//! | Max document size | 16 MB | [`MAX_DOCUMENT_SIZE`] |
//! | Max nesting depth | 100 levels | [`MAX_NESTING_DEPTH`] |
//! | Max array size | 1M elements | [`MAX_ARRAY_SIZE`] |
//!
//! A document root must additionally be a JSON object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

use crate::error::Error;

/// Maximum serialized document size in bytes (16 MB)
pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Maximum nesting depth in a JSON document (100 levels)
pub const MAX_NESTING_DEPTH: usize = 100;

/// Maximum array size in elements (1 million elements)
pub const MAX_ARRAY_SIZE: usize = 1_000_000;

/// Error type for document limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document exceeds maximum size
    #[error("document size {size} exceeds maximum of {max} bytes")]
    DocumentTooLarge {
        /// Actual document size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Document nesting exceeds maximum depth
    #[error("document nesting depth {depth} exceeds maximum of {max} levels")]
    NestingTooDeep {
        /// Actual nesting depth
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },

    /// Array exceeds maximum size
    #[error("array size {size} exceeds maximum of {max} elements")]
    ArrayTooLarge {
        /// Actual array size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },
}

/// JSON value wrapper
///
/// Derefs to `serde_json::Value`, so `value["title"]`, `is_object()` and
/// friends work directly.
///
/// ```
/// use fixturedb_core::JsonValue;
///
/// let doc: JsonValue = serde_json::json!({"id": "red-001", "year": 1981}).into();
/// assert!(doc.validate_document().is_ok());
/// assert_eq!(doc["year"], 1981);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct JsonValue(serde_json::Value);

impl JsonValue {
    /// Create a null JSON value
    pub fn null() -> Self {
        JsonValue(serde_json::Value::Null)
    }

    /// Create an empty JSON object
    pub fn object() -> Self {
        JsonValue(serde_json::Value::Object(serde_json::Map::new()))
    }

    /// Get the underlying serde_json::Value
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the underlying serde_json::Value
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }

    /// Serialize to compact JSON string
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }

    /// Approximate size in bytes, based on the compact JSON form
    pub fn size_bytes(&self) -> usize {
        self.to_json_string().len()
    }

    /// Maximum nesting depth. Scalars are depth 0.
    pub fn nesting_depth(&self) -> usize {
        fn depth_of(value: &serde_json::Value) -> usize {
            match value {
                serde_json::Value::Array(arr) => 1 + arr.iter().map(depth_of).max().unwrap_or(0),
                serde_json::Value::Object(obj) => {
                    1 + obj.values().map(depth_of).max().unwrap_or(0)
                }
                _ => 0,
            }
        }
        depth_of(&self.0)
    }

    /// Largest array anywhere in the value
    pub fn max_array_size(&self) -> usize {
        fn max_arr_size(value: &serde_json::Value) -> usize {
            match value {
                serde_json::Value::Array(arr) => {
                    let nested_max = arr.iter().map(max_arr_size).max().unwrap_or(0);
                    arr.len().max(nested_max)
                }
                serde_json::Value::Object(obj) => {
                    obj.values().map(max_arr_size).max().unwrap_or(0)
                }
                _ => 0,
            }
        }
        max_arr_size(&self.0)
    }

    /// Check size, nesting depth and array sizes. Returns the first violation.
    pub fn validate(&self) -> Result<(), LimitError> {
        let size = self.size_bytes();
        if size > MAX_DOCUMENT_SIZE {
            return Err(LimitError::DocumentTooLarge {
                size,
                max: MAX_DOCUMENT_SIZE,
            });
        }
        let depth = self.nesting_depth();
        if depth > MAX_NESTING_DEPTH {
            return Err(LimitError::NestingTooDeep {
                depth,
                max: MAX_NESTING_DEPTH,
            });
        }
        let size = self.max_array_size();
        if size > MAX_ARRAY_SIZE {
            return Err(LimitError::ArrayTooLarge {
                size,
                max: MAX_ARRAY_SIZE,
            });
        }
        Ok(())
    }

    /// Check that this value can be stored as a document.
    ///
    /// The root must be an object and all limits must hold.
    pub fn validate_document(&self) -> Result<(), Error> {
        if !self.0.is_object() {
            return Err(Error::MalformedPayload(format!(
                "document root must be an object, found {}",
                kind_name(&self.0)
            )));
        }
        self.validate()?;
        Ok(())
    }
}

fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl Deref for JsonValue {
    type Target = serde_json::Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for JsonValue {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map(JsonValue)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        JsonValue(v)
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested(depth: usize) -> JsonValue {
        let mut v = json!(1);
        for _ in 0..depth {
            v = json!({ "n": v });
        }
        v.into()
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(JsonValue::null().nesting_depth(), 0);
        assert_eq!(JsonValue::object().nesting_depth(), 1);
        let v: JsonValue = json!({"metadata": {"songwriter": ["Geddy Lee"]}}).into();
        assert_eq!(v.nesting_depth(), 3);
    }

    #[test]
    fn test_max_array_size_sees_nested_arrays() {
        let v: JsonValue = json!({"a": [1, 2], "b": {"c": [1, 2, 3, 4]}}).into();
        assert_eq!(v.max_array_size(), 4);
    }

    #[test]
    fn test_validate_depth_boundary() {
        assert!(nested(MAX_NESTING_DEPTH).validate().is_ok());
        let err = nested(MAX_NESTING_DEPTH + 1).validate().unwrap_err();
        assert!(matches!(err, LimitError::NestingTooDeep { depth, .. } if depth == MAX_NESTING_DEPTH + 1));
    }

    #[test]
    fn test_validate_document_requires_object_root() {
        let arr: JsonValue = json!([1, 2, 3]).into();
        let err = arr.validate_document().unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(ref m) if m.contains("array")));

        let s: JsonValue = json!("just text").into();
        assert!(matches!(
            s.validate_document().unwrap_err(),
            Error::MalformedPayload(_)
        ));

        let obj: JsonValue = json!({"id": "blue-001"}).into();
        assert!(obj.validate_document().is_ok());
    }

    #[test]
    fn test_validate_document_reports_limits() {
        let err = nested(MAX_NESTING_DEPTH + 5).validate_document().unwrap_err();
        assert!(matches!(err, Error::Limit(LimitError::NestingTooDeep { .. })));
    }

    #[test]
    fn test_parse_and_display() {
        let v: JsonValue = r#"{"rating":5}"#.parse().unwrap();
        assert_eq!(v["rating"], 5);
        assert_eq!(v.to_string(), r#"{"rating":5}"#);
        assert!("{not json".parse::<JsonValue>().is_err());
    }
}
