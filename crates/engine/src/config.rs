//! Loader configuration via `fixturedb.toml`
//!
//! A missing file means defaults. `write_default_if_missing` drops a
//! commented default next to the fixtures so it can be edited.

use std::collections::BTreeMap;
use std::path::Path;

use fixturedb_core::{Capability, DuplicatePolicy, Error, Permission, Result};
use serde::{Deserialize, Serialize};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "fixturedb.toml";

/// A permission entry as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionConfig {
    /// Role name
    pub role: String,
    /// Capability granted to the role
    pub capability: Capability,
}

impl From<&PermissionConfig> for Permission {
    fn from(p: &PermissionConfig) -> Self {
        Permission::new(p.role.clone(), p.capability)
    }
}

/// Loader configuration loaded from `fixturedb.toml`.
///
/// # Example
///
/// ```toml
/// on_duplicate = "reject"
/// clear_existing = false
/// log_level = "info"
///
/// [[permissions]]
/// role = "rest-reader"
/// capability = "read"
///
/// [expected]
/// red = 5
/// blue = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Duplicate URI policy: `"reject"` or `"overwrite"`.
    #[serde(default = "default_on_duplicate")]
    pub on_duplicate: String,
    /// Delete documents in the target collections before loading.
    #[serde(default)]
    pub clear_existing: bool,
    /// Log level used by the binary when none is given on the command line.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Permissions recorded on every inserted document.
    /// Empty means the default `rest-reader:read`, `rest-writer:update`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<PermissionConfig>,
    /// Expected per-collection counts checked after a load.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expected: BTreeMap<String, usize>,
}

fn default_on_duplicate() -> String {
    DuplicatePolicy::Reject.as_str().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            on_duplicate: default_on_duplicate(),
            clear_existing: false,
            log_level: default_log_level(),
            permissions: Vec::new(),
            expected: BTreeMap::new(),
        }
    }
}

impl LoaderConfig {
    /// Parse the `on_duplicate` string.
    ///
    /// # Errors
    ///
    /// `Error::Config` if it is not `"reject"` or `"overwrite"`.
    pub fn duplicate_policy(&self) -> Result<DuplicatePolicy> {
        self.on_duplicate.parse()
    }

    /// Permissions to record, falling back to the default set
    pub fn permission_set(&self) -> Vec<Permission> {
        if self.permissions.is_empty() {
            Permission::default_set()
        } else {
            self.permissions.iter().map(Permission::from).collect()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# FixtureDB loader configuration
#
# What to do when a document URI is already present:
#   "reject"    = report the document as failed, keep the existing one (default)
#   "overwrite" = replace the existing document and its collection tags
on_duplicate = "reject"

# Delete every document in the target collections before loading.
clear_existing = false

# Log level: "error", "warn", "info", "debug" or "trace"
log_level = "info"

# Permissions recorded on each document (not enforced).
[[permissions]]
role = "rest-reader"
capability = "read"

[[permissions]]
role = "rest-writer"
capability = "update"

# Expected document counts per collection, checked after loading.
[expected]
red = 5
blue = 5
"#
    }

    /// Parse config from TOML text, validating eagerly.
    ///
    /// # Errors
    ///
    /// `Error::Config` on syntax errors or an invalid duplicate policy.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LoaderConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.duplicate_policy()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Read config from `path` if it exists, defaults otherwise.
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns whether a file was written.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| {
            Error::config(format!(
                "Failed to write default config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(true)
    }
}
