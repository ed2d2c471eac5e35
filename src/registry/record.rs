//! Registry data model
//!
//! The serialized form is a JSON object keyed by script name:
//! ```json
//! { "hello": { "path": "/home/me/.config/scribe/apps/hello.rhai",
//!              "created": "2026-10-19T10:00:00+02:00", "size": 11 } }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::StoreError;

/// Metadata for one saved script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    /// Where the source text lives
    #[serde(rename = "path")]
    pub storage_path: PathBuf,
    /// Set when the name was first saved, never changed afterwards
    #[serde(rename = "created")]
    pub created_at: DateTime<Local>,
    /// Byte length of the latest saved source
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

/// Name to metadata mapping for every saved script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    scripts: BTreeMap<String, ScriptRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `name`.
    ///
    /// An existing entry keeps its creation time.
    pub fn upsert(&mut self, name: &str, mut record: ScriptRecord) {
        if let Some(existing) = self.scripts.get(name) {
            record.created_at = existing.created_at;
        }
        self.scripts.insert(name.to_string(), record);
    }

    pub fn get(&self, name: &str) -> Option<&ScriptRecord> {
        self.scripts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScriptRecord)> {
        self.scripts.iter().map(|(name, record)| (name.as_str(), record))
    }
}

/// Check that `name` can safely become a file name in the storage directory
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name != name.trim() {
        Some("name has leading or trailing whitespace")
    } else if name == "." || name == ".." {
        Some("name is a directory reference")
    } else if name.contains(['/', '\\', '\0']) {
        Some("name contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
