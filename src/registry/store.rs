//! Durable script registry
//!
//! Layout under the storage directory:
//! - `registry.json` - name -> metadata for every saved script
//! - `<name>.rhai` - raw source text, one file per script
//!
//! Every write goes to a sibling temp file first and is renamed into place,
//! so a reader sees either the old file or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{Registry, ScriptRecord, StoreError, validate_name};

pub const REGISTRY_FILE: &str = "registry.json";
pub const SCRIPT_EXTENSION: &str = "rhai";

/// Owns the registry and is the only writer of the storage directory
pub struct RegistryStore {
    root: PathBuf,
    registry: Registry,
}

impl RegistryStore {
    /// Open the store rooted at `root`, loading whatever registry is there
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let registry = Self::load(&root.join(REGISTRY_FILE));
        tracing::debug!(root = %root.display(), scripts = registry.len(), "registry loaded");
        Self { root, registry }
    }

    /// Read a registry file. Missing or unreadable files give an empty registry.
    pub fn load(path: &Path) -> Registry {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Registry::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "registry unreadable, starting empty");
                return Registry::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "registry corrupt, starting empty");
                Registry::new()
            }
        }
    }

    /// Serialize the whole registry and replace the registry file
    pub fn save(&self, registry: &Registry) -> Result<(), StoreError> {
        self.ensure_root()?;
        let content = serde_json::to_string_pretty(registry)?;
        write_replacing(&self.registry_path(), content.as_bytes())
    }

    /// Write `source` under `name` and record it.
    ///
    /// The source is staged next to its final path and only renamed into
    /// place once the registry file is written. On any failure both the
    /// stored source and the in-memory registry are left as they were.
    pub fn save_script(
        &mut self,
        name: &str,
        created_at: DateTime<Local>,
        source: &str,
    ) -> Result<ScriptRecord, StoreError> {
        validate_name(name)?;
        self.ensure_root()?;

        let storage_path = self.script_path(name);
        let staged = stage(&storage_path, source.as_bytes())?;

        let mut updated = self.registry.clone();
        updated.upsert(
            name,
            ScriptRecord {
                storage_path: storage_path.clone(),
                created_at,
                size_bytes: source.len() as u64,
            },
        );
        if let Err(e) = self.save(&updated) {
            let _ = fs::remove_file(&staged);
            return Err(e);
        }

        if let Err(e) = commit(&staged, &storage_path) {
            // Put the previous registry back so it still describes the old file
            if let Err(rollback) = self.save(&self.registry) {
                tracing::warn!(error = %rollback, "registry rollback failed");
            }
            return Err(e);
        }
        self.registry = updated;

        tracing::info!(name, size = source.len(), "script saved");
        self.registry
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Read back the source text of a registered script
    pub fn load_source(&self, name: &str) -> Result<String, StoreError> {
        let record = self
            .registry
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        fs::read_to_string(&record.storage_path)
            .map_err(|e| StoreError::io(&record.storage_path, e))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    fn script_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{SCRIPT_EXTENSION}"))
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))
    }
}

/// Write to `<path>.tmp` then rename over `path`
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let staged = stage(path, bytes)?;
    commit(&staged, path)
}

/// Write `bytes` to `<path>.tmp`, leaving `path` untouched
fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf, StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
    Ok(tmp)
}

/// Rename a staged file over `path`
fn commit(staged: &Path, path: &Path) -> Result<(), StoreError> {
    fs::rename(staged, path).map_err(|e| {
        let _ = fs::remove_file(staged);
        StoreError::io(path, e)
    })
}
