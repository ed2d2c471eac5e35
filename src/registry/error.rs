use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the registry store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file under the storage directory failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No script with this name is registered.
    #[error("script '{0}' not found")]
    NotFound(String),

    /// The name cannot be used as a script file name.
    #[error("invalid script name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
