// ⚠️ Store Errors - Failures surfaced to callers
//
// Hydrate corruption is NOT here: it is recovered inside the container and
// reported through the diagnostic sink. Everything below reaches the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Mapping lookup or delete on an absent key
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Sequence access outside `0..len`
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reading or writing a backing file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoded contents would not decode again; nothing was written
    #[error("refusing to write {}: data would not load back ({reason})", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
