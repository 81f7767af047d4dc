//! Storage error types
//!
//! Every variant surfaces to clients as a 500; the detail is only logged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot file exists but is not a valid record list
    #[error("corrupt snapshot {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded for the snapshot
    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection string names a backend this build does not provide
    #[error("unsupported database uri: {0}")]
    UnsupportedUri(String),

    /// Store was closed at shutdown
    #[error("store is closed")]
    Closed,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
