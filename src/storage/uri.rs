//! Database connection strings
//!
//! - `memory://` keeps records in process memory only
//! - `file://<path>` keeps records in memory and snapshots them to `<path>`

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use super::errors::{StoreError, StoreResult};
use super::memory::MemoryStore;
use super::store::ExecutiveStore;

/// Parsed database connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUri {
    Memory,
    File(PathBuf),
}

impl FromStr for DatabaseUri {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "memory" || s == "memory://" {
            return Ok(DatabaseUri::Memory);
        }
        match s.strip_prefix("file://") {
            Some(path) if !path.is_empty() => Ok(DatabaseUri::File(PathBuf::from(path))),
            _ => Err(StoreError::UnsupportedUri(s.to_string())),
        }
    }
}

impl fmt::Display for DatabaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseUri::Memory => write!(f, "memory://"),
            DatabaseUri::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

impl DatabaseUri {
    /// Open the store this URI names
    pub async fn open(&self) -> StoreResult<Arc<dyn ExecutiveStore>> {
        match self {
            DatabaseUri::Memory => Ok(Arc::new(MemoryStore::new())),
            DatabaseUri::File(path) => Ok(Arc::new(MemoryStore::open(path).await?)),
        }
    }
}
