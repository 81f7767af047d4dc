//! In-process executive store
//!
//! Records live in insertion order behind an async `RwLock`; writers are
//! serialized, readers share. With a snapshot path every committed write
//! rewrites the snapshot (temp file, fsync, rename) before it becomes visible, so
//! a failed write leaves both memory and disk at the previous state.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::rest_api::filter::Filter;
use crate::schema::{Executive, ExecutivePatch, NewExecutive};

use super::errors::{StoreError, StoreResult};
use super::store::{ExecutiveStore, FindQuery};

/// Executive store kept in memory, optionally snapshotted to a JSON file
pub struct MemoryStore {
    records: RwLock<Vec<Executive>>,
    snapshot: Option<PathBuf>,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store with no persistence
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            snapshot: None,
            closed: AtomicBool::new(false),
        }
    }

    /// Open a store backed by `path`, loading existing records if the file
    /// exists. Parent directories are created as needed.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::io(parent, e))?;
                }
                Vec::new()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        tracing::debug!(path = %path.display(), records = records.len(), "snapshot loaded");

        Ok(Self {
            records: RwLock::new(records),
            snapshot: Some(path),
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    /// Run a mutation under the write lock, persisting before publishing
    async fn commit<R>(&self, mutate: impl FnOnce(&mut Vec<Executive>) -> R) -> StoreResult<R> {
        self.ensure_open()?;
        let mut records = self.records.write().await;

        match &self.snapshot {
            None => Ok(mutate(&mut *records)),
            Some(path) => {
                let mut next = records.clone();
                let result = mutate(&mut next);
                write_snapshot(path, &next).await?;
                *records = next;
                Ok(result)
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn write_snapshot(path: &Path, records: &[Executive]) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = fs::File::create(&tmp)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    file.write_all(&bytes)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    file.sync_all()
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

#[async_trait]
impl ExecutiveStore for MemoryStore {
    async fn find(&self, query: &FindQuery) -> StoreResult<Vec<Executive>> {
        self.ensure_open()?;
        let records = self.records.read().await;

        let mut matched: Vec<_> = records
            .iter()
            .map(|r| (r.to_document(), r))
            .filter(|(doc, _)| query.filter.matches(doc))
            .collect();

        // Stable: ties keep insertion order.
        matched.sort_by(|(a, _), (b, _)| query.sort.compare(a, b));

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        self.ensure_open()?;
        let records = self.records.read().await;

        let n = records
            .iter()
            .filter(|r| filter.matches(&r.to_document()))
            .count();
        Ok(n as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Executive>> {
        self.ensure_open()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new: NewExecutive) -> StoreResult<Executive> {
        let record = new.into_record(Uuid::new_v4(), Utc::now());
        let stored = record.clone();
        self.commit(move |records| records.push(stored)).await?;
        Ok(record)
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        patch: &ExecutivePatch,
    ) -> StoreResult<Option<Executive>> {
        self.commit(|records| {
            records.iter_mut().find(|r| r.id == id).map(|record| {
                patch.apply(record);
                record.clone()
            })
        })
        .await
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> StoreResult<Option<Executive>> {
        self.commit(|records| {
            records
                .iter()
                .position(|r| r.id == id)
                .map(|idx| records.remove(idx))
        })
        .await
    }

    async fn close(&self) -> StoreResult<()> {
        let records = self.records.write().await;
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(path) = &self.snapshot {
            write_snapshot(path, &records).await?;
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        if self.snapshot.is_some() {
            "file"
        } else {
            "memory"
        }
    }
}
