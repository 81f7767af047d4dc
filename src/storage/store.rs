//! The storage collaborator interface
//!
//! Handlers only ever talk to an `ExecutiveStore`. The store owns identity
//! assignment, durability and per-document atomicity; handlers own
//! validation and response shaping.

use async_trait::async_trait;
use uuid::Uuid;

use crate::rest_api::filter::Filter;
use crate::rest_api::sort::SortSpec;
use crate::schema::{Executive, ExecutivePatch, NewExecutive};

use super::errors::StoreResult;

/// A filtered, sorted, paged read
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: SortSpec,
    /// Matching records to skip
    pub skip: u64,
    /// Maximum records to return
    pub limit: u64,
}

impl FindQuery {
    /// Every record, newest first
    pub fn all() -> Self {
        Self {
            filter: Filter::default(),
            sort: SortSpec::default(),
            skip: 0,
            limit: u64::MAX,
        }
    }
}

/// Document store holding executive records
#[async_trait]
pub trait ExecutiveStore: Send + Sync {
    /// Records matching `query.filter`, ordered and paged
    async fn find(&self, query: &FindQuery) -> StoreResult<Vec<Executive>>;

    /// Number of records matching `filter`
    async fn count(&self, filter: &Filter) -> StoreResult<u64>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Executive>>;

    /// Insert a record, assigning its `id` and `createdAt`
    async fn create(&self, new: NewExecutive) -> StoreResult<Executive>;

    /// Apply `patch` in place and return the updated record, or `None` if
    /// no record has this id
    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        patch: &ExecutivePatch,
    ) -> StoreResult<Option<Executive>>;

    /// Remove a record and return it, or `None` if no record has this id
    async fn find_by_id_and_delete(&self, id: Uuid) -> StoreResult<Option<Executive>>;

    /// Flush outstanding state and refuse further operations
    async fn close(&self) -> StoreResult<()>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}
