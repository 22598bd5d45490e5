//! Persistence seam for companies, collections and memberships
//!
//! Backends implement [`LikeStore`]; the orchestrator and service only talk to
//! this trait. Each write method is one committed unit of work:
//! - `insert_members`: one bulk write + commit, conflicts ignored
//! - `reset_members`: delete + re-insert in a single transaction

pub mod memory;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::model::{Collection, CollectionId, CollectionName, Company, CompanyId, Page, PageWindow};

/// Storage failure, backend-agnostic
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap a backend error (e.g. `sqlx::Error`).
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Look up a collection by its human-readable name.
    async fn find_collection(&self, name: &CollectionName)
        -> Result<Option<Collection>, StoreError>;

    async fn get_collection(&self, id: CollectionId) -> Result<Option<Collection>, StoreError>;

    async fn list_collections(&self) -> Result<Vec<Collection>, StoreError>;

    /// Page of companies ordered by id, with the unbounded total count.
    async fn list_companies(&self, window: PageWindow) -> Result<Page<Company>, StoreError>;

    /// Page of the companies that are members of `collection`, ordered by id.
    async fn list_collection_companies(
        &self,
        collection: CollectionId,
        window: PageWindow,
    ) -> Result<Page<Company>, StoreError>;

    /// Every member company id of `collection`, ascending.
    async fn collection_company_ids(
        &self,
        collection: CollectionId,
    ) -> Result<Vec<CompanyId>, StoreError>;

    /// The subset of `ids` already in `collection`.
    async fn members_among(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<HashSet<CompanyId>, StoreError>;

    /// Insert memberships and commit. Rows that already exist are skipped;
    /// returns the number of rows actually inserted.
    async fn insert_members(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<u64, StoreError>;

    /// Replace every membership of `collection` with the first `default_size`
    /// companies by id, atomically. Returns the number of rows inserted.
    async fn reset_members(
        &self,
        collection: CollectionId,
        default_size: u32,
    ) -> Result<u64, StoreError>;
}
