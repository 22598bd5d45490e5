//! Postgres-backed [`LikeStore`]

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{CollectionRepo, CompanyRepo, DbError, MembershipRepo};
use likectl_core::{
    Collection, CollectionId, CollectionName, Company, CompanyId, LikeStore, Page, PageWindow,
    StoreError,
};

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::backend(err)
    }
}

/// Store over a shared connection pool; each call checks out its own
/// connection and returns it on every exit path.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for PgStore {
    async fn find_collection(
        &self,
        name: &CollectionName,
    ) -> Result<Option<Collection>, StoreError> {
        Ok(CollectionRepo::new(&self.pool).find_by_name(name).await?)
    }

    async fn get_collection(&self, id: CollectionId) -> Result<Option<Collection>, StoreError> {
        Ok(CollectionRepo::new(&self.pool).get(id).await?)
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, StoreError> {
        Ok(CollectionRepo::new(&self.pool).list().await?)
    }

    async fn list_companies(&self, window: PageWindow) -> Result<Page<Company>, StoreError> {
        Ok(CompanyRepo::new(&self.pool).list(window).await?)
    }

    async fn list_collection_companies(
        &self,
        collection: CollectionId,
        window: PageWindow,
    ) -> Result<Page<Company>, StoreError> {
        Ok(MembershipRepo::new(&self.pool)
            .list_companies(collection, window)
            .await?)
    }

    async fn collection_company_ids(
        &self,
        collection: CollectionId,
    ) -> Result<Vec<CompanyId>, StoreError> {
        Ok(MembershipRepo::new(&self.pool).company_ids(collection).await?)
    }

    async fn members_among(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<HashSet<CompanyId>, StoreError> {
        Ok(MembershipRepo::new(&self.pool)
            .members_among(collection, ids)
            .await?)
    }

    async fn insert_members(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<u64, StoreError> {
        Ok(MembershipRepo::new(&self.pool).insert(collection, ids).await?)
    }

    async fn reset_members(
        &self,
        collection: CollectionId,
        default_size: u32,
    ) -> Result<u64, StoreError> {
        Ok(MembershipRepo::new(&self.pool)
            .reset(collection, default_size)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_error_becomes_backend_store_error() {
        let err: StoreError = DbError::Sqlx(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(err.to_string().starts_with("storage backend error: database error:"));
    }
}
