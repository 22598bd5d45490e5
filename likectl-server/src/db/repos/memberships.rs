//! Membership repository
//!
//! Writes rely on the `uq_company_collection` constraint: inserts use
//! ON CONFLICT DO NOTHING, so concurrent likes of the same company can't
//! produce duplicate rows and `rows_affected` is the true number added.

use std::collections::HashSet;

use sqlx::PgPool;

use super::companies::{offset, CompanyRow};
use super::DbError;
use likectl_core::{CollectionId, Company, CompanyId, Page, PageWindow};

/// Membership repository
pub struct MembershipRepo<'a> {
    pool: &'a PgPool,
}

fn raw_ids(ids: &[CompanyId]) -> Vec<i32> {
    ids.iter().map(|id| id.get()).collect()
}

impl<'a> MembershipRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The subset of `ids` already in `collection`.
    pub async fn members_among(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<HashSet<CompanyId>, DbError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let found: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT company_id
            FROM company_collection_associations
            WHERE collection_id = $1 AND company_id = ANY($2)
            "#,
        )
        .bind(collection.0)
        .bind(raw_ids(ids))
        .fetch_all(self.pool)
        .await?;

        Ok(found.into_iter().map(CompanyId).collect())
    }

    /// Bulk-insert memberships in one statement and commit.
    pub async fn insert(&self, collection: CollectionId, ids: &[CompanyId]) -> Result<u64, DbError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO company_collection_associations (company_id, collection_id)
            SELECT UNNEST($1::int4[]), $2
            ON CONFLICT (company_id, collection_id) DO NOTHING
            "#,
        )
        .bind(raw_ids(ids))
        .bind(collection.0)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete every membership of `collection` and re-add the first
    /// `default_size` companies by id, in one transaction.
    ///
    /// An error before commit drops the transaction, which rolls it back.
    pub async fn reset(&self, collection: CollectionId, default_size: u32) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM company_collection_associations WHERE collection_id = $1")
            .bind(collection.0)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let inserted = sqlx::query(
            r#"
            INSERT INTO company_collection_associations (company_id, collection_id)
            SELECT id, $1 FROM companies
            ORDER BY id
            LIMIT $2
            ON CONFLICT (company_id, collection_id) DO NOTHING
            "#,
        )
        .bind(collection.0)
        .bind(i64::from(default_size))
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        tracing::debug!(deleted, inserted, "memberships reset");
        Ok(inserted)
    }

    /// Page of member companies, ordered by company id.
    pub async fn list_companies(
        &self,
        collection: CollectionId,
        window: PageWindow,
    ) -> Result<Page<Company>, DbError> {
        let rows: Vec<CompanyRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.company_name
            FROM company_collection_associations a
            JOIN companies c ON c.id = a.company_id
            WHERE a.collection_id = $1
            ORDER BY c.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(collection.0)
        .bind(i64::from(window.limit))
        .bind(offset(window))
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM company_collection_associations a
            JOIN companies c ON c.id = a.company_id
            WHERE a.collection_id = $1
            "#,
        )
        .bind(collection.0)
        .fetch_one(self.pool)
        .await?;

        Ok(Page {
            items: rows.into_iter().map(Company::from).collect(),
            total,
        })
    }

    /// Every member company id, ascending.
    pub async fn company_ids(&self, collection: CollectionId) -> Result<Vec<CompanyId>, DbError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT company_id
            FROM company_collection_associations
            WHERE collection_id = $1
            ORDER BY company_id
            "#,
        )
        .bind(collection.0)
        .fetch_all(self.pool)
        .await?;

        Ok(ids.into_iter().map(CompanyId).collect())
    }
}
