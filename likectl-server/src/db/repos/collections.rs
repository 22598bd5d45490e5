//! Collection repository
//!
//! - ensure: INSERT with ON CONFLICT (idempotent)
//! - find/get/list: plain lookups

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use likectl_core::{Collection, CollectionId, CollectionName};

/// Collection record from database
#[derive(Debug, Clone, FromRow)]
pub struct CollectionRow {
    pub id: Uuid,
    pub collection_name: String,
}

impl From<CollectionRow> for Collection {
    fn from(row: CollectionRow) -> Self {
        Self {
            id: CollectionId(row.id),
            collection_name: row.collection_name,
        }
    }
}

/// Collection repository
pub struct CollectionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CollectionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a collection, returning the existing one on conflict.
    pub async fn ensure(&self, name: &CollectionName) -> Result<Collection, DbError> {
        let row: CollectionRow = sqlx::query_as(
            r#"
            INSERT INTO company_collections (collection_name) VALUES ($1)
            ON CONFLICT (collection_name) DO UPDATE SET collection_name = EXCLUDED.collection_name
            RETURNING id, collection_name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn find_by_name(&self, name: &CollectionName) -> Result<Option<Collection>, DbError> {
        let row: Option<CollectionRow> = sqlx::query_as(
            "SELECT id, collection_name FROM company_collections WHERE collection_name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Collection::from))
    }

    pub async fn get(&self, id: CollectionId) -> Result<Option<Collection>, DbError> {
        let row: Option<CollectionRow> =
            sqlx::query_as("SELECT id, collection_name FROM company_collections WHERE id = $1")
                .bind(id.0)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Collection::from))
    }

    pub async fn list(&self) -> Result<Vec<Collection>, DbError> {
        let rows: Vec<CollectionRow> = sqlx::query_as(
            "SELECT id, collection_name FROM company_collections ORDER BY collection_name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Collection::from).collect())
    }
}
