//! Schema bootstrap for companies, collections and memberships
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so it runs on each
//! `likectl migrate` and on server start.

use sqlx::PgPool;

use super::repos::{CollectionRepo, DbError};
use likectl_core::{Collection, CollectionName};

/// Create all tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id SERIAL PRIMARY KEY,
            company_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS company_collections (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            collection_name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // no foreign key on company_id: unknown ids are accepted
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS company_collection_associations (
            id SERIAL PRIMARY KEY,
            company_id INTEGER NOT NULL,
            collection_id UUID NOT NULL REFERENCES company_collections(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT uq_company_collection UNIQUE (company_id, collection_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_associations_collection
        ON company_collection_associations (collection_id, company_id)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

/// Run migrations and make sure the liked collection exists.
pub async fn bootstrap(pool: &PgPool, liked: &CollectionName) -> Result<Collection, DbError> {
    run(pool).await?;
    CollectionRepo::new(pool).ensure(liked).await
}
