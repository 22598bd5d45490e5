//! Postgres pool construction from [`DatabaseConfig`]

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use likectl_core::config::DatabaseConfig;

/// Open a pool sized and timed by `config`, connecting to `database_url`.
///
/// The URL is passed separately since the CLI flag may override
/// `config.url`.
pub async fn create_pool(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "opening database pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Migrated pool for the `#[ignore = "requires database"]` tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url, &DatabaseConfig::default())
        .await
        .expect("pool creation failed");
    crate::db::migrations::run(&pool).await.expect("migrations");
    pool
}
