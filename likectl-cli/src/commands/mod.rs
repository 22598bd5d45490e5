pub mod migrate;
pub mod seed;
pub mod serve;

pub use migrate::{run_migrate, MigrateArgs};
pub use seed::{run_seed, SeedArgs};
pub use serve::{run_serve, ServeArgs};

use anyhow::{Context, Result};
use sqlx::PgPool;

use likectl_core::LikeConfig;
use likectl_server::db::create_pool;

/// Resolve the database URL (flag, then env/config) and open a pool.
pub(crate) async fn connect(database_url: Option<String>, config: &LikeConfig) -> Result<PgPool> {
    let database_url = database_url
        .or_else(|| config.database.url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.likectl/config.toml")?;

    create_pool(&database_url, &config.database)
        .await
        .context("Failed to create database pool")
}
