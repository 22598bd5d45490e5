use anyhow::{Context, Result};
use clap::Parser;

use likectl_core::LikeConfig;
use likectl_server::db::migrations;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create tables and the liked collection if missing.
pub async fn run_migrate(args: MigrateArgs, config: LikeConfig) -> Result<()> {
    let pool = super::connect(args.database_url, &config).await?;

    let liked = migrations::bootstrap(&pool, &config.likes.collection_name)
        .await
        .context("Migration failed")?;

    println!("Schema ready; liked collection '{}' ({})", liked.collection_name, liked.id);
    Ok(())
}
