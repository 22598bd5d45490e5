//! Demo data: numbered companies plus the default liked subset

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use likectl_core::{LikeConfig, LikeService};
use likectl_server::db::{migrations, CompanyRepo, PgStore};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Number of companies to insert
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
    pub companies: u32,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs, config: LikeConfig) -> Result<()> {
    let pool = super::connect(args.database_url, &config).await?;
    migrations::bootstrap(&pool, &config.likes.collection_name)
        .await
        .context("Migration failed")?;

    let start = CompanyRepo::new(&pool)
        .count()
        .await
        .context("Failed to count companies")?
        + 1;
    let names: Vec<String> = (0..i64::from(args.companies))
        .map(|i| format!("Company {}", start + i))
        .collect();

    let inserted = CompanyRepo::new(&pool)
        .insert_names(&names)
        .await
        .context("Failed to insert companies")?;
    tracing::info!(inserted, "companies seeded");

    let likes = LikeService::connect(Arc::new(PgStore::new(pool)), &config.likes).await?;
    let liked = likes.reset().await.context("Failed to reset liked companies")?;

    println!(
        "Inserted {} companies; '{}' now holds {} companies",
        inserted,
        likes.liked_collection().collection_name,
        liked
    );
    Ok(())
}
