//! HTTP server command
//!
//! Runs against Postgres by default; `--in-memory N` serves a seeded
//! in-process store instead.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use likectl_core::{LikeConfig, LikeService, LikeStore, MemoryStore};
use likectl_server::db::{migrations, PgStore};
use likectl_server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Serve an in-memory store seeded with N companies (no database)
    #[arg(long, value_name = "N")]
    pub in_memory: Option<i32>,
}

pub async fn run_serve(args: ServeArgs, config: LikeConfig) -> Result<()> {
    let store: Arc<dyn LikeStore> = match args.in_memory {
        Some(count) => {
            tracing::info!(companies = count, "Using in-memory store");
            let (store, _) = MemoryStore::seeded(count, &config.likes.collection_name);
            Arc::new(store)
        }
        None => {
            let pool = super::connect(args.database_url, &config).await?;
            migrations::bootstrap(&pool, &config.likes.collection_name)
                .await
                .context("Failed to prepare database schema")?;
            Arc::new(PgStore::new(pool))
        }
    };

    let likes = LikeService::connect(store, &config.likes)
        .await
        .context("Failed to resolve liked collection")?;

    if args.in_memory.is_some() {
        likes
            .reset()
            .await
            .context("Failed to seed default liked companies")?;
    }

    let server = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };
    tracing::info!("Starting likectl server on {}", server.bind_addr);

    run_server(likes, server).await.context("Server error")?;

    Ok(())
}
