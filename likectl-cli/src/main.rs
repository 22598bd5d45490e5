use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::{MigrateArgs, SeedArgs, ServeArgs};
use likectl_core::LikeConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "likectl", version, about = "Liked-companies collection service")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Create the schema and the liked collection
    Migrate(MigrateArgs),
    /// Insert demo companies and restore the default liked subset
    Seed(SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config = LikeConfig::load().with_context(|| {
        format!(
            "failed to load configuration from {}",
            LikeConfig::config_path().display()
        )
    })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Migrate(args) => commands::run_migrate(args, config).await?,
        Commands::Seed(args) => commands::run_seed(args, config).await?,
    }
    Ok(())
}
