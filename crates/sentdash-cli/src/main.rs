mod dashboard;
mod db;
mod mock;

use clap::{Parser, Subcommand};
use sentdash_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::dashboard::DashboardCommands;
use crate::db::DbCommands;
use crate::mock::MockCommands;

#[derive(Debug, Parser)]
#[command(name = "sentdash-cli")]
#[command(about = "Tweet sentiment dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Synthetic tweet generation
    Mock {
        #[command(subcommand)]
        command: MockCommands,
    },
    /// Aggregate stored tweets into the dashboard document
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let fallback_level = std::env::var("SENTDASH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => db::run(command).await,
        Some(Commands::Mock { command }) => mock::run(command).await,
        Some(Commands::Dashboard { command }) => dashboard::run(command).await,
        None => {
            println!("sentdash-cli ready; run with --help to list commands");
            Ok(())
        }
    }
}

/// Load the full environment config and open a pool sized from it.
async fn connect_from_config() -> anyhow::Result<(AppConfig, sqlx::PgPool)> {
    let config = sentdash_core::load_app_config()?;
    let pool_config = sentdash_db::PoolConfig::from_app_config(&config);
    let pool = sentdash_db::connect_pool(&config.database_url, pool_config).await?;
    Ok((config, pool))
}

#[cfg(test)]
mod tests;
