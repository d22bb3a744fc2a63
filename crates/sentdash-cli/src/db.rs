//! Database maintenance commands.

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommands) -> anyhow::Result<()> {
    let (_config, pool) = crate::connect_from_config().await?;

    match command {
        DbCommands::Ping => {
            sentdash_db::health_check(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = sentdash_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }

    Ok(())
}
