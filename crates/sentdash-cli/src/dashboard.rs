//! Dashboard aggregation commands.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use sentdash_analytics::{build_dashboard, window_start, write_dashboard, CompanyAggregate};

#[derive(Debug, Subcommand)]
pub enum DashboardCommands {
    /// Write the dashboard JSON for the trailing window
    Export {
        /// Window length in days (defaults to SENTDASH_WINDOW_DAYS)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=3650))]
        days: Option<u32>,

        /// Output file; prints to stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Connect here instead of reading the environment config
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Print per-company sentiment summaries as a table
    Summary {
        /// Window length in days (defaults to SENTDASH_WINDOW_DAYS)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=3650))]
        days: Option<u32>,
    },
}

pub(crate) async fn run(command: DashboardCommands) -> anyhow::Result<()> {
    match command {
        DashboardCommands::Export {
            days,
            output,
            database_url,
        } => run_export(days, output.as_deref(), database_url.as_deref()).await,
        DashboardCommands::Summary { days } => run_summary(days).await,
    }
}

/// Load the trailing window and aggregate it.
async fn load_dashboard(pool: &sqlx::PgPool, days: u32) -> anyhow::Result<Vec<CompanyAggregate>> {
    let since = window_start(Utc::now(), days);
    let records = sentdash_db::list_tweets_since(pool, since).await?;
    Ok(build_dashboard(&records, days))
}

async fn run_export(
    days: Option<u32>,
    output: Option<&Path>,
    database_url: Option<&str>,
) -> anyhow::Result<()> {
    let (pool, days) = match database_url {
        Some(url) => {
            let pool = sentdash_db::connect_pool(url, sentdash_db::PoolConfig::default()).await?;
            (
                pool,
                days.unwrap_or(sentdash_analytics::DEFAULT_WINDOW_DAYS),
            )
        }
        None => {
            let (config, pool) = crate::connect_from_config().await?;
            (pool, days.unwrap_or(config.window_days))
        }
    };

    let dashboard = load_dashboard(&pool, days).await?;

    match output {
        Some(path) => {
            let file = File::create(path)?;
            write_dashboard(BufWriter::new(file), &dashboard)?;
            tracing::info!(
                companies = dashboard.len(),
                path = %path.display(),
                days,
                "dashboard exported"
            );
        }
        None => write_dashboard(io::stdout().lock(), &dashboard)?,
    }

    Ok(())
}

async fn run_summary(days: Option<u32>) -> anyhow::Result<()> {
    let (config, pool) = crate::connect_from_config().await?;
    let days = days.unwrap_or(config.window_days);
    let dashboard = load_dashboard(&pool, days).await?;

    if dashboard.is_empty() {
        println!("no tweets in the last {days} days; run `mock generate` first");
        return Ok(());
    }

    print!("{}", render_summary_table(&dashboard));
    Ok(())
}

/// Fixed-width table, one row per company.
pub(crate) fn render_summary_table(dashboard: &[CompanyAggregate]) -> String {
    let mut out = format!(
        "{:<20}{:>8}{:>8}{:>7}{:>7}{:>7}  TOPICS\n",
        "COMPANY", "TWEETS", "SCORE", "POS%", "NEG%", "NEU%"
    );
    for company in dashboard {
        let summary = &company.sentiment_summary;
        let topics: Vec<&str> = company.key_topics.iter().map(|t| t.topic.as_str()).collect();
        out.push_str(&format!(
            "{:<20}{:>8}{:>8.2}{:>7}{:>7}{:>7}  {}\n",
            company.company,
            summary.total_tweets,
            summary.overall_score,
            summary.positive_percentage,
            summary.negative_percentage,
            summary.neutral_percentage,
            topics.join(", ")
        ));
    }
    out
}
