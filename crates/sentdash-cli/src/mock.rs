//! Synthetic data command handlers.

use chrono::Utc;
use clap::Subcommand;
use sentdash_core::MAX_MOCK_TWEETS_PER_COMPANY;
use sentdash_mock::{MockConfig, MockGenerator, TweetProvider};

#[derive(Debug, Subcommand)]
pub enum MockCommands {
    /// Generate synthetic tweets and replace the stored table with them
    Generate {
        /// Tweets per tracked company (defaults to SENTDASH_MOCK_TWEETS_PER_COMPANY)
        #[arg(
            long,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
                .range(1..=MAX_MOCK_TWEETS_PER_COMPANY as u64)
        )]
        per_company: Option<usize>,

        /// Spread tweets over this many past days (defaults to SENTDASH_MOCK_HISTORY_DAYS)
        #[arg(long)]
        history_days: Option<u32>,

        /// RNG seed (defaults to SENTDASH_MOCK_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Generate and summarise without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
}

pub(crate) async fn run(command: MockCommands) -> anyhow::Result<()> {
    match command {
        MockCommands::Generate {
            per_company,
            history_days,
            seed,
            dry_run,
        } => {
            let overrides = MockOverrides {
                per_company,
                history_days,
                seed,
            };
            run_generate(overrides, dry_run).await
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MockOverrides {
    pub per_company: Option<usize>,
    pub history_days: Option<u32>,
    pub seed: Option<u64>,
}

impl MockOverrides {
    pub(crate) fn apply(self, base: MockConfig) -> MockConfig {
        MockConfig {
            tweets_per_company: self.per_company.unwrap_or(base.tweets_per_company),
            history_days: self.history_days.unwrap_or(base.history_days),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

async fn run_generate(overrides: MockOverrides, dry_run: bool) -> anyhow::Result<()> {
    let config = sentdash_core::load_app_config()?;
    let companies = sentdash_core::load_companies(&config.companies_path)?.companies;
    let mock_config = overrides.apply(MockConfig::from_app_config(&config));

    let mut generator = MockGenerator::new(mock_config);
    let tweets = generator.tweets(&companies, Utc::now())?;

    if dry_run {
        println!(
            "dry-run: would write {} tweets for {} companies (seed {}, {} days of history)",
            tweets.len(),
            companies.len(),
            mock_config.seed,
            mock_config.history_days
        );
        for company in &companies {
            let tagged = tweets
                .iter()
                .filter(|t| t.company == company.name && t.hashtags.is_some())
                .count();
            println!(
                "  {:<20} {} tweets, {} with hashtags",
                company.name, mock_config.tweets_per_company, tagged
            );
        }
        return Ok(());
    }

    let pool_config = sentdash_db::PoolConfig::from_app_config(&config);
    let pool = sentdash_db::connect_pool(&config.database_url, pool_config).await?;
    let written = sentdash_db::replace_tweets(&pool, &tweets).await?;
    println!("replaced tweets table with {written} synthetic tweets");

    Ok(())
}
