//! Synthetic tweet generation for demos and local development.
//!
//! [`MockGenerator`] fabricates labelled tweets for each configured company
//! from its phrase and hashtag vocabulary. Output is fully determined by the
//! seed and the supplied clock.

mod generator;
mod vocab;

use chrono::{DateTime, Utc};
use sentdash_core::{AppConfig, CompanyConfig, TweetRecord};
use thiserror::Error;

pub use generator::MockGenerator;

/// Share of each company's tweets labelled positive, in percent.
pub const POSITIVE_SHARE_PERCENT: usize = 65;

/// A source of tweet records for a set of companies.
pub trait TweetProvider {
    /// Produce tweets for `companies`, dated relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError`] if a company lacks the vocabulary to build a tweet.
    fn tweets(
        &mut self,
        companies: &[CompanyConfig],
        now: DateTime<Utc>,
    ) -> Result<Vec<TweetRecord>, MockError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    pub tweets_per_company: usize,
    pub history_days: u32,
    pub seed: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            tweets_per_company: 5000,
            history_days: 365,
            seed: 42,
        }
    }
}

impl MockConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            tweets_per_company: config.mock_tweets_per_company,
            history_days: config.mock_history_days,
            seed: config.mock_seed,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MockError {
    #[error("company {company} has no {field} to draw from")]
    EmptyVocabulary {
        company: String,
        field: &'static str,
    },

    #[error("{requested} tweets per company exceeds the limit of {max}")]
    TooManyTweets { requested: usize, max: usize },
}
