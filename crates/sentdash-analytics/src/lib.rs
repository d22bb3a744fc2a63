//! Tweet sentiment aggregation for the dashboard.
//!
//! Turns a flat batch of [`TweetRecord`](sentdash_core::TweetRecord) rows into
//! one [`CompanyAggregate`] per company: label distribution, weekly trend,
//! engagement-ranked top tweets and key topics. Aggregation is pure and
//! synchronous; callers load the rows and decide where the JSON goes.

pub mod aggregate;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod topics;
pub mod types;

#[cfg(test)]
mod test_support;

pub use aggregate::{engagement_score, partition_by_company, CompanyRows, TOP_TWEETS_LIMIT};
pub use error::AnalyticsError;
pub use format::{format_tweet, serialize_dashboard, time_period_label, write_dashboard};
pub use pipeline::{
    aggregate_company, build_dashboard, window_start, within_window, DEFAULT_WINDOW_DAYS,
};
pub use topics::{extract_topics, parse_hashtags, MAX_TOPICS};
pub use types::{
    CompanyAggregate, FormattedTweet, SentimentSummary, TopTweets, TopicSummary, TrendPoint,
    TweetEntities, TweetMetrics, TweetSentiment, TweetUser,
};
