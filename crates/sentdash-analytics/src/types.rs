//! Output document types.
//!
//! Field names are the wire contract consumed by the dashboard frontend and
//! must not be renamed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Everything the dashboard renders for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAggregate {
    pub company: String,
    /// Profile image of the company's first input row. A placeholder until a
    /// real company-metadata source exists.
    pub logo_url: String,
    /// Human-readable window, e.g. `"Last 30 days"`.
    pub time_period: String,
    pub sentiment_summary: SentimentSummary,
    pub sentiment_trend: Vec<TrendPoint>,
    pub top_tweets: TopTweets,
    pub key_topics: Vec<TopicSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean sentiment score rounded to two decimals; `0.0` for no rows.
    pub overall_score: f64,
    pub positive_percentage: i64,
    pub negative_percentage: i64,
    /// `100 - positive - negative`, never reconciled against rounding.
    pub neutral_percentage: i64,
    pub total_tweets: usize,
}

/// One populated week of the sentiment trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Monday that starts the week.
    pub date: NaiveDate,
    pub average_score: f64,
    pub tweet_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopTweets {
    pub positive: Vec<FormattedTweet>,
    pub negative: Vec<FormattedTweet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic: String,
    pub count: usize,
    pub sentiment_score: f64,
}

/// A tweet as the frontend's tweet card expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTweet {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub sentiment: TweetSentiment,
    pub user: TweetUser,
    pub metrics: TweetMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<TweetEntities>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetSentiment {
    pub score: f64,
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetUser {
    pub username: String,
    pub name: String,
    pub profile_image_url: String,
    pub followers_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetMetrics {
    pub retweet_count: u64,
    pub reply_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetEntities {
    pub hashtags: Vec<String>,
}
