//! Tweet records: the flat input rows the analytics pipeline aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Confidence reported for a tweet whose stored confidence is missing.
pub const DEFAULT_SENTIMENT_CONFIDENCE: f64 = 0.9;

/// Sentiment class attached to a tweet.
///
/// Labels are compared by exact, case-sensitive string match. Anything other
/// than `positive`, `negative` or `neutral` is kept verbatim in [`Other`].
///
/// [`Other`]: SentimentLabel::Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Other(raw) => raw,
        }
    }
}

impl From<&str> for SentimentLabel {
    fn from(raw: &str) -> Self {
        match raw {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            other => SentimentLabel::Other(other.to_string()),
        }
    }
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            _ => SentimentLabel::Other(raw),
        }
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored tweet with its precomputed sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub company: String,
    /// Score in `[0.0, 1.0]`; higher is more positive.
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub sentiment_confidence: Option<f64>,
    pub user_username: String,
    pub user_name: String,
    pub user_profile_image_url: String,
    pub user_followers_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub quote_count: u64,
    /// Raw whitespace-separated `#tag` tokens, as stored.
    pub hashtags: Option<String>,
}

impl TweetRecord {
    /// Stored confidence, or [`DEFAULT_SENTIMENT_CONFIDENCE`] when absent.
    #[must_use]
    pub fn confidence_or_default(&self) -> f64 {
        self.sentiment_confidence
            .unwrap_or(DEFAULT_SENTIMENT_CONFIDENCE)
    }
}

/// Raised when a loaded row cannot become a [`TweetRecord`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("tweet {id}: required field `{field}` is missing")]
    MissingField { id: String, field: &'static str },

    #[error("tweet {id}: field `{field}` is invalid: {reason}")]
    InvalidField {
        id: String,
        field: &'static str,
        reason: String,
    },
}
