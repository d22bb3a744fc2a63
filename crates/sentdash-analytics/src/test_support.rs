//! Literal tweet fixtures shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};
use sentdash_core::{SentimentLabel, TweetRecord};

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub(crate) fn tweet(id: &str, company: &str, label: &str, score: f64) -> TweetRecord {
    TweetRecord {
        id: id.to_string(),
        text: format!("tweet {id}"),
        // Wednesday
        created_at: at(2026, 3, 4, 12),
        company: company.to_string(),
        sentiment_score: score,
        sentiment_label: SentimentLabel::from(label),
        sentiment_confidence: Some(0.95),
        user_username: format!("user_{id}"),
        user_name: format!("User {id}"),
        user_profile_image_url: format!("https://img.example.com/{id}.png"),
        user_followers_count: 100,
        retweet_count: 0,
        reply_count: 0,
        like_count: 0,
        quote_count: 0,
        hashtags: None,
    }
}

pub(crate) fn with_likes(mut record: TweetRecord, likes: u64) -> TweetRecord {
    record.like_count = likes;
    record
}

pub(crate) fn with_text(mut record: TweetRecord, text: &str) -> TweetRecord {
    record.text = text.to_string();
    record
}

pub(crate) fn with_hashtags(mut record: TweetRecord, hashtags: &str) -> TweetRecord {
    record.hashtags = Some(hashtags.to_string());
    record
}

pub(crate) fn refs(records: &[TweetRecord]) -> Vec<&TweetRecord> {
    records.iter().collect()
}
