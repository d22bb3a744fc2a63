//! Assemble the output document and serialise it as JSON.

use std::io::Write;

use sentdash_core::TweetRecord;

use crate::error::AnalyticsError;
use crate::topics::parse_hashtags;
use crate::types::{
    CompanyAggregate, FormattedTweet, TweetEntities, TweetMetrics, TweetSentiment, TweetUser,
};

/// Nest a flat record into the frontend's tweet shape.
///
/// `entities` is only present when the record carries at least one hashtag.
#[must_use]
pub fn format_tweet(record: &TweetRecord) -> FormattedTweet {
    let hashtags = parse_hashtags(record.hashtags.as_deref());

    FormattedTweet {
        id: record.id.clone(),
        text: record.text.clone(),
        created_at: record.created_at,
        sentiment: TweetSentiment {
            score: record.sentiment_score,
            label: record.sentiment_label.to_string(),
            confidence: record.confidence_or_default(),
        },
        user: TweetUser {
            username: record.user_username.clone(),
            name: record.user_name.clone(),
            profile_image_url: record.user_profile_image_url.clone(),
            followers_count: record.user_followers_count,
        },
        metrics: TweetMetrics {
            retweet_count: record.retweet_count,
            reply_count: record.reply_count,
            like_count: record.like_count,
            quote_count: record.quote_count,
        },
        entities: (!hashtags.is_empty()).then_some(TweetEntities { hashtags }),
    }
}

#[must_use]
pub fn time_period_label(days: u32) -> String {
    format!("Last {days} days")
}

/// Pretty-printed JSON array of company aggregates.
///
/// # Errors
///
/// Returns [`AnalyticsError::Serialize`] if serialisation fails.
pub fn serialize_dashboard(dashboard: &[CompanyAggregate]) -> Result<String, AnalyticsError> {
    Ok(serde_json::to_string_pretty(dashboard)?)
}

/// Write the pretty-printed dashboard followed by a newline.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if serialisation or the write fails.
pub fn write_dashboard<W: Write>(
    mut writer: W,
    dashboard: &[CompanyAggregate],
) -> Result<(), AnalyticsError> {
    serde_json::to_writer_pretty(&mut writer, dashboard)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{tweet, with_hashtags};

    #[test]
    fn hashtags_become_entities() {
        let record = with_hashtags(tweet("1", "Acme", "positive", 0.9), "#Foo #Bar");
        let formatted = format_tweet(&record);
        assert_eq!(
            formatted.entities,
            Some(TweetEntities {
                hashtags: vec!["Foo".to_string(), "Bar".to_string()],
            })
        );
    }

    #[test]
    fn entities_absent_without_hashtags() {
        let mut record = tweet("1", "Acme", "positive", 0.9);
        assert!(format_tweet(&record).entities.is_none());

        record.hashtags = Some("plain words".to_string());
        let formatted = format_tweet(&record);
        assert!(formatted.entities.is_none());

        let json = serde_json::to_value(&formatted).unwrap();
        assert!(json.get("entities").is_none());
    }

    #[test]
    fn missing_confidence_defaults() {
        let mut record = tweet("1", "Acme", "negative", 0.1);
        record.sentiment_confidence = None;
        let formatted = format_tweet(&record);
        assert!((formatted.sentiment.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(formatted.sentiment.label, "negative");
    }

    #[test]
    fn nested_fields_carry_record_values() {
        let mut record = tweet("42", "Acme", "positive", 0.75);
        record.retweet_count = 3;
        record.reply_count = 4;
        record.like_count = 5;
        record.quote_count = 6;
        record.user_followers_count = 1234;

        let json = serde_json::to_value(format_tweet(&record)).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["created_at"], "2026-03-04T12:00:00Z");
        assert_eq!(json["sentiment"]["score"], 0.75);
        assert_eq!(json["user"]["username"], "user_42");
        assert_eq!(json["user"]["followers_count"], 1234);
        assert_eq!(json["metrics"]["retweet_count"], 3);
        assert_eq!(json["metrics"]["reply_count"], 4);
        assert_eq!(json["metrics"]["like_count"], 5);
        assert_eq!(json["metrics"]["quote_count"], 6);
    }

    #[test]
    fn time_period_reads_naturally() {
        assert_eq!(time_period_label(30), "Last 30 days");
        assert_eq!(time_period_label(1), "Last 1 days");
    }

    #[test]
    fn empty_dashboard_serializes_to_empty_array() {
        assert_eq!(serialize_dashboard(&[]).unwrap(), "[]");

        let mut buf = Vec::new();
        write_dashboard(&mut buf, &[]).unwrap();
        assert_eq!(buf, b"[]\n");
    }
}
