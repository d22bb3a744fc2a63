//! Per-company statistics: partitioning, the sentiment summary, the weekly
//! trend and engagement-ranked top tweets.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use sentdash_core::{SentimentLabel, TweetRecord};

use crate::types::{SentimentSummary, TrendPoint};

/// Maximum entries in each top-tweet list.
pub const TOP_TWEETS_LIMIT: usize = 5;

/// Rows belonging to one company, in input order.
#[derive(Debug)]
pub struct CompanyRows<'a> {
    pub company: &'a str,
    pub rows: Vec<&'a TweetRecord>,
}

/// Group records by exact company name, keeping first-encounter order for
/// both the companies and the rows inside each group.
#[must_use]
pub fn partition_by_company(records: &[TweetRecord]) -> Vec<CompanyRows<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CompanyRows<'_>> = Vec::new();

    for record in records {
        let slot = *index.entry(record.company.as_str()).or_insert_with(|| {
            groups.push(CompanyRows {
                company: record.company.as_str(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(record);
    }

    groups
}

/// Round half-to-even at two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Mean sentiment score of `rows`, or `None` when empty.
#[must_use]
pub fn mean_score(rows: &[&TweetRecord]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = rows.len() as f64;
    let sum: f64 = rows.iter().map(|r| r.sentiment_score).sum();
    Some(sum / denom)
}

/// `round(count / total * 100)`, or `0` when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn percentage(count: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round_ties_even() as i64
}

/// Label distribution and mean score for one company's rows.
///
/// Positive and negative percentages are rounded independently; neutral is
/// whatever remains of 100 and may fall outside `[0, 100]`.
#[must_use]
pub fn sentiment_summary(rows: &[&TweetRecord]) -> SentimentSummary {
    let total_tweets = rows.len();
    let positive = rows
        .iter()
        .filter(|r| r.sentiment_label == SentimentLabel::Positive)
        .count();
    let negative = rows
        .iter()
        .filter(|r| r.sentiment_label == SentimentLabel::Negative)
        .count();

    let positive_percentage = percentage(positive, total_tweets);
    let negative_percentage = percentage(negative, total_tweets);

    SentimentSummary {
        overall_score: mean_score(rows).map_or(0.0, round2),
        positive_percentage,
        negative_percentage,
        neutral_percentage: 100 - positive_percentage - negative_percentage,
        total_tweets,
    }
}

/// The Monday on or before `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Weekly mean score and count, one point per week that has rows, ascending.
#[must_use]
pub fn weekly_trend(rows: &[&TweetRecord]) -> Vec<TrendPoint> {
    let mut weeks: BTreeMap<NaiveDate, Vec<&TweetRecord>> = BTreeMap::new();
    for row in rows {
        weeks
            .entry(week_start(row.created_at.date_naive()))
            .or_default()
            .push(row);
    }

    weeks
        .into_iter()
        .map(|(date, week_rows)| TrendPoint {
            date,
            average_score: mean_score(&week_rows).map_or(0.0, round2),
            tweet_count: week_rows.len(),
        })
        .collect()
}

/// Weighted interaction count used to break sentiment ties.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_score(record: &TweetRecord) -> f64 {
    2.0 * record.retweet_count as f64
        + record.like_count as f64
        + 1.5 * record.reply_count as f64
        + 1.5 * record.quote_count as f64
}

/// Up to five positive tweets, highest score first, then most engaged.
#[must_use]
pub fn top_positive<'a>(rows: &[&'a TweetRecord]) -> Vec<&'a TweetRecord> {
    let mut ranked = with_engagement(rows, &SentimentLabel::Positive);
    ranked.sort_by(|(a, a_eng), (b, b_eng)| {
        b.sentiment_score
            .total_cmp(&a.sentiment_score)
            .then_with(|| b_eng.total_cmp(a_eng))
    });
    take_top(ranked)
}

/// Up to five negative tweets, lowest score first, then most engaged.
#[must_use]
pub fn top_negative<'a>(rows: &[&'a TweetRecord]) -> Vec<&'a TweetRecord> {
    let mut ranked = with_engagement(rows, &SentimentLabel::Negative);
    ranked.sort_by(|(a, a_eng), (b, b_eng)| {
        a.sentiment_score
            .total_cmp(&b.sentiment_score)
            .then_with(|| b_eng.total_cmp(a_eng))
    });
    take_top(ranked)
}

fn with_engagement<'a>(
    rows: &[&'a TweetRecord],
    label: &SentimentLabel,
) -> Vec<(&'a TweetRecord, f64)> {
    rows.iter()
        .filter(|r| &r.sentiment_label == label)
        .map(|r| (*r, engagement_score(r)))
        .collect()
}

fn take_top(ranked: Vec<(&TweetRecord, f64)>) -> Vec<&TweetRecord> {
    ranked
        .into_iter()
        .take(TOP_TWEETS_LIMIT)
        .map(|(record, _)| record)
        .collect()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
