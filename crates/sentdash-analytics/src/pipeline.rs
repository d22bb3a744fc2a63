//! End-to-end aggregation: window filter, per-company statistics and output
//! assembly.

use chrono::{DateTime, Duration, Utc};
use sentdash_core::TweetRecord;

use crate::aggregate::{
    partition_by_company, sentiment_summary, top_negative, top_positive, weekly_trend, CompanyRows,
};
use crate::format::{format_tweet, time_period_label};
use crate::topics::extract_topics;
use crate::types::{CompanyAggregate, TopTweets};

/// Default trailing window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Earliest timestamp included in a window of `days` ending at `now`.
#[must_use]
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

/// Keep only records created at or after `now - days`.
#[must_use]
pub fn within_window(records: Vec<TweetRecord>, now: DateTime<Utc>, days: u32) -> Vec<TweetRecord> {
    let since = window_start(now, days);
    records
        .into_iter()
        .filter(|r| r.created_at >= since)
        .collect()
}

/// Aggregate one company's rows into its dashboard entry.
#[must_use]
pub fn aggregate_company(group: &CompanyRows<'_>, days: u32) -> CompanyAggregate {
    let rows = group.rows.as_slice();
    let summary = sentiment_summary(rows);

    let top_tweets = TopTweets {
        positive: top_positive(rows).into_iter().map(format_tweet).collect(),
        negative: top_negative(rows).into_iter().map(format_tweet).collect(),
    };
    let key_topics = extract_topics(group.company, rows, &summary);

    CompanyAggregate {
        company: group.company.to_string(),
        logo_url: rows
            .first()
            .map(|r| r.user_profile_image_url.clone())
            .unwrap_or_default(),
        time_period: time_period_label(days),
        sentiment_trend: weekly_trend(rows),
        sentiment_summary: summary,
        top_tweets,
        key_topics,
    }
}

/// Build the dashboard for records already restricted to the window.
///
/// Companies appear in the order they are first encountered. An empty input
/// yields an empty dashboard.
#[must_use]
pub fn build_dashboard(records: &[TweetRecord], days: u32) -> Vec<CompanyAggregate> {
    let groups = partition_by_company(records);

    let dashboard: Vec<CompanyAggregate> = groups
        .iter()
        .map(|group| {
            let aggregate = aggregate_company(group, days);
            tracing::debug!(
                company = %aggregate.company,
                tweets = aggregate.sentiment_summary.total_tweets,
                topics = aggregate.key_topics.len(),
                "company aggregated"
            );
            aggregate
        })
        .collect();

    tracing::info!(
        records = records.len(),
        companies = dashboard.len(),
        days,
        "dashboard built"
    );
    dashboard
}
