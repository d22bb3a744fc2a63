//! Database operations for the `tweets` table.

use chrono::{DateTime, Utc};
use sentdash_core::{RecordError, SentimentLabel, TweetRecord};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::DbError;

/// Rows per multi-row `INSERT`. 16 binds each keeps a batch well under the
/// Postgres bind-parameter limit.
const UPSERT_BATCH_SIZE: usize = 1000;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `tweets` table.
///
/// Everything except the key, timestamp and company is nullable in the schema;
/// [`TweetRow::into_record`] decides which gaps are tolerated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TweetRow {
    pub id: String,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub company: String,
    pub sentiment_score: Option<f64>,
    pub sentiment_label: Option<String>,
    pub sentiment_confidence: Option<f64>,
    pub user_username: Option<String>,
    pub user_name: Option<String>,
    pub user_profile_image_url: Option<String>,
    pub user_followers_count: Option<i64>,
    pub retweet_count: Option<i64>,
    pub reply_count: Option<i64>,
    pub like_count: Option<i64>,
    pub quote_count: Option<i64>,
    pub hashtags: Option<String>,
}

impl TweetRow {
    /// Convert into a [`TweetRecord`].
    ///
    /// Missing engagement counts become `0` and a missing confidence stays
    /// `None`. Any other `NULL` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] for a `NULL` required column and
    /// [`RecordError::InvalidField`] for a negative count.
    pub fn into_record(self) -> Result<TweetRecord, RecordError> {
        let id = self.id;

        let text = required(&id, "text", self.text)?;
        let sentiment_score = required(&id, "sentiment_score", self.sentiment_score)?;
        let sentiment_label = required(&id, "sentiment_label", self.sentiment_label)?;
        let user_username = required(&id, "user_username", self.user_username)?;
        let user_name = required(&id, "user_name", self.user_name)?;
        let user_profile_image_url =
            required(&id, "user_profile_image_url", self.user_profile_image_url)?;
        let followers = required(&id, "user_followers_count", self.user_followers_count)?;

        Ok(TweetRecord {
            text,
            created_at: self.created_at,
            company: self.company,
            sentiment_score,
            sentiment_label: SentimentLabel::from(sentiment_label),
            sentiment_confidence: self.sentiment_confidence,
            user_username,
            user_name,
            user_profile_image_url,
            user_followers_count: non_negative(&id, "user_followers_count", followers)?,
            retweet_count: count(&id, "retweet_count", self.retweet_count)?,
            reply_count: count(&id, "reply_count", self.reply_count)?,
            like_count: count(&id, "like_count", self.like_count)?,
            quote_count: count(&id, "quote_count", self.quote_count)?,
            hashtags: self.hashtags,
            id,
        })
    }
}

fn required<T>(id: &str, field: &'static str, value: Option<T>) -> Result<T, RecordError> {
    value.ok_or_else(|| RecordError::MissingField {
        id: id.to_string(),
        field,
    })
}

fn count(id: &str, field: &'static str, value: Option<i64>) -> Result<u64, RecordError> {
    value.map_or(Ok(0), |v| non_negative(id, field, v))
}

fn non_negative(id: &str, field: &'static str, value: i64) -> Result<u64, RecordError> {
    u64::try_from(value).map_err(|_| RecordError::InvalidField {
        id: id.to_string(),
        field,
        reason: format!("expected a non-negative count, got {value}"),
    })
}

fn to_db_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_records(rows: Vec<TweetRow>) -> Result<Vec<TweetRecord>, DbError> {
    rows.into_iter()
        .map(|row| row.into_record().map_err(DbError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Load every tweet created at or after `since`, most recent first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::Record`] if a
/// row is missing a required field.
pub async fn list_tweets_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> Result<Vec<TweetRecord>, DbError> {
    let rows = sqlx::query_as::<_, TweetRow>(
        "SELECT id, text, created_at, company, sentiment_score, sentiment_label, \
                sentiment_confidence, user_username, user_name, user_profile_image_url, \
                user_followers_count, retweet_count, reply_count, like_count, quote_count, \
                hashtags \
         FROM tweets \
         WHERE created_at >= $1 \
         ORDER BY created_at DESC, id",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    tracing::debug!(rows = rows.len(), %since, "loaded tweets in window");
    into_records(rows)
}

/// Load one company's tweets created at or after `since`, most recent first.
///
/// `company` is matched exactly and case-sensitively.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::Record`] if a
/// row is missing a required field.
pub async fn list_company_tweets_since(
    pool: &PgPool,
    company: &str,
    since: DateTime<Utc>,
) -> Result<Vec<TweetRecord>, DbError> {
    let rows = sqlx::query_as::<_, TweetRow>(
        "SELECT id, text, created_at, company, sentiment_score, sentiment_label, \
                sentiment_confidence, user_username, user_name, user_profile_image_url, \
                user_followers_count, retweet_count, reply_count, like_count, quote_count, \
                hashtags \
         FROM tweets \
         WHERE company = $1 AND created_at >= $2 \
         ORDER BY created_at DESC, id",
    )
    .bind(company)
    .bind(since)
    .fetch_all(pool)
    .await?;

    tracing::debug!(rows = rows.len(), company, %since, "loaded company tweets in window");
    into_records(rows)
}

/// List recent tweets, optionally filtered by exact company name.
///
/// Results are ordered by `created_at DESC` then `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::Record`] if a
/// row is missing a required field.
pub async fn list_tweets(
    pool: &PgPool,
    company: Option<&str>,
    limit: i64,
) -> Result<Vec<TweetRecord>, DbError> {
    let rows = match company {
        Some(company) => {
            sqlx::query_as::<_, TweetRow>(
                "SELECT id, text, created_at, company, sentiment_score, sentiment_label, \
                        sentiment_confidence, user_username, user_name, user_profile_image_url, \
                        user_followers_count, retweet_count, reply_count, like_count, \
                        quote_count, hashtags \
                 FROM tweets \
                 WHERE company = $1 \
                 ORDER BY created_at DESC, id \
                 LIMIT $2",
            )
            .bind(company)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, TweetRow>(
                "SELECT id, text, created_at, company, sentiment_score, sentiment_label, \
                        sentiment_confidence, user_username, user_name, user_profile_image_url, \
                        user_followers_count, retweet_count, reply_count, like_count, \
                        quote_count, hashtags \
                 FROM tweets \
                 ORDER BY created_at DESC, id \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    into_records(rows)
}

/// Total number of stored tweets.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_tweets(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tweets")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert or update `records` by id in a single transaction.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any batch fails; nothing is committed then.
pub async fn upsert_tweets(pool: &PgPool, records: &[TweetRecord]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    upsert_batches(&mut *tx, records).await?;
    tx.commit().await?;

    tracing::debug!(records = records.len(), "upserted tweets");
    Ok(records.len())
}

/// Replace the whole table with `records` in a single transaction.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the truncate or any batch fails; the previous
/// contents are kept then.
pub async fn replace_tweets(pool: &PgPool, records: &[TweetRecord]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    sqlx::query("TRUNCATE TABLE tweets")
        .execute(&mut *tx)
        .await?;
    upsert_batches(&mut *tx, records).await?;
    tx.commit().await?;

    tracing::info!(records = records.len(), "replaced tweets");
    Ok(records.len())
}

async fn upsert_batches(conn: &mut PgConnection, records: &[TweetRecord]) -> Result<(), DbError> {
    for chunk in records.chunks(UPSERT_BATCH_SIZE) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO tweets \
                 (id, text, created_at, company, sentiment_score, sentiment_label, \
                  sentiment_confidence, user_username, user_name, user_profile_image_url, \
                  user_followers_count, retweet_count, reply_count, like_count, quote_count, \
                  hashtags) ",
        );

        builder.push_values(chunk, |mut b, record| {
            b.push_bind(&record.id)
                .push_bind(&record.text)
                .push_bind(record.created_at)
                .push_bind(&record.company)
                .push_bind(record.sentiment_score)
                .push_bind(record.sentiment_label.as_str())
                .push_bind(record.sentiment_confidence)
                .push_bind(&record.user_username)
                .push_bind(&record.user_name)
                .push_bind(&record.user_profile_image_url)
                .push_bind(to_db_count(record.user_followers_count))
                .push_bind(to_db_count(record.retweet_count))
                .push_bind(to_db_count(record.reply_count))
                .push_bind(to_db_count(record.like_count))
                .push_bind(to_db_count(record.quote_count))
                .push_bind(record.hashtags.as_deref());
        });

        builder.push(
            " ON CONFLICT (id) DO UPDATE SET \
                 text = EXCLUDED.text, \
                 created_at = EXCLUDED.created_at, \
                 company = EXCLUDED.company, \
                 sentiment_score = EXCLUDED.sentiment_score, \
                 sentiment_label = EXCLUDED.sentiment_label, \
                 sentiment_confidence = EXCLUDED.sentiment_confidence, \
                 user_username = EXCLUDED.user_username, \
                 user_name = EXCLUDED.user_name, \
                 user_profile_image_url = EXCLUDED.user_profile_image_url, \
                 user_followers_count = EXCLUDED.user_followers_count, \
                 retweet_count = EXCLUDED.retweet_count, \
                 reply_count = EXCLUDED.reply_count, \
                 like_count = EXCLUDED.like_count, \
                 quote_count = EXCLUDED.quote_count, \
                 hashtags = EXCLUDED.hashtags, \
                 updated_at = NOW()",
        );

        builder.build().execute(&mut *conn).await?;
    }
    Ok(())
}
