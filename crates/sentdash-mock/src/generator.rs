use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use sentdash_core::{CompanyConfig, SentimentLabel, TweetRecord, MAX_MOCK_TWEETS_PER_COMPANY};
use uuid::Builder;

use crate::vocab::{FIRST_NAMES, LAST_NAMES, PROFILE_IMAGES, USERNAME_ADJECTIVES, USERNAME_NOUNS};
use crate::{MockConfig, MockError, TweetProvider, POSITIVE_SHARE_PERCENT};

const HASHTAG_PROBABILITY: f64 = 0.3;
const MAX_HASHTAGS: usize = 3;

/// Seeded generator of synthetic, already-labelled tweets.
#[derive(Debug)]
pub struct MockGenerator {
    config: MockConfig,
    rng: StdRng,
}

impl MockGenerator {
    #[must_use]
    pub fn new(config: MockConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> MockConfig {
        self.config
    }

    /// Generate `tweets_per_company` tweets for every company, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::TooManyTweets`] if `tweets_per_company` is above
    /// [`MAX_MOCK_TWEETS_PER_COMPANY`], and [`MockError::EmptyVocabulary`] if a
    /// company has no phrases or topics for a tweet it needs to build.
    pub fn generate(
        &mut self,
        companies: &[CompanyConfig],
        now: DateTime<Utc>,
    ) -> Result<Vec<TweetRecord>, MockError> {
        let per_company = self.config.tweets_per_company;
        if per_company > MAX_MOCK_TWEETS_PER_COMPANY {
            return Err(MockError::TooManyTweets {
                requested: per_company,
                max: MAX_MOCK_TWEETS_PER_COMPANY,
            });
        }
        let positive = per_company * POSITIVE_SHARE_PERCENT / 100;
        let mut tweets = Vec::with_capacity(companies.len().saturating_mul(per_company));

        for company in companies {
            tracing::info!(
                company = %company.name,
                positive,
                negative = per_company - positive,
                "generating synthetic tweets"
            );
            for i in 0..per_company {
                let created_at = self.random_date(now);
                tweets.push(self.tweet(company, i < positive, created_at)?);
            }
        }

        tweets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tweets)
    }

    fn random_date(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = self.rng.random_range(0..=self.config.history_days);
        let hours = self.rng.random_range(0..=23);
        let minutes = self.rng.random_range(0..=59);
        let seconds = self.rng.random_range(0..=59);
        now - Duration::days(i64::from(days))
            - Duration::hours(hours)
            - Duration::minutes(minutes)
            - Duration::seconds(seconds)
    }

    fn tweet(
        &mut self,
        company: &CompanyConfig,
        positive: bool,
        created_at: DateTime<Utc>,
    ) -> Result<TweetRecord, MockError> {
        let rng = &mut self.rng;

        let (phrases, field) = if positive {
            (&company.positive_phrases, "positive_phrases")
        } else {
            (&company.negative_phrases, "negative_phrases")
        };
        let phrase = pick(rng, phrases, &company.name, field)?;
        let product = pick(rng, &company.topics, &company.name, "topics")?;
        let mut text = phrase
            .replace("{product}", product)
            .replace("{company}", &company.name);

        let hashtags = if !company.hashtags.is_empty() && rng.random_bool(HASHTAG_PROBABILITY) {
            let k = rng
                .random_range(1..=MAX_HASHTAGS)
                .min(company.hashtags.len());
            let joined = company
                .hashtags
                .choose_multiple(rng, k)
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" ");
            text.push(' ');
            text.push_str(&joined);
            Some(joined)
        } else {
            None
        };

        let (label, score, confidence, like_count) = if positive {
            (
                SentimentLabel::Positive,
                round2(rng.random_range(0.70..=0.95)),
                round2(rng.random_range(0.85..=0.98)),
                rng.random_range(50..=300_u64),
            )
        } else {
            (
                SentimentLabel::Negative,
                round2(rng.random_range(0.05..=0.30)),
                round2(rng.random_range(0.80..=0.95)),
                rng.random_range(30..=200_u64),
            )
        };

        let retweet_count = scaled(like_count, rng.random_range(0.1..=0.5));
        let reply_count = scaled(like_count, rng.random_range(0.05..=0.3));
        let quote_count = scaled(like_count, rng.random_range(0.02..=0.1));

        Ok(TweetRecord {
            id: Builder::from_random_bytes(rng.random()).into_uuid().to_string(),
            text,
            created_at,
            company: company.name.clone(),
            sentiment_score: score,
            sentiment_label: label,
            sentiment_confidence: Some(confidence),
            user_username: username(rng),
            user_name: format!(
                "{} {}",
                choose_word(rng, FIRST_NAMES),
                choose_word(rng, LAST_NAMES)
            ),
            user_profile_image_url: choose_word(rng, PROFILE_IMAGES).to_string(),
            user_followers_count: rng.random_range(100..=10_000),
            retweet_count,
            reply_count,
            like_count,
            quote_count,
            hashtags,
        })
    }
}

impl TweetProvider for MockGenerator {
    fn tweets(
        &mut self,
        companies: &[CompanyConfig],
        now: DateTime<Utc>,
    ) -> Result<Vec<TweetRecord>, MockError> {
        self.generate(companies, now)
    }
}

fn pick<'a>(
    rng: &mut StdRng,
    pool: &'a [String],
    company: &str,
    field: &'static str,
) -> Result<&'a str, MockError> {
    pool.choose(rng)
        .map(String::as_str)
        .ok_or_else(|| MockError::EmptyVocabulary {
            company: company.to_string(),
            field,
        })
}

fn choose_word(rng: &mut StdRng, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn username(rng: &mut StdRng) -> String {
    let adjective = choose_word(rng, USERNAME_ADJECTIVES);
    let noun = choose_word(rng, USERNAME_NOUNS);
    let suffix = match rng.random_range(0..3) {
        0 => String::new(),
        1 => rng.random_range(1..=999).to_string(),
        _ => rng.random_range(1..=99).to_string(),
    };
    format!("{adjective}{noun}{suffix}")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled(base: u64, factor: f64) -> u64 {
    (base as f64 * factor) as u64
}
