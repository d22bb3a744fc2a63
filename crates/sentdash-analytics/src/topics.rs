//! Key-topic extraction: hashtags first, then frequent words, then the
//! company name as a last resort.

use std::collections::HashMap;

use sentdash_core::TweetRecord;

use crate::aggregate::{mean_score, round2};
use crate::types::{SentimentSummary, TopicSummary};

/// Maximum topics reported per company.
pub const MAX_TOPICS: usize = 5;

/// Candidates taken from each source before truncation.
const TOPIC_CANDIDATES: usize = 10;

/// Score reported for a topic no row matches.
const UNMATCHED_TOPIC_SCORE: f64 = 0.5;

/// Lowercase words never reported as topics.
pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "and", "is", "in", "to", "a", "of", "for", "with", "on", "at", "from", "by", "about",
    "as", "an", "my", "i", "me", "you", "we", "they", "it", "this", "that",
];

/// Split a raw hashtag field into tags without their `#` markers.
///
/// Tokens that do not start with `#` are ignored. A bare `#` yields an empty
/// tag, which is kept.
#[must_use]
pub fn parse_hashtags(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split_whitespace()
            .filter(|token| token.starts_with('#'))
            .map(|token| token.trim_matches('#').to_string())
            .collect()
    })
    .unwrap_or_default()
}

/// Up to [`MAX_TOPICS`] topics for one company's rows.
#[must_use]
pub fn extract_topics(
    company: &str,
    rows: &[&TweetRecord],
    summary: &SentimentSummary,
) -> Vec<TopicSummary> {
    let mut topics = hashtag_topics(rows);

    if topics.len() < MAX_TOPICS {
        topics.extend(word_topics(rows));
    }

    if topics.len() < MAX_TOPICS && !topics.iter().any(|t| t.topic == company) {
        topics.push(TopicSummary {
            topic: company.to_string(),
            count: summary.total_tweets,
            sentiment_score: summary.overall_score,
        });
    }

    topics.truncate(MAX_TOPICS);
    topics
}

fn hashtag_topics(rows: &[&TweetRecord]) -> Vec<TopicSummary> {
    let tags: Vec<String> = rows
        .iter()
        .flat_map(|r| parse_hashtags(r.hashtags.as_deref()))
        .collect();

    ranked_counts(tags.iter().map(String::as_str))
        .into_iter()
        .take(TOPIC_CANDIDATES)
        .map(|(tag, count)| {
            let marker = format!("#{tag}");
            let matching: Vec<&TweetRecord> = rows
                .iter()
                .copied()
                .filter(|r| r.hashtags.as_deref().is_some_and(|h| h.contains(&marker)))
                .collect();
            TopicSummary {
                topic: tag.to_string(),
                count,
                sentiment_score: matched_score(&matching),
            }
        })
        .collect()
}

fn word_topics(rows: &[&TweetRecord]) -> Vec<TopicSummary> {
    let lowered: Vec<String> = rows.iter().map(|r| r.text.to_lowercase()).collect();
    let words = lowered
        .iter()
        .flat_map(|text| text.split_whitespace())
        .filter(|word| !STOP_WORDS.contains(word) && word.chars().count() > 3);

    ranked_counts(words)
        .into_iter()
        .take(TOPIC_CANDIDATES)
        .map(|(word, count)| {
            let matching: Vec<&TweetRecord> = rows
                .iter()
                .zip(&lowered)
                .filter(|(_, text)| text.contains(word))
                .map(|(r, _)| *r)
                .collect();
            TopicSummary {
                topic: capitalize(word),
                count,
                sentiment_score: matched_score(&matching),
            }
        })
        .collect()
}

fn matched_score(rows: &[&TweetRecord]) -> f64 {
    mean_score(rows).map_or(UNMATCHED_TOPIC_SCORE, round2)
}

/// Count tokens, most frequent first; equal counts keep first-encounter order.
fn ranked_counts<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for token in tokens {
        if let Some(&slot) = index.get(token) {
            counts[slot].1 += 1;
        } else {
            index.insert(token, counts.len());
            counts.push((token, 1));
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Titlecase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(word.len());
    match titlecase(first) {
        Some(title) => out.push_str(title),
        None => out.extend(first.to_uppercase()),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// Latin characters whose titlecase form differs from their uppercase form.
fn titlecase(c: char) -> Option<&'static str> {
    let title = match c {
        '\u{00DF}' => "Ss",
        '\u{01C4}'..='\u{01C6}' => "\u{01C5}",
        '\u{01C7}'..='\u{01C9}' => "\u{01C8}",
        '\u{01CA}'..='\u{01CC}' => "\u{01CB}",
        '\u{01F1}'..='\u{01F3}' => "\u{01F2}",
        '\u{FB00}' => "Ff",
        '\u{FB01}' => "Fi",
        '\u{FB02}' => "Fl",
        '\u{FB03}' => "Ffi",
        '\u{FB04}' => "Ffl",
        '\u{FB05}' | '\u{FB06}' => "St",
        _ => return None,
    };
    Some(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::sentiment_summary;
    use crate::test_support::{refs, tweet, with_hashtags, with_text};

    fn topics_for(company: &str, records: &[sentdash_core::TweetRecord]) -> Vec<TopicSummary> {
        let rows = refs(records);
        let summary = sentiment_summary(&rows);
        extract_topics(company, &rows, &summary)
    }

    fn labels(topics: &[TopicSummary]) -> Vec<&str> {
        topics.iter().map(|t| t.topic.as_str()).collect()
    }

    #[test]
    fn parse_hashtags_strips_markers() {
        assert_eq!(parse_hashtags(Some("#Foo #Bar")), vec!["Foo", "Bar"]);
        assert_eq!(parse_hashtags(Some("launch #tech day")), vec!["tech"]);
        assert_eq!(parse_hashtags(Some("##double#")), vec!["double"]);
    }

    #[test]
    fn parse_hashtags_handles_missing_and_blank() {
        assert!(parse_hashtags(None).is_empty());
        assert!(parse_hashtags(Some("")).is_empty());
        assert!(parse_hashtags(Some("   ")).is_empty());
        assert!(parse_hashtags(Some("no tags here")).is_empty());
    }

    #[test]
    fn parse_hashtags_keeps_empty_tag_from_bare_marker() {
        assert_eq!(parse_hashtags(Some("#")), vec![String::new()]);
    }

    #[test]
    fn capitalize_matches_title_case_of_a_single_word() {
        assert_eq!(capitalize("love"), "Love");
        assert_eq!(capitalize("iPHONE"), "Iphone");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize_uses_titlecase_for_digraphs_and_ligatures() {
        assert_eq!(capitalize("\u{01C6}emal"), "\u{01C5}emal");
        assert_eq!(capitalize("\u{01C9}ubljana"), "\u{01C8}ubljana");
        assert_eq!(capitalize("\u{01F1}ZZ"), "\u{01F2}zz");
        assert_eq!(capitalize("\u{00DF}tra\u{00DF}e"), "Sstra\u{00DF}e");
        assert_eq!(capitalize("\u{FB01}nance"), "Finance");
    }

    #[test]
    fn ranked_counts_breaks_ties_by_first_encounter() {
        let ranked = ranked_counts(["b", "a", "c", "a", "c"]);
        assert_eq!(ranked, vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn word_fallback_then_company_name() {
        let records = vec![
            with_text(tweet("1", "Acme", "positive", 0.9), "love this"),
            with_text(tweet("2", "Acme", "negative", 0.1), "hate that"),
        ];
        let topics = topics_for("Acme", &records);

        assert_eq!(labels(&topics), vec!["Love", "Hate", "Acme"]);
        assert_eq!(topics[0].count, 1);
        assert!((topics[0].sentiment_score - 0.9).abs() < 1e-9);
        assert!((topics[1].sentiment_score - 0.1).abs() < 1e-9);
        assert_eq!(topics[2].count, 2);
        assert!((topics[2].sentiment_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn stop_words_and_short_tokens_are_dropped() {
        let records = vec![with_text(
            tweet("1", "Acme", "positive", 0.8),
            "about them and the new ipad from apple",
        )];
        let topics = topics_for("Acme", &records);
        assert_eq!(labels(&topics), vec!["Them", "Ipad", "Apple", "Acme"]);
    }

    #[test]
    fn word_sentiment_uses_case_insensitive_substring() {
        let records = vec![
            with_text(tweet("1", "Acme", "positive", 0.9), "Battery battery"),
            with_text(tweet("2", "Acme", "negative", 0.2), "BATTERYPACK died"),
        ];
        let topics = topics_for("Acme", &records);
        let battery = topics.iter().find(|t| t.topic == "Battery").unwrap();
        assert_eq!(battery.count, 2);
        assert!((battery.sentiment_score - 0.55).abs() < 1e-9);
    }

    #[test]
    fn hashtag_sentiment_over_matches_prefixes() {
        let records = vec![
            with_text(
                with_hashtags(tweet("1", "Acme", "positive", 0.9), "#ai #rust"),
                "ok",
            ),
            with_text(
                with_hashtags(tweet("2", "Acme", "negative", 0.1), "#aiwatch"),
                "no",
            ),
        ];
        let topics = topics_for("Acme", &records);

        assert_eq!(labels(&topics), vec!["ai", "rust", "aiwatch", "Acme"]);
        assert!((topics[0].sentiment_score - 0.5).abs() < 1e-9);
        assert!((topics[1].sentiment_score - 0.9).abs() < 1e-9);
        assert!((topics[2].sentiment_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn hashtags_fill_all_slots_before_words() {
        let records = vec![
            with_hashtags(
                tweet("1", "Acme", "positive", 0.9),
                "#one #two #three #four #five #six",
            ),
            with_hashtags(tweet("2", "Acme", "positive", 0.7), "#six"),
        ];
        let topics = topics_for("Acme", &records);
        assert_eq!(topics.len(), MAX_TOPICS);
        assert_eq!(labels(&topics), vec!["six", "one", "two", "three", "four"]);
        assert_eq!(topics[0].count, 2);
    }

    #[test]
    fn company_topic_is_not_duplicated() {
        let records = vec![with_hashtags(
            with_text(tweet("1", "Acme", "positive", 0.9), "ok"),
            "#Acme",
        )];
        let topics = topics_for("Acme", &records);
        assert_eq!(labels(&topics), vec!["Acme"]);
        assert_eq!(topics[0].count, 1);
    }

    #[test]
    fn extraction_is_idempotent() {
        let records = vec![
            with_hashtags(
                with_text(tweet("1", "Acme", "positive", 0.9), "amazing camera quality"),
                "#Launch",
            ),
            with_text(tweet("2", "Acme", "negative", 0.2), "camera broke again"),
        ];
        assert_eq!(topics_for("Acme", &records), topics_for("Acme", &records));
    }
}
