use std::collections::HashSet;

use chrono::{Local, TimeZone};
use log::info;

use crate::records::SearchResultRecord;

/// Field the final descending sort ranks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    Score,
    Engagement,
}

impl RankKey {
    fn value_of(self, record: &SearchResultRecord) -> i64 {
        match self {
            RankKey::Score => record.score,
            RankKey::Engagement => record.engagement,
        }
    }
}

/// Cleans the accumulated records, in fixed step order: stamp display dates,
/// drop excluded subreddits, apply the optional engagement threshold, drop
/// duplicate post URLs (first one wins), then sort descending by rank key.
/// The sort is stable, so ties keep their first-seen order.
pub fn clean(
    records: Vec<SearchResultRecord>,
    exclusions: &HashSet<String>,
    rank_key: RankKey,
    engagement_threshold: Option<i64>,
) -> Vec<SearchResultRecord> {
    let before = records.len();

    let mut cleaned: Vec<SearchResultRecord> = records
        .into_iter()
        .map(stamp_display_date)
        .filter(|r| !exclusions.contains(&r.subreddit.to_lowercase()))
        .collect();

    if let Some(threshold) = engagement_threshold {
        // Exactly at the threshold is out.
        cleaned.retain(|r| r.engagement > threshold);
    }

    let mut seen = HashSet::new();
    cleaned.retain(|r| seen.insert(r.post_url.clone()));

    cleaned.sort_by(|a, b| rank_key.value_of(b).cmp(&rank_key.value_of(a)));

    info!("Cleaned {} records down to {}.", before, cleaned.len());
    cleaned
}

fn stamp_display_date(mut record: SearchResultRecord) -> SearchResultRecord {
    record.created = Local
        .timestamp_opt(record.created_utc, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string());
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(id: &str, subreddit: &str, score: i64, comments: u32) -> SearchResultRecord {
        SearchResultRecord {
            title: format!("post {}", id),
            subreddit: subreddit.to_string(),
            keyword: "alpha".to_string(),
            score,
            comments,
            post_url: format!("https://www.reddit.com/{}", id),
            url: "https://example.com/".to_string(),
            created_utc: 1_700_000_000,
            created: None,
            engagement: score + i64::from(comments),
        }
    }

    fn no_exclusions() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn excluded_subreddits_are_dropped_case_insensitively() {
        let exclusions: HashSet<String> = ["news".to_string()].into_iter().collect();
        let records = vec![
            record("a", "News", 10, 0),
            record("b", "rust", 5, 0),
            record("c", "news", 1, 0),
        ];

        let out = clean(records, &exclusions, RankKey::Score, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].subreddit, "rust");
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let records = vec![
            record("a", "rust", 10, 0), // engagement 10 == threshold, out
            record("b", "rust", 10, 1), // engagement 11, stays
        ];

        let out = clean(records, &no_exclusions(), RankKey::Engagement, Some(10));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].post_url, "https://www.reddit.com/b");
    }

    #[test]
    fn duplicate_post_urls_keep_the_first_occurrence() {
        let mut first = record("x1", "rust", 3, 0);
        first.keyword = "alpha".to_string();
        let mut second = record("x1", "rust", 3, 0);
        second.keyword = "beta".to_string();

        let out = clean(vec![first, second], &no_exclusions(), RankKey::Score, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].keyword, "alpha");
    }

    #[test]
    fn deduplication_is_idempotent() {
        let records = vec![
            record("x1", "rust", 3, 0),
            record("x1", "rust", 3, 0),
            record("x2", "rust", 2, 0),
        ];

        let once = clean(records, &no_exclusions(), RankKey::Score, None);
        let urls_once: Vec<String> = once.iter().map(|r| r.post_url.clone()).collect();
        let twice = clean(once, &no_exclusions(), RankKey::Score, None);
        let urls_twice: Vec<String> = twice.iter().map(|r| r.post_url.clone()).collect();
        assert_eq!(urls_once, urls_twice);
    }

    #[test]
    fn sort_is_descending_and_stable_on_ties() {
        let records = vec![
            record("low", "rust", 1, 0),
            record("tie_first", "rust", 7, 0),
            record("high", "rust", 9, 0),
            record("tie_second", "rust", 7, 0),
        ];

        let out = clean(records, &no_exclusions(), RankKey::Score, None);
        let ids: Vec<&str> = out
            .iter()
            .map(|r| r.post_url.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["high", "tie_first", "tie_second", "low"]);
    }

    #[test]
    fn engagement_rank_orders_by_score_plus_comments() {
        let records = vec![
            record("a", "rust", 10, 0),  // engagement 10
            record("b", "rust", 2, 20),  // engagement 22
        ];

        let out = clean(records, &no_exclusions(), RankKey::Engagement, None);
        assert_eq!(out[0].post_url, "https://www.reddit.com/b");
    }

    #[test]
    fn display_date_is_stamped_and_parseable() {
        let out = clean(
            vec![record("a", "rust", 1, 0)],
            &no_exclusions(),
            RankKey::Score,
            None,
        );
        let created = out[0].created.as_deref().unwrap();
        assert!(NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = clean(Vec::new(), &no_exclusions(), RankKey::Score, Some(5));
        assert!(out.is_empty());
    }
}
