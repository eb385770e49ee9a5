use serde::Serialize;

use crate::search_client::RawPost;

pub const POST_URL_PREFIX: &str = "https://www.reddit.com/";

/// One retrieved post. `post_url` is the canonical identity used for
/// de-duplication; `created` stays empty until the cleaner stamps the
/// display date from `created_utc`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultRecord {
    pub title: String,
    pub subreddit: String,
    pub keyword: String,
    pub score: i64,
    pub comments: u32,
    pub post_url: String,
    pub url: String,
    pub created_utc: i64,
    pub created: Option<String>,
    pub engagement: i64,
}

/// Append-only collection of records, built up across all keyword searches.
/// Collection only: de-duplication and filtering belong to the cleaner.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    records: Vec<SearchResultRecord>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps one raw API item into a record and appends it.
    pub fn append(&mut self, keyword: &str, raw: &RawPost) {
        let engagement = raw.score + i64::from(raw.num_comments);
        self.records.push(SearchResultRecord {
            title: raw.title.clone(),
            subreddit: raw.subreddit.clone(),
            keyword: keyword.to_string(),
            score: raw.score,
            comments: raw.num_comments,
            post_url: format!("{}{}", POST_URL_PREFIX, raw.id),
            url: raw.url.clone(),
            created_utc: raw.created_utc as i64,
            created: None,
            engagement,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns everything accumulated so far, in insertion order.
    pub fn finalize(self) -> Vec<SearchResultRecord> {
        self.records
    }
}
