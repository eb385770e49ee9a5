use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;

use crate::config::RedditCredentials;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const SEARCH_URL: &str = "https://oauth.reddit.com/r/all/search";

/// Lookback window for a search, mapped onto the API's `t` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }

    /// Maps the interactive menu choice (1-5) onto a range.
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(TimeRange::Day),
            2 => Some(TimeRange::Week),
            3 => Some(TimeRange::Month),
            4 => Some(TimeRange::Year),
            5 => Some(TimeRange::All),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("token request rejected with status {0}")]
    AuthRejected(reqwest::StatusCode),
}

/// One post as returned by the search listing, before mapping into a record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_utc: f64,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Deserialize)]
struct Thing {
    data: RawPost,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct RedditClient {
    client: Client,
    token: String,
}

impl RedditClient {
    /// Builds the HTTP client and fetches an app-only bearer token.
    pub fn connect(creds: &RedditCredentials) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&creds.user_agent) {
            headers.insert(USER_AGENT, ua);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        let resp = client
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        if !resp.status().is_success() {
            return Err(SearchError::AuthRejected(resp.status()));
        }

        let token: TokenResponse = serde_json::from_str(&resp.text()?)?;
        info!("Authenticated with the Reddit API.");

        Ok(RedditClient {
            client,
            token: token.access_token,
        })
    }

    /// Issues one ranked search for a keyword, returning up to `limit` posts.
    /// No retry here: a failed request aborts the run.
    pub fn search(
        &self,
        keyword: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<RawPost>, SearchError> {
        let limit = limit.to_string();
        let resp = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(&self.token)
            .query(&[
                ("q", keyword),
                ("sort", "top"),
                ("syntax", "lucene"),
                ("t", time_range.as_str()),
                ("limit", limit.as_str()),
                ("restrict_sr", "1"),
            ])
            .send()?
            .error_for_status()?;

        let listing: Listing = serde_json::from_str(&resp.text()?)?;
        let posts: Vec<RawPost> = listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data)
            .collect();

        if posts.is_empty() {
            warn!("No results for '{}'", keyword);
        }
        Ok(posts)
    }
}
