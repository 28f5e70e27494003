//! Twitter/X collector via the API v2 recent search endpoint.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use osint_core::{AppConfig, Platform, PostMetrics, PostRecord};
use reqwest::Client;
use serde::Deserialize;

use crate::collector::RetryPolicy;
use crate::error::{validate_keyword, CollectError};
use crate::http::{build_client, check_status};
use crate::reddit::hashtag_query;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
const USER_AGENT: &str = "osint-analyzer/0.1 (keyword monitor)";
const TWEET_FIELDS: &str = "created_at,public_metrics,author_id,lang";
/// API bounds for `max_results` on recent search.
const MIN_RESULTS: usize = 10;
const MAX_RESULTS: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    lang: Option<String>,
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    retweet_count: i64,
    #[serde(default)]
    reply_count: i64,
    #[serde(default)]
    like_count: i64,
    #[serde(default)]
    quote_count: i64,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    username: String,
}

pub struct TwitterCollector {
    client: Client,
    bearer_token: String,
    base_url: String,
    retry: RetryPolicy,
}

impl TwitterCollector {
    /// Creates a collector pointed at the production Twitter API.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] if the HTTP client cannot be built.
    pub fn new(bearer_token: &str, timeout_secs: u64, retry: RetryPolicy) -> Result<Self, CollectError> {
        Self::with_base_url(bearer_token, timeout_secs, retry, DEFAULT_BASE_URL)
    }

    /// Build from configuration. Returns `Ok(None)` when no bearer token is set.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, CollectError> {
        config
            .twitter_bearer_token
            .as_deref()
            .map(|token| Self::new(token, config.request_timeout_secs, RetryPolicy::from_config(config)))
            .transpose()
    }

    /// Creates a collector with a custom base URL (for wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] if the HTTP client cannot be built.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
        base_url: &str,
    ) -> Result<Self, CollectError> {
        let client = build_client(Platform::Twitter, timeout_secs, USER_AGENT)?;
        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// Search tweets from the last seven days.
    ///
    /// # Errors
    ///
    /// - [`CollectError::InvalidSearch`] for an empty keyword.
    /// - [`CollectError::Authentication`] on 401/403.
    /// - [`CollectError::RateLimited`] after all retries are exhausted.
    /// - [`CollectError::Network`], [`CollectError::Data`], or
    ///   [`CollectError::UnexpectedStatus`] for other failures.
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        let keyword = validate_keyword(keyword)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut records =
            retry_with_backoff(self.retry.max_retries, self.retry.backoff_base_secs, || {
                self.search_once(keyword, limit)
            })
            .await?;
        records.truncate(limit);

        tracing::debug!(
            platform = "twitter",
            keyword,
            count = records.len(),
            "collected tweets"
        );
        Ok(records)
    }

    /// Search for a hashtag, adding the leading `#` when missing.
    ///
    /// # Errors
    ///
    /// Same as [`TwitterCollector::search`].
    pub async fn search_hashtag(&self, tag: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        self.search(&hashtag_query(tag), limit).await
    }

    async fn search_once(&self, keyword: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        let max_results = limit.clamp(MIN_RESULTS, MAX_RESULTS).to_string();
        let response = self
            .client
            .get(format!("{}/2/tweets/search/recent", self.base_url))
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", keyword),
                ("max_results", max_results.as_str()),
                ("tweet.fields", TWEET_FIELDS),
                ("expansions", "author_id"),
            ])
            .send()
            .await
            .map_err(|e| CollectError::network(Platform::Twitter, e))?;
        let response = check_status(Platform::Twitter, response)?;

        let body = response
            .text()
            .await
            .map_err(|e| CollectError::network(Platform::Twitter, e))?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            CollectError::data(Platform::Twitter, format!("search response parse error: {e}"))
        })?;

        Ok(to_records(parsed))
    }
}

fn to_records(response: SearchResponse) -> Vec<PostRecord> {
    let usernames: HashMap<String, String> = response
        .includes
        .map(|inc| inc.users.into_iter().map(|u| (u.id, u.username)).collect())
        .unwrap_or_default();

    response
        .data
        .into_iter()
        .map(|tweet| {
            let author = tweet
                .author_id
                .as_ref()
                .and_then(|id| usernames.get(id))
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            let metrics = tweet.public_metrics.unwrap_or_default();
            PostRecord {
                platform: Platform::Twitter,
                url: format!("https://twitter.com/i/web/status/{}", tweet.id),
                id: tweet.id,
                title: None,
                text: tweet.text,
                author,
                created_at: tweet.created_at,
                source: tweet.lang,
                metrics: PostMetrics {
                    score: None,
                    likes: Some(metrics.like_count),
                    comments: Some(metrics.reply_count),
                    shares: Some(metrics.retweet_count + metrics.quote_count),
                },
            }
        })
        .collect()
}
