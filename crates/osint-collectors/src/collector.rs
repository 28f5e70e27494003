use osint_core::{AppConfig, Platform, PostRecord, SourcesConfig};

use crate::error::CollectError;
use crate::news::{NewsCollector, NewsOptions};
use crate::reddit::{RedditCollector, RedditOptions};
use crate::twitter::TwitterCollector;

/// Bounded retry settings shared by all collectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first rate-limited request.
    pub max_retries: u32,
    /// Base delay for exponential back-off, in seconds.
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    /// No retries and no sleeping.
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        backoff_base_secs: 0,
    };

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        }
    }
}

/// Closed set of platform collectors.
pub enum PlatformCollector {
    Reddit(RedditCollector),
    Twitter(TwitterCollector),
    News(NewsCollector),
}

impl PlatformCollector {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            PlatformCollector::Reddit(_) => Platform::Reddit,
            PlatformCollector::Twitter(_) => Platform::Twitter,
            PlatformCollector::News(_) => Platform::News,
        }
    }

    /// Search for posts mentioning `keyword`, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns the platform's [`CollectError`].
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        match self {
            PlatformCollector::Reddit(c) => c.search(keyword, limit).await,
            PlatformCollector::Twitter(c) => c.search(keyword, limit).await,
            PlatformCollector::News(c) => c.search(keyword, limit).await,
        }
    }

    /// Hashtag search. News feeds have no hashtag concept, so the tag is
    /// searched as a plain keyword there.
    ///
    /// # Errors
    ///
    /// Returns the platform's [`CollectError`].
    pub async fn search_hashtag(&self, tag: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        match self {
            PlatformCollector::Reddit(c) => c.search_hashtag(tag, limit).await,
            PlatformCollector::Twitter(c) => c.search_hashtag(tag, limit).await,
            PlatformCollector::News(c) => c.search(tag.trim().trim_start_matches('#'), limit).await,
        }
    }
}

/// Build every collector the configuration allows.
///
/// Twitter is skipped without a bearer token; Reddit and news are always
/// available.
///
/// # Errors
///
/// Returns [`CollectError::Network`] if an HTTP client cannot be built.
pub fn build_collectors(
    config: &AppConfig,
    sources: &SourcesConfig,
) -> Result<Vec<PlatformCollector>, CollectError> {
    let mut collectors = Vec::with_capacity(Platform::ALL.len());

    collectors.push(PlatformCollector::Reddit(RedditCollector::new(
        RedditOptions::from_config(config, &sources.reddit),
    )?));

    match TwitterCollector::from_config(config)? {
        Some(twitter) => collectors.push(PlatformCollector::Twitter(twitter)),
        None => tracing::info!(
            platform = "twitter",
            "TWITTER_BEARER_TOKEN not set, Twitter collector disabled"
        ),
    }

    collectors.push(PlatformCollector::News(NewsCollector::new(
        NewsOptions::from_config(config, &sources.news),
    )?));

    Ok(collectors)
}
