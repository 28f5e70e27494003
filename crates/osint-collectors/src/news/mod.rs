//! News collector: RSS search feeds plus optional article scraping.
//!
//! Feeds are fetched concurrently. A failing feed is logged and skipped; the
//! search only fails when every configured feed failed. Items are
//! de-duplicated by link and filtered for keyword relevance.

pub mod article;
pub mod rss;

use std::collections::HashSet;

use futures::future::join_all;
use osint_core::{AppConfig, FeedConfig, NewsSettings, Platform, PostMetrics, PostRecord};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::collector::RetryPolicy;
use crate::error::{validate_keyword, CollectError};
use crate::http::{build_client, check_status};
use crate::retry::retry_with_backoff;

use self::article::fetch_article;
use self::rss::{parse_rss, FeedItem};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
/// Descriptions shorter than this are enriched from the article page when
/// article fetching is enabled.
const SHORT_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct NewsOptions {
    pub feeds: Vec<FeedConfig>,
    pub max_items_per_feed: usize,
    pub fetch_articles: bool,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl NewsOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, settings: &NewsSettings) -> Self {
        Self {
            feeds: settings.feeds.clone(),
            max_items_per_feed: settings.max_items_per_feed,
            fetch_articles: config.fetch_articles,
            timeout_secs: config.request_timeout_secs,
            retry: RetryPolicy::from_config(config),
        }
    }
}

pub struct NewsCollector {
    client: Client,
    feeds: Vec<FeedConfig>,
    max_items_per_feed: usize,
    fetch_articles: bool,
    retry: RetryPolicy,
}

impl NewsCollector {
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] if the HTTP client cannot be built.
    pub fn new(options: NewsOptions) -> Result<Self, CollectError> {
        let client = build_client(Platform::News, options.timeout_secs, USER_AGENT)?;
        Ok(Self {
            client,
            feeds: options.feeds,
            max_items_per_feed: options.max_items_per_feed,
            fetch_articles: options.fetch_articles,
            retry: options.retry,
        })
    }

    #[must_use]
    pub fn feed_names(&self) -> Vec<&str> {
        self.feeds.iter().map(|f| f.name.as_str()).collect()
    }

    /// Search every configured feed for `keyword`.
    ///
    /// # Errors
    ///
    /// - [`CollectError::InvalidSearch`] for an empty keyword.
    /// - The last feed error when every feed failed.
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        let keyword = validate_keyword(keyword)?;
        if limit == 0 || self.feeds.is_empty() {
            return Ok(Vec::new());
        }

        let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
        let results = join_all(self.feeds.iter().map(|feed| self.fetch_feed(feed, &encoded))).await;

        let mut items = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0usize;
        for (feed, result) in self.feeds.iter().zip(results) {
            match result {
                Ok(feed_items) => {
                    tracing::debug!(
                        platform = "news",
                        feed = feed.name.as_str(),
                        count = feed_items.len(),
                        "fetched news feed"
                    );
                    succeeded += 1;
                    items.extend(feed_items);
                }
                Err(e) => {
                    tracing::warn!(
                        platform = "news",
                        feed = feed.name.as_str(),
                        error = %e,
                        "news feed fetch failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            if let Some(err) = last_error {
                return Err(err);
            }
        }

        let items = select_relevant(dedupe_by_link(items), keyword, limit);
        let mut records: Vec<PostRecord> = items.into_iter().map(to_record).collect();

        if self.fetch_articles {
            self.enrich(&mut records).await;
        }

        tracing::debug!(
            platform = "news",
            keyword,
            count = records.len(),
            "collected news articles"
        );
        Ok(records)
    }

    async fn fetch_feed(&self, feed: &FeedConfig, encoded_query: &str) -> Result<Vec<FeedItem>, CollectError> {
        let url = feed.render(encoded_query);
        retry_with_backoff(self.retry.max_retries, self.retry.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "application/rss+xml,application/xml;q=0.9,*/*;q=0.8",
                    )
                    .send()
                    .await
                    .map_err(|e| CollectError::network(Platform::News, e))?;
                let response = check_status(Platform::News, response)?;
                let body = response
                    .text()
                    .await
                    .map_err(|e| CollectError::network(Platform::News, e))?;
                parse_rss(&body, self.max_items_per_feed).map_err(|e| {
                    CollectError::data(Platform::News, format!("feed '{}' is not valid RSS: {e}", feed.name))
                })
            }
        })
        .await
    }

    /// Replace short descriptions with article body text. Failures keep the
    /// feed description.
    async fn enrich(&self, records: &mut [PostRecord]) {
        let targets: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.text.chars().count() < SHORT_DESCRIPTION_LEN)
            .map(|(i, _)| i)
            .collect();

        let fetched = join_all(
            targets
                .iter()
                .map(|&i| fetch_article(&self.client, &records[i].url)),
        )
        .await;

        for (i, result) in targets.into_iter().zip(fetched) {
            match result {
                Ok(article) => {
                    let record = &mut records[i];
                    if article.text.chars().count() > record.text.chars().count() {
                        record.text = article.text;
                    } else if let Some(description) = article.description {
                        if description.chars().count() > record.text.chars().count() {
                            record.text = description;
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        platform = "news",
                        url = records[i].url.as_str(),
                        error = %e,
                        "article fetch failed, keeping feed description"
                    );
                }
            }
        }
    }
}

fn dedupe_by_link(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.link.clone()))
        .collect()
}

/// Items mentioning every keyword term come first. When fewer than half of
/// `limit` (rounded up) are relevant, the rest is topped up with other items
/// in feed order since search feeds match on fields they do not return.
fn select_relevant(items: Vec<FeedItem>, keyword: &str, limit: usize) -> Vec<FeedItem> {
    let terms: Vec<String> = keyword
        .split_whitespace()
        .map(|t| t.trim_start_matches('#').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let (relevant, other): (Vec<FeedItem>, Vec<FeedItem>) = items.into_iter().partition(|item| {
        let haystack = format!("{} {}", item.title, item.description).to_lowercase();
        terms.iter().all(|t| haystack.contains(t.as_str()))
    });

    let mut selected = relevant;
    if selected.len() < limit.div_ceil(2) {
        selected.extend(other);
    }
    selected.truncate(limit);
    selected
}

fn to_record(item: FeedItem) -> PostRecord {
    let outlet = item.source.clone().or_else(|| host_of(&item.link));
    PostRecord {
        platform: Platform::News,
        id: item.link.clone(),
        title: Some(item.title),
        text: item.description,
        author: outlet.clone().unwrap_or_else(|| "Unknown".to_string()),
        created_at: item.published,
        url: item.link,
        source: outlet,
        metrics: PostMetrics::default(),
    }
}

fn host_of(link: &str) -> Option<String> {
    reqwest::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str, description: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: link.to_string(),
            description: description.to_string(),
            published: None,
            source: None,
        }
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let items = vec![
            item("a", "https://x.com/1", ""),
            item("b", "https://x.com/1", ""),
            item("c", "https://x.com/2", ""),
        ];
        let deduped = dedupe_by_link(items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "a");
    }

    #[test]
    fn relevant_items_come_first() {
        let items = vec![
            item("Unrelated", "https://x.com/1", "nothing here"),
            item("Rust Lang news", "https://x.com/2", ""),
            item("Other", "https://x.com/3", "about rust lang"),
        ];
        let selected = select_relevant(items, "rust lang", 2);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].link, "https://x.com/2");
        assert_eq!(selected[1].link, "https://x.com/3");
    }

    #[test]
    fn tops_up_when_few_relevant() {
        let items = vec![
            item("Unrelated", "https://x.com/1", ""),
            item("Rust news", "https://x.com/2", ""),
            item("Other", "https://x.com/3", ""),
        ];
        let selected = select_relevant(items, "rust", 10);
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].link, "https://x.com/2");
    }

    #[test]
    fn limit_of_one_is_topped_up() {
        let items = vec![
            item("Unrelated", "https://x.com/1", ""),
            item("Other", "https://x.com/2", ""),
        ];
        let selected = select_relevant(items, "rust", 1);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].link, "https://x.com/1");
    }

    #[test]
    fn odd_limit_tops_up_below_half() {
        let items = vec![
            item("Rust news", "https://x.com/1", ""),
            item("Unrelated", "https://x.com/2", ""),
            item("Other", "https://x.com/3", ""),
        ];
        let selected = select_relevant(items, "rust", 3);
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].link, "https://x.com/1");
    }

    #[test]
    fn record_uses_outlet_or_host() {
        let mut with_source = item("t", "https://www.example.org/a", "d");
        with_source.source = Some("Example Daily".to_string());
        let record = to_record(with_source);
        assert_eq!(record.author, "Example Daily");
        assert_eq!(record.id, "https://www.example.org/a");

        let record = to_record(item("t", "https://www.example.org/a", "d"));
        assert_eq!(record.source.as_deref(), Some("example.org"));
    }
}
