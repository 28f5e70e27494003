use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder substituted with the URL-encoded search query.
pub const QUERY_PLACEHOLDER: &str = "{query}";

const SORTS: [&str; 5] = ["relevance", "hot", "top", "new", "comments"];
const TIME_FILTERS: [&str; 6] = ["hour", "day", "week", "month", "year", "all"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedditSettings {
    #[serde(default = "default_subreddit")]
    pub subreddit: String,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_time_filter")]
    pub time_filter: String,
}

impl Default for RedditSettings {
    fn default() -> Self {
        Self {
            subreddit: default_subreddit(),
            sort: default_sort(),
            time_filter: default_time_filter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    /// RSS URL template containing `{query}`.
    pub url: String,
}

impl FeedConfig {
    /// Fill the template with an already-encoded query.
    #[must_use]
    pub fn render(&self, encoded_query: &str) -> String {
        self.url.replace(QUERY_PLACEHOLDER, encoded_query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSettings {
    #[serde(default = "default_max_items_per_feed")]
    pub max_items_per_feed: usize,
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedConfig>,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            max_items_per_feed: default_max_items_per_feed(),
            feeds: default_feeds(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub reddit: RedditSettings,
    #[serde(default)]
    pub news: NewsSettings,
}

impl SourcesConfig {
    /// Load from `path` when given, otherwise use the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_sources(path),
            None => Ok(Self::default()),
        }
    }
}

/// Load and validate the sources configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources: SourcesConfig =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources)?;

    Ok(sources)
}

fn validate_sources(sources: &SourcesConfig) -> Result<(), ConfigError> {
    let reddit = &sources.reddit;
    if reddit.subreddit.trim().is_empty() {
        return Err(ConfigError::Validation(
            "reddit.subreddit must be non-empty".to_string(),
        ));
    }
    if !SORTS.contains(&reddit.sort.as_str()) {
        return Err(ConfigError::Validation(format!(
            "reddit.sort '{}' must be one of {}",
            reddit.sort,
            SORTS.join(", ")
        )));
    }
    if !TIME_FILTERS.contains(&reddit.time_filter.as_str()) {
        return Err(ConfigError::Validation(format!(
            "reddit.time_filter '{}' must be one of {}",
            reddit.time_filter,
            TIME_FILTERS.join(", ")
        )));
    }

    if sources.news.max_items_per_feed == 0 {
        return Err(ConfigError::Validation(
            "news.max_items_per_feed must be greater than zero".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for feed in &sources.news.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }
        if !seen_names.insert(feed.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed name: '{}'",
                feed.name
            )));
        }
        if !feed.url.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "feed '{}' url must contain {QUERY_PLACEHOLDER}",
                feed.name
            )));
        }
        if !(feed.url.starts_with("http://") || feed.url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "feed '{}' url must be http(s)",
                feed.name
            )));
        }
    }

    Ok(())
}

fn default_subreddit() -> String {
    "all".to_string()
}

fn default_sort() -> String {
    "relevance".to_string()
}

fn default_time_filter() -> String {
    "week".to_string()
}

fn default_max_items_per_feed() -> usize {
    50
}

fn default_feeds() -> Vec<FeedConfig> {
    vec![
        FeedConfig {
            name: "google_news".to_string(),
            url: "https://news.google.com/rss/search?q={query}&hl=en-US&gl=US&ceid=US:en"
                .to_string(),
        },
        FeedConfig {
            name: "bing_news".to_string(),
            url: "https://www.bing.com/news/search?q={query}&format=rss".to_string(),
        },
    ]
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
