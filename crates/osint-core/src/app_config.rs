use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::posts::Platform;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Output artifact kinds selectable through `REPORT_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Html,
    Text,
}

impl ReportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Text => "txt",
        }
    }

    /// Parse a comma-separated list such as `json,html`. Duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownReportFormat`] for any unrecognized entry.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, CoreError> {
        let mut formats = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let format = part.parse::<ReportFormat>()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }
}

impl FromStr for ReportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(CoreError::UnknownReportFormat(other.to_string())),
        }
    }
}

/// How the Reddit collector authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedditMode {
    /// Client-credentials OAuth against `oauth.reddit.com`.
    OAuth,
    /// Public `.json` endpoints, no credentials.
    Anonymous,
}

/// Reddit and Twitter return at most this many posts per search request.
pub const MAX_POSTS_PER_PLATFORM: usize = 100;

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub twitter_bearer_token: Option<String>,
    pub max_posts_per_platform: usize,
    pub request_timeout_secs: u64,
    pub collector_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub fetch_articles: bool,
    pub output_directory: PathBuf,
    pub report_formats: Vec<ReportFormat>,
    pub sources_path: Option<PathBuf>,
}

impl AppConfig {
    #[must_use]
    pub fn reddit_mode(&self) -> RedditMode {
        if self.reddit_client_id.is_some() && self.reddit_client_secret.is_some() {
            RedditMode::OAuth
        } else {
            RedditMode::Anonymous
        }
    }

    #[must_use]
    pub fn has_twitter_credentials(&self) -> bool {
        self.twitter_bearer_token.is_some()
    }

    /// Platforms that can be queried with the current credentials.
    ///
    /// Reddit falls back to anonymous access and news needs no credentials,
    /// so only Twitter can be missing.
    #[must_use]
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| *p != Platform::Twitter || self.has_twitter_credentials())
            .collect()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "reddit_client_id",
                &self.reddit_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_secret",
                &self.reddit_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("max_posts_per_platform", &self.max_posts_per_platform)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("collector_timeout_secs", &self.collector_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("fetch_articles", &self.fetch_articles)
            .field("output_directory", &self.output_directory)
            .field("report_formats", &self.report_formats)
            .field("sources_path", &self.sources_path)
            .finish()
    }
}
