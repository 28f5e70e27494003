//! Reddit search collector.
//!
//! Uses client-credentials OAuth against `oauth.reddit.com` when an app id and
//! secret are configured, otherwise the public `search.json` endpoint on
//! `www.reddit.com`. Both modes return the same listing shape.

use std::time::{Duration, Instant};

use osint_core::{AppConfig, Platform, PostRecord, RedditSettings};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::collector::RetryPolicy;
use crate::error::{validate_keyword, CollectError};
use crate::http::{build_client, check_status};
use crate::reddit_helpers::{search_params, to_record, Listing, TokenResponse};
use crate::retry::retry_with_backoff;

const OAUTH_API_BASE: &str = "https://oauth.reddit.com";
const PUBLIC_API_BASE: &str = "https://www.reddit.com";
const AUTH_BASE: &str = "https://www.reddit.com";
/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
/// Tokens are refreshed this long before Reddit expires them.
const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn new(value: String, expires_in: Option<u64>) -> Self {
        let ttl = expires_in
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
            .saturating_sub(TOKEN_REFRESH_MARGIN_SECS);
        Self {
            value,
            refresh_at: Instant::now() + Duration::from_secs(ttl),
        }
    }

    fn is_fresh(&self) -> bool {
        Instant::now() < self.refresh_at
    }
}

#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &"[redacted]")
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Everything needed to build a [`RedditCollector`].
#[derive(Debug, Clone)]
pub struct RedditOptions {
    /// `None` selects anonymous mode.
    pub credentials: Option<RedditCredentials>,
    pub user_agent: String,
    pub settings: RedditSettings,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl RedditOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, settings: &RedditSettings) -> Self {
        let credentials = match (&config.reddit_client_id, &config.reddit_client_secret) {
            (Some(id), Some(secret)) => Some(RedditCredentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        };
        Self {
            credentials,
            user_agent: config.reddit_user_agent.clone(),
            settings: settings.clone(),
            timeout_secs: config.request_timeout_secs,
            retry: RetryPolicy::from_config(config),
        }
    }
}

pub struct RedditCollector {
    client: Client,
    credentials: Option<RedditCredentials>,
    settings: RedditSettings,
    api_base: String,
    auth_base: String,
    retry: RetryPolicy,
    token: Mutex<Option<CachedToken>>,
}

impl RedditCollector {
    /// Creates a collector pointed at the production Reddit endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] if the HTTP client cannot be built.
    pub fn new(options: RedditOptions) -> Result<Self, CollectError> {
        let api_base = if options.credentials.is_some() {
            OAUTH_API_BASE
        } else {
            PUBLIC_API_BASE
        };
        Self::with_base_url(options, api_base, AUTH_BASE)
    }

    /// Creates a collector with custom API and token endpoints (for wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Network`] if the HTTP client cannot be built.
    pub fn with_base_url(
        options: RedditOptions,
        api_base: &str,
        auth_base: &str,
    ) -> Result<Self, CollectError> {
        let client = build_client(Platform::Reddit, options.timeout_secs, &options.user_agent)?;
        Ok(Self {
            client,
            credentials: options.credentials,
            settings: options.settings,
            api_base: api_base.trim_end_matches('/').to_string(),
            auth_base: auth_base.trim_end_matches('/').to_string(),
            retry: options.retry,
            token: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Search the configured subreddit for `keyword`.
    ///
    /// # Errors
    ///
    /// - [`CollectError::InvalidSearch`] for an empty keyword.
    /// - [`CollectError::Authentication`] if the token exchange or search is rejected.
    /// - [`CollectError::RateLimited`] after all retries are exhausted.
    /// - [`CollectError::Network`], [`CollectError::Data`], or
    ///   [`CollectError::UnexpectedStatus`] for other failures.
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        let keyword = validate_keyword(keyword)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut result = self.search_with_retries(keyword, limit).await;

        // A search rejected with a token is retried once with a new token.
        // A failed token exchange leaves nothing cached and is not retried.
        if let Err(CollectError::Authentication { .. }) = &result {
            let had_token = self.token.lock().await.take().is_some();
            if had_token && self.is_authenticated() {
                tracing::debug!(platform = "reddit", "token rejected, exchanging a new one");
                result = self.search_with_retries(keyword, limit).await;
                if let Err(CollectError::Authentication { .. }) = &result {
                    *self.token.lock().await = None;
                }
            }
        }

        let mut records = result?;
        records.truncate(limit);
        tracing::debug!(
            platform = "reddit",
            keyword,
            count = records.len(),
            authenticated = self.is_authenticated(),
            "collected Reddit posts"
        );
        Ok(records)
    }

    /// Search for a hashtag, adding the leading `#` when missing.
    ///
    /// # Errors
    ///
    /// Same as [`RedditCollector::search`].
    pub async fn search_hashtag(&self, tag: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        self.search(&hashtag_query(tag), limit).await
    }

    async fn search_with_retries(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<PostRecord>, CollectError> {
        retry_with_backoff(self.retry.max_retries, self.retry.backoff_base_secs, || {
            self.search_once(keyword, limit)
        })
        .await
    }

    async fn search_once(&self, keyword: &str, limit: usize) -> Result<Vec<PostRecord>, CollectError> {
        let subreddit = utf8_percent_encode(&self.settings.subreddit, NON_ALPHANUMERIC).to_string();
        let params = search_params(keyword, limit, &self.settings);

        let request = match &self.credentials {
            Some(credentials) => {
                let token = self.access_token(credentials).await?;
                self.client
                    .get(format!("{}/r/{subreddit}/search", self.api_base))
                    .bearer_auth(token)
            }
            None => self
                .client
                .get(format!("{}/r/{subreddit}/search.json", self.api_base)),
        };

        let response = request
            .query(&params)
            .send()
            .await
            .map_err(|e| CollectError::network(Platform::Reddit, e))?;
        let response = check_status(Platform::Reddit, response)?;

        let body = response
            .text()
            .await
            .map_err(|e| CollectError::network(Platform::Reddit, e))?;
        let listing: Listing = serde_json::from_str(&body).map_err(|e| {
            CollectError::data(Platform::Reddit, format!("search listing parse error: {e}"))
        })?;

        Ok(listing
            .data
            .children
            .into_iter()
            .filter_map(|child| to_record(child.data))
            .collect())
    }

    async fn access_token(&self, credentials: &RedditCredentials) -> Result<String, CollectError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_base))
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CollectError::network(Platform::Reddit, e))?;

        let status = response.status();
        if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CollectError::Authentication {
                platform: Platform::Reddit,
                message: format!("token exchange failed with status {}", status.as_u16()),
            });
        }
        let response = check_status(Platform::Reddit, response)?;

        let token: TokenResponse = response.json().await.map_err(|e| {
            CollectError::Authentication {
                platform: Platform::Reddit,
                message: format!("token parse error: {e}"),
            }
        })?;

        tracing::debug!(
            platform = "reddit",
            expires_in = token.expires_in,
            "exchanged Reddit access token"
        );
        *cached = Some(CachedToken::new(token.access_token.clone(), token.expires_in));
        Ok(token.access_token)
    }
}

pub(crate) fn hashtag_query(tag: &str) -> String {
    let tag = tag.trim();
    if tag.is_empty() || tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{tag}")
    }
}
