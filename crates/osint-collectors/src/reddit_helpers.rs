//! Reddit listing types, query building, and post conversion.

use chrono::DateTime;
use osint_core::{Platform, PostMetrics, PostRecord, RedditSettings};
use serde::Deserialize;

/// Reddit caps `limit` at 100 per request.
pub(crate) const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub(crate) expires_in: Option<u64>,
}

/// Search listing wrapper (`data.children[].data`).
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub(crate) data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    #[serde(default)]
    pub(crate) children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Child {
    pub(crate) data: PostData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostData {
    pub(crate) id: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) selftext: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) score: Option<i64>,
    pub(crate) num_comments: Option<i64>,
    pub(crate) created_utc: Option<f64>,
    pub(crate) permalink: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) subreddit: Option<String>,
}

pub(crate) fn search_params(
    keyword: &str,
    limit: usize,
    settings: &RedditSettings,
) -> Vec<(&'static str, String)> {
    let restrict = settings.subreddit != "all";
    vec![
        ("q", keyword.to_string()),
        ("limit", limit.clamp(1, MAX_PAGE_LIMIT).to_string()),
        ("sort", settings.sort.clone()),
        ("t", settings.time_filter.clone()),
        ("restrict_sr", restrict.to_string()),
        ("raw_json", "1".to_string()),
    ]
}

/// Convert one listing entry. Entries without an id or title are dropped.
pub(crate) fn to_record(post: PostData) -> Option<PostRecord> {
    let id = post.id.filter(|id| !id.is_empty())?;
    let title = post
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())?;

    let text = match post.selftext.as_deref().map(str::trim) {
        Some(body) if body != "[deleted]" && body != "[removed]" => body.to_string(),
        _ => String::new(),
    };

    let author = post
        .author
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "[deleted]".to_string());

    #[allow(clippy::cast_possible_truncation)]
    let created_at = post
        .created_utc
        .and_then(|secs| DateTime::from_timestamp(secs.trunc() as i64, 0));

    let url = match post.permalink.as_deref() {
        Some(permalink) if !permalink.is_empty() => format!("https://reddit.com{permalink}"),
        _ => post.url.unwrap_or_default(),
    };

    Some(PostRecord {
        platform: Platform::Reddit,
        id,
        title: Some(title),
        text,
        author,
        created_at,
        url,
        source: post.subreddit,
        metrics: PostMetrics {
            score: post.score,
            comments: post.num_comments,
            ..PostMetrics::default()
        },
    })
}
