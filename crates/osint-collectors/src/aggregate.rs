//! Fan-out across collectors and fan-in of their results.

use std::time::Duration;

use futures::future::join_all;
use osint_core::{Platform, PostRecord};
use serde::Serialize;

use crate::collector::PlatformCollector;

/// How one platform fared in a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    Failed,
    TimedOut,
    /// Requested but no collector is configured (e.g. missing credentials).
    Unavailable,
}

impl SourceStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceStatus::Ok => "ok",
            SourceStatus::Failed => "failed",
            SourceStatus::TimedOut => "timed_out",
            SourceStatus::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub platform: Platform,
    pub status: SourceStatus,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionResult {
    /// Merged records in platform request order.
    pub posts: Vec<PostRecord>,
    pub sources: Vec<SourceOutcome>,
}

impl CollectionResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Concatenate lists in input order. No de-duplication; every record keeps
/// its own platform tag.
#[must_use]
pub fn merge(lists: Vec<Vec<PostRecord>>) -> Vec<PostRecord> {
    let total = lists.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    for list in lists {
        merged.extend(list);
    }
    merged
}

/// Like [`merge`], but re-tags each record with the platform of the list it
/// came from.
#[must_use]
pub fn merge_tagged(lists: Vec<(Platform, Vec<PostRecord>)>) -> Vec<PostRecord> {
    merge(
        lists
            .into_iter()
            .map(|(platform, list)| {
                list.into_iter()
                    .map(|post| post.with_platform(platform))
                    .collect()
            })
            .collect(),
    )
}

/// Run every requested platform's collector concurrently, each under its own
/// timeout, and merge what comes back.
///
/// A failed or timed-out collector contributes no records. A requested
/// platform with no collector is reported as [`SourceStatus::Unavailable`].
/// Duplicate entries in `platforms` are ignored.
pub async fn collect_all(
    collectors: &[PlatformCollector],
    platforms: &[Platform],
    keyword: &str,
    limit: usize,
    timeout: Duration,
    hashtag: bool,
) -> CollectionResult {
    let mut requested: Vec<Platform> = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !requested.contains(platform) {
            requested.push(*platform);
        }
    }

    let runs = requested.iter().map(|&platform| async move {
        let Some(collector) = collectors.iter().find(|c| c.platform() == platform) else {
            return (
                Vec::new(),
                SourceOutcome {
                    platform,
                    status: SourceStatus::Unavailable,
                    count: 0,
                    error: Some(format!("{platform} collector is not configured")),
                },
            );
        };

        let search = async {
            if hashtag {
                collector.search_hashtag(keyword, limit).await
            } else {
                collector.search(keyword, limit).await
            }
        };

        match tokio::time::timeout(timeout, search).await {
            Ok(Ok(posts)) => {
                let count = posts.len();
                tracing::info!(platform = platform.as_str(), keyword, count, "collector finished");
                (
                    posts,
                    SourceOutcome {
                        platform,
                        status: SourceStatus::Ok,
                        count,
                        error: None,
                    },
                )
            }
            Ok(Err(e)) => {
                tracing::warn!(platform = platform.as_str(), keyword, error = %e, "collector failed");
                (
                    Vec::new(),
                    SourceOutcome {
                        platform,
                        status: SourceStatus::Failed,
                        count: 0,
                        error: Some(e.to_string()),
                    },
                )
            }
            Err(_) => {
                tracing::warn!(
                    platform = platform.as_str(),
                    keyword,
                    timeout_secs = timeout.as_secs(),
                    "collector timed out"
                );
                (
                    Vec::new(),
                    SourceOutcome {
                        platform,
                        status: SourceStatus::TimedOut,
                        count: 0,
                        error: Some(format!("timed out after {}s", timeout.as_secs())),
                    },
                )
            }
        }
    });

    let (lists, sources): (Vec<_>, Vec<_>) = join_all(runs)
        .await
        .into_iter()
        .zip(requested.iter().copied())
        .map(|((posts, outcome), platform)| ((platform, posts), outcome))
        .unzip();

    CollectionResult {
        posts: merge_tagged(lists),
        sources,
    }
}
