use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Platform a post was collected from. Doubles as the provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Twitter,
    News,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Reddit, Platform::Twitter, Platform::News];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Twitter => "twitter",
            Platform::News => "news",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reddit" => Ok(Platform::Reddit),
            "twitter" | "x" => Ok(Platform::Twitter),
            "news" => Ok(Platform::News),
            other => Err(CoreError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Engagement counters. Platforms fill in whichever they expose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<i64>,
}

/// A normalized post, tweet, or article. Immutable once collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub platform: Platform,
    /// Platform-native identifier (Reddit id, tweet id, or article URL).
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub url: String,
    /// Subreddit, news outlet, or tweet language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub metrics: PostMetrics,
}

impl PostRecord {
    /// Text handed to the sentiment scorer: `"{title}. {text}"` when a title
    /// exists, otherwise just the body.
    #[must_use]
    pub fn full_text(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => {
                let body = self.text.trim();
                if body.is_empty() {
                    title.to_string()
                } else {
                    format!("{title}. {body}")
                }
            }
            _ => self.text.trim().to_string(),
        }
    }

    /// Short human-readable label: the title, or the first 200 chars of text.
    #[must_use]
    pub fn headline(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.text.chars().take(200).collect(),
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}
