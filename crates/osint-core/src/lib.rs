//! Shared domain types and configuration for the keyword monitor.

pub mod app_config;
pub mod config;
pub mod posts;
pub mod sentiment;
pub mod sources;

pub use app_config::{AppConfig, Environment, RedditMode, ReportFormat, MAX_POSTS_PER_PLATFORM};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{Platform, PostMetrics, PostRecord};
pub use sentiment::{
    AnalyzedPost, Indicator, IndicatorStrength, SentenceSentiment, SentimentAnalysis, SentimentClass,
    SentimentExplanation, SentimentScore,
};
pub use sources::{load_sources, FeedConfig, NewsSettings, RedditSettings, SourcesConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown report format: {0}")]
    UnknownReportFormat(String),
}
