use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use osint_collectors::SourceOutcome;
use osint_core::{AnalyzedPost, Platform};
use osint_sentiment::{
    AnalysisReport, AverageSentiment, DistributionSummary, TermCount, Timeline,
};
use serde::Serialize;

use crate::error::ReportError;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    sentiment_distribution: &'a DistributionSummary,
    platform_sentiment: &'a BTreeMap<Platform, DistributionSummary>,
    average_sentiment: &'a AverageSentiment,
    top_posts: TopPosts<'a>,
    timeline: &'a Timeline,
    top_terms: &'a [TermCount],
    sources: &'a [SourceOutcome],
    all_posts: &'a [AnalyzedPost],
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    keyword: &'a str,
    generated_at: DateTime<Utc>,
    total_posts: usize,
    /// Platforms that contributed at least one post.
    platforms: Vec<Platform>,
}

#[derive(Debug, Serialize)]
struct TopPosts<'a> {
    positive: &'a [AnalyzedPost],
    negative: &'a [AnalyzedPost],
}

/// Pretty-printed JSON with every aggregate and all analyzed posts.
///
/// # Errors
///
/// Returns [`ReportError::Serialize`] if serialization fails.
pub fn render_json(report: &AnalysisReport) -> Result<String, ReportError> {
    let summary = &report.summary;
    let document = JsonReport {
        metadata: Metadata {
            keyword: &report.keyword,
            generated_at: report.generated_at,
            total_posts: report.posts.len(),
            platforms: summary.by_platform.keys().copied().collect(),
        },
        sentiment_distribution: &summary.distribution,
        platform_sentiment: &summary.by_platform,
        average_sentiment: &summary.average,
        top_posts: TopPosts {
            positive: &summary.top_positive,
            negative: &summary.top_negative,
        },
        timeline: &summary.timeline,
        top_terms: &summary.top_terms,
        sources: &report.sources,
        all_posts: &report.posts,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
