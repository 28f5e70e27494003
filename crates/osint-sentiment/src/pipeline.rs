//! Collection-to-summary orchestration.

use std::time::Duration;

use chrono::{DateTime, Utc};
use osint_collectors::{collect_all, CollectionResult, PlatformCollector, SourceOutcome};
use osint_core::{AnalyzedPost, Platform};
use serde::Serialize;

use crate::analyzer::SentimentAnalyzer;
use crate::scorer::SentimentScorer;
use crate::summary::AnalysisSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub keyword: String,
    /// Platforms to query, in the order their results are merged.
    pub platforms: Vec<Platform>,
    /// Maximum posts per platform.
    pub limit: usize,
    /// Search `#keyword` instead of the plain keyword.
    pub hashtag: bool,
}

impl AnalysisRequest {
    /// A plain keyword search over every platform.
    #[must_use]
    pub fn new(keyword: impl Into<String>, limit: usize) -> Self {
        Self {
            keyword: keyword.into(),
            platforms: Platform::ALL.to_vec(),
            limit,
            hashtag: false,
        }
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub keyword: String,
    pub generated_at: DateTime<Utc>,
    pub platforms: Vec<Platform>,
    pub sources: Vec<SourceOutcome>,
    pub summary: AnalysisSummary,
    pub posts: Vec<AnalyzedPost>,
}

impl AnalysisReport {
    /// True when no platform returned anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Collect from every requested platform, score the merged posts, and
/// summarize them.
///
/// Never fails: platforms that error or time out show up in
/// [`AnalysisReport::sources`] and contribute no posts. When every platform
/// fails the report is empty.
pub async fn run_analysis<S: SentimentScorer>(
    collectors: &[PlatformCollector],
    analyzer: &SentimentAnalyzer<S>,
    request: &AnalysisRequest,
    collector_timeout: Duration,
) -> AnalysisReport {
    tracing::info!(
        keyword = %request.keyword,
        platforms = ?request.platforms,
        limit = request.limit,
        hashtag = request.hashtag,
        "starting analysis"
    );

    let collection = collect_all(
        collectors,
        &request.platforms,
        &request.keyword,
        request.limit,
        collector_timeout,
        request.hashtag,
    )
    .await;

    let report = build_report(&request.keyword, &request.platforms, collection, analyzer);

    if report.is_empty() {
        tracing::warn!(keyword = %request.keyword, "no posts collected from any platform");
    } else {
        tracing::info!(
            keyword = %request.keyword,
            count = report.posts.len(),
            overall = %report.summary.average.overall_sentiment,
            "analysis complete"
        );
    }

    report
}

/// Score and summarize an already collected result.
#[must_use]
pub fn build_report<S: SentimentScorer>(
    keyword: &str,
    platforms: &[Platform],
    collection: CollectionResult,
    analyzer: &SentimentAnalyzer<S>,
) -> AnalysisReport {
    let posts = analyzer.analyze(collection.posts);
    let summary = AnalysisSummary::from_posts(&posts);
    AnalysisReport {
        keyword: keyword.to_string(),
        generated_at: Utc::now(),
        platforms: platforms.to_vec(),
        sources: collection.sources,
        summary,
        posts,
    }
}
