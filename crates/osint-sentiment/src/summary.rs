//! Distribution, averages, and top posts over analyzed posts.
//!
//! Everything here is a pure function of `&[AnalyzedPost]` and can be
//! recomputed at any time.

use std::collections::BTreeMap;

use osint_core::{AnalyzedPost, Platform, SentimentClass};
use serde::{Deserialize, Serialize};

use crate::trends::{sentiment_timeline, top_terms, TermCount, Timeline};

/// How many posts of each class [`AnalysisSummary`] keeps.
pub const TOP_POSTS_PER_CLASS: usize = 5;
/// How many terms [`AnalysisSummary`] keeps.
pub const TOP_TERMS: usize = 30;

/// Per-class counts and percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Percent of `total`, rounded to 2 decimals.
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
}

impl DistributionSummary {
    #[must_use]
    pub fn count(&self, class: SentimentClass) -> usize {
        match class {
            SentimentClass::Positive => self.positive,
            SentimentClass::Negative => self.negative,
            SentimentClass::Neutral => self.neutral,
        }
    }

    #[must_use]
    pub fn pct(&self, class: SentimentClass) -> f64 {
        match class {
            SentimentClass::Positive => self.positive_pct,
            SentimentClass::Negative => self.negative_pct,
            SentimentClass::Neutral => self.neutral_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageSentiment {
    pub avg_polarity: f64,
    pub avg_subjectivity: f64,
    pub overall_sentiment: SentimentClass,
}

impl Default for AverageSentiment {
    fn default() -> Self {
        Self {
            avg_polarity: 0.0,
            avg_subjectivity: 0.0,
            overall_sentiment: SentimentClass::Neutral,
        }
    }
}

/// Every aggregate the reports and dashboard render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub distribution: DistributionSummary,
    pub by_platform: BTreeMap<Platform, DistributionSummary>,
    pub average: AverageSentiment,
    pub top_positive: Vec<AnalyzedPost>,
    pub top_negative: Vec<AnalyzedPost>,
    pub timeline: Timeline,
    pub top_terms: Vec<TermCount>,
}

impl AnalysisSummary {
    #[must_use]
    pub fn from_posts(posts: &[AnalyzedPost]) -> Self {
        Self {
            distribution: summarize(posts),
            by_platform: summarize_by_platform(posts),
            average: average_sentiment(posts),
            top_positive: top_posts(posts, SentimentClass::Positive, TOP_POSTS_PER_CLASS),
            top_negative: top_posts(posts, SentimentClass::Negative, TOP_POSTS_PER_CLASS),
            timeline: sentiment_timeline(posts),
            top_terms: top_terms(posts, TOP_TERMS),
        }
    }
}

/// Count posts per class. All zeros for an empty slice.
#[must_use]
pub fn summarize(posts: &[AnalyzedPost]) -> DistributionSummary {
    let mut summary = DistributionSummary {
        total: posts.len(),
        ..DistributionSummary::default()
    };
    for post in posts {
        match post.class() {
            SentimentClass::Positive => summary.positive += 1,
            SentimentClass::Negative => summary.negative += 1,
            SentimentClass::Neutral => summary.neutral += 1,
        }
    }
    if summary.total > 0 {
        summary.positive_pct = percent(summary.positive, summary.total);
        summary.negative_pct = percent(summary.negative, summary.total);
        summary.neutral_pct = percent(summary.neutral, summary.total);
    }
    summary
}

/// [`summarize`] per platform. Only platforms with at least one post appear.
#[must_use]
pub fn summarize_by_platform(posts: &[AnalyzedPost]) -> BTreeMap<Platform, DistributionSummary> {
    let mut grouped: BTreeMap<Platform, Vec<AnalyzedPost>> = BTreeMap::new();
    for post in posts {
        grouped
            .entry(post.post.platform)
            .or_default()
            .push(post.clone());
    }
    grouped
        .into_iter()
        .map(|(platform, group)| (platform, summarize(&group)))
        .collect()
}

/// Mean polarity and subjectivity (3 decimals) and the class of the mean.
#[must_use]
pub fn average_sentiment(posts: &[AnalyzedPost]) -> AverageSentiment {
    if posts.is_empty() {
        return AverageSentiment::default();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = posts.len() as f64;
    let avg_polarity = posts.iter().map(AnalyzedPost::polarity).sum::<f64>() / n;
    let avg_subjectivity = posts
        .iter()
        .map(|p| p.sentiment_analysis.subjectivity)
        .sum::<f64>()
        / n;

    AverageSentiment {
        avg_polarity: round_to(avg_polarity, 3),
        avg_subjectivity: round_to(avg_subjectivity, 3),
        overall_sentiment: SentimentClass::from_polarity(avg_polarity),
    }
}

/// Up to `limit` posts of `class`, highest confidence first. Ties keep
/// input order.
#[must_use]
pub fn top_posts(posts: &[AnalyzedPost], class: SentimentClass, limit: usize) -> Vec<AnalyzedPost> {
    let mut matching: Vec<&AnalyzedPost> = posts.iter().filter(|p| p.class() == class).collect();
    matching.sort_by(|a, b| {
        b.sentiment_analysis
            .confidence
            .total_cmp(&a.sentiment_analysis.confidence)
    });
    matching.into_iter().take(limit).cloned().collect()
}

/// Human-readable multi-line summary, or `"No posts to analyze."`.
#[must_use]
pub fn summary_text(posts: &[AnalyzedPost]) -> String {
    if posts.is_empty() {
        return "No posts to analyze.".to_string();
    }
    let d = summarize(posts);
    let avg = average_sentiment(posts);
    format!(
        "Sentiment Analysis Summary\n\
         ==========================\n\
         Total Posts Analyzed: {}\n\
         \n\
         Sentiment Distribution:\n\
         - Positive: {} ({}%)\n\
         - Negative: {} ({}%)\n\
         - Neutral: {} ({}%)\n\
         \n\
         Average Sentiment:\n\
         - Polarity: {} (range: -1 to 1)\n\
         - Subjectivity: {} (range: 0 to 1)\n\
         - Overall: {}",
        d.total,
        d.positive,
        d.positive_pct,
        d.negative,
        d.negative_pct,
        d.neutral,
        d.neutral_pct,
        avg.avg_polarity,
        avg.avg_subjectivity,
        avg.overall_sentiment.as_str().to_uppercase(),
    )
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    round_to(count as f64 / total as f64 * 100.0, 2)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
