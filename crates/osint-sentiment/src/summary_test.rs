use osint_core::{PostMetrics, PostRecord, SentimentAnalysis, SentimentScore};

use super::*;

fn analyzed(id: &str, platform: Platform, polarity: f64) -> AnalyzedPost {
    AnalyzedPost::new(
        PostRecord {
            platform,
            id: id.to_string(),
            title: None,
            text: format!("post {id}"),
            author: "author".to_string(),
            created_at: None,
            url: format!("https://example.com/{id}"),
            source: None,
            metrics: PostMetrics::default(),
        },
        SentimentAnalysis::from_score(SentimentScore {
            polarity,
            subjectivity: 0.5,
        }),
    )
}

#[test]
fn empty_input_is_all_zero() {
    assert_eq!(summarize(&[]), DistributionSummary::default());
    assert!(summarize_by_platform(&[]).is_empty());
    assert_eq!(average_sentiment(&[]), AverageSentiment::default());
}

#[test]
fn one_of_each_class_is_a_third_each() {
    let posts = vec![
        analyzed("a", Platform::Reddit, 0.5),
        analyzed("b", Platform::Reddit, -0.5),
        analyzed("c", Platform::News, 0.0),
    ];
    let d = summarize(&posts);
    assert_eq!((d.total, d.positive, d.negative, d.neutral), (3, 1, 1, 1));
    assert!((d.positive_pct - 33.33).abs() < 1e-9);
    assert!((d.negative_pct - 33.33).abs() < 1e-9);
    assert!((d.neutral_pct - 33.33).abs() < 1e-9);
}

#[test]
fn percentages_sum_to_100_within_rounding() {
    let posts: Vec<AnalyzedPost> = (0..7)
        .map(|i| {
            let polarity = match i % 3 {
                0 => 0.6,
                1 => -0.6,
                _ => 0.0,
            };
            analyzed(&i.to_string(), Platform::Twitter, polarity)
        })
        .collect();
    let d = summarize(&posts);
    let sum = d.positive_pct + d.negative_pct + d.neutral_pct;
    assert!((sum - 100.0).abs() <= 0.02, "sum was {sum}");
    assert_eq!(d.positive + d.negative + d.neutral, d.total);
}

#[test]
fn threshold_boundaries_are_neutral() {
    let posts = vec![
        analyzed("a", Platform::News, 0.1),
        analyzed("b", Platform::News, -0.1),
    ];
    assert_eq!(summarize(&posts).neutral, 2);
}

#[test]
fn by_platform_partitions_counts() {
    let posts = vec![
        analyzed("a", Platform::Reddit, 0.5),
        analyzed("b", Platform::Reddit, -0.5),
        analyzed("c", Platform::News, 0.0),
    ];
    let by_platform = summarize_by_platform(&posts);
    assert_eq!(by_platform.len(), 2);
    assert_eq!(by_platform[&Platform::Reddit].total, 2);
    assert!((by_platform[&Platform::Reddit].positive_pct - 50.0).abs() < 1e-9);
    assert_eq!(by_platform[&Platform::News].neutral, 1);
    assert!(!by_platform.contains_key(&Platform::Twitter));
}

#[test]
fn average_classifies_the_mean() {
    let posts = vec![
        analyzed("a", Platform::Reddit, 0.9),
        analyzed("b", Platform::Reddit, 0.3),
        analyzed("c", Platform::Reddit, -0.2),
    ];
    let avg = average_sentiment(&posts);
    assert!((avg.avg_polarity - 0.333).abs() < 1e-9);
    assert!((avg.avg_subjectivity - 0.5).abs() < 1e-9);
    assert_eq!(avg.overall_sentiment, SentimentClass::Positive);
}

#[test]
fn top_posts_filters_and_orders_by_confidence() {
    let posts = vec![
        analyzed("weak", Platform::Reddit, 0.2),
        analyzed("neg", Platform::Reddit, -0.9),
        analyzed("strong", Platform::News, 0.8),
        analyzed("mid", Platform::Twitter, 0.5),
    ];
    let top = top_posts(&posts, SentimentClass::Positive, 2);
    let ids: Vec<&str> = top.iter().map(|p| p.post.id.as_str()).collect();
    assert_eq!(ids, ["strong", "mid"]);

    let negative = top_posts(&posts, SentimentClass::Negative, 5);
    assert_eq!(negative.len(), 1);
}

#[test]
fn summary_text_reports_counts_and_overall() {
    let posts = vec![
        analyzed("a", Platform::Reddit, 0.5),
        analyzed("b", Platform::Reddit, 0.4),
    ];
    let text = summary_text(&posts);
    assert!(text.starts_with("Sentiment Analysis Summary"));
    assert!(text.contains("Total Posts Analyzed: 2"));
    assert!(text.contains("- Positive: 2 (100%)"));
    assert!(text.contains("- Overall: POSITIVE"));
}

#[test]
fn summary_text_for_empty_input() {
    assert_eq!(summary_text(&[]), "No posts to analyze.");
}

#[test]
fn distribution_serializes_flat() {
    let d = summarize(&[analyzed("a", Platform::Reddit, 0.5)]);
    let json = serde_json::to_value(d).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["positive_pct"], 100.0);
    assert_eq!(json["neutral_pct"], 0.0);
}

#[test]
fn analysis_summary_bundles_aggregates() {
    let posts = vec![
        analyzed("a", Platform::Reddit, 0.5),
        analyzed("b", Platform::News, -0.5),
    ];
    let summary = AnalysisSummary::from_posts(&posts);
    assert_eq!(summary.distribution.total, 2);
    assert_eq!(summary.top_positive.len(), 1);
    assert_eq!(summary.top_negative.len(), 1);
    assert_eq!(summary.by_platform.len(), 2);
}
