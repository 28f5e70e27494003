//! End-to-end analysis runs against wiremock-backed collectors.

use std::time::Duration;

use osint_collectors::news::NewsOptions;
use osint_collectors::reddit::RedditOptions;
use osint_collectors::{
    NewsCollector, PlatformCollector, RedditCollector, RetryPolicy, SourceStatus,
};
use osint_core::{FeedConfig, Platform, RedditSettings, SentimentClass, SentimentScore};
use osint_sentiment::{
    run_analysis, AnalysisRequest, ScoreError, SentimentAnalyzer, SentimentScorer,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Scores by marker word so tests control polarity exactly.
struct FixedScorer;

impl SentimentScorer for FixedScorer {
    fn score(&self, text: &str) -> Result<SentimentScore, ScoreError> {
        let polarity = if text.contains("love") {
            0.5
        } else if text.contains("hate") {
            -0.5
        } else {
            0.0
        };
        Ok(SentimentScore {
            polarity,
            subjectivity: 0.5,
        })
    }
}

fn collectors(server: &MockServer) -> Vec<PlatformCollector> {
    let reddit = RedditCollector::with_base_url(
        RedditOptions {
            credentials: None,
            user_agent: "osint-test/0.1".to_string(),
            settings: RedditSettings::default(),
            timeout_secs: 5,
            retry: RetryPolicy::NONE,
        },
        &server.uri(),
        &server.uri(),
    )
    .unwrap();
    let news = NewsCollector::new(NewsOptions {
        feeds: vec![FeedConfig {
            name: "feed".to_string(),
            url: format!("{}/rss?q={{query}}", server.uri()),
        }],
        max_items_per_feed: 50,
        fetch_articles: false,
        timeout_secs: 5,
        retry: RetryPolicy::NONE,
    })
    .unwrap();
    vec![PlatformCollector::Reddit(reddit), PlatformCollector::News(news)]
}

#[tokio::test]
async fn partial_availability_summarizes_a_third_each() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/all/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "children": [
            { "data": { "id": "r1", "title": "I love rust", "selftext": "", "author": "a",
                        "permalink": "/r/rust/comments/r1/x/", "subreddit": "rust" } },
            { "data": { "id": "r2", "title": "I hate rust", "selftext": "", "author": "b",
                        "permalink": "/r/rust/comments/r2/y/", "subreddit": "rust" } }
        ] } })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
             <item><title>Rust report</title><link>https://news.example/1</link>\
             <description>Rust in the news</description></item></channel></rss>",
        ))
        .mount(&server)
        .await;

    let analyzer = SentimentAnalyzer::with_scorer(FixedScorer);
    let report = run_analysis(
        &collectors(&server),
        &analyzer,
        &AnalysisRequest::new("rust", 10),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(report.posts.len(), 3);
    let classes: Vec<SentimentClass> = report.posts.iter().map(|p| p.class()).collect();
    assert_eq!(
        classes,
        [SentimentClass::Positive, SentimentClass::Negative, SentimentClass::Neutral]
    );

    let d = report.summary.distribution;
    assert_eq!((d.total, d.positive, d.negative, d.neutral), (3, 1, 1, 1));
    assert!((d.positive_pct - 33.33).abs() < 1e-9);
    assert!((d.negative_pct - 33.33).abs() < 1e-9);
    assert!((d.neutral_pct - 33.33).abs() < 1e-9);

    let twitter = report
        .sources
        .iter()
        .find(|s| s.platform == Platform::Twitter)
        .unwrap();
    assert_eq!(twitter.status, SourceStatus::Unavailable);
    assert_eq!(report.summary.by_platform[&Platform::Reddit].total, 2);
}

#[tokio::test]
async fn total_failure_is_an_empty_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let report = run_analysis(
        &collectors(&server),
        &SentimentAnalyzer::new(),
        &AnalysisRequest::new("rust", 10),
        Duration::from_secs(5),
    )
    .await;

    assert!(report.is_empty());
    assert_eq!(report.summary.distribution.total, 0);
    assert!((report.summary.distribution.positive_pct).abs() < f64::EPSILON);
    assert!(report
        .sources
        .iter()
        .all(|s| s.status != SourceStatus::Ok));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["keyword"], "rust");
    assert_eq!(json["summary"]["distribution"]["total"], 0);
}
