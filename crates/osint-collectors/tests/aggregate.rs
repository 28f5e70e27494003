//! Fan-out/fan-in tests for `collect_all` against wiremock-backed collectors.

use std::time::Duration;

use osint_collectors::news::NewsOptions;
use osint_collectors::reddit::RedditOptions;
use osint_collectors::{
    collect_all, NewsCollector, PlatformCollector, RedditCollector, RetryPolicy, SourceStatus,
};
use osint_core::{FeedConfig, Platform, RedditSettings};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reddit(server: &MockServer) -> PlatformCollector {
    let options = RedditOptions {
        credentials: None,
        user_agent: "osint-test/0.1".to_string(),
        settings: RedditSettings::default(),
        timeout_secs: 5,
        retry: RetryPolicy::NONE,
    };
    PlatformCollector::Reddit(
        RedditCollector::with_base_url(options, &server.uri(), &server.uri()).unwrap(),
    )
}

fn news(server: &MockServer) -> PlatformCollector {
    PlatformCollector::News(
        NewsCollector::new(NewsOptions {
            feeds: vec![FeedConfig {
                name: "feed".to_string(),
                url: format!("{}/rss?q={{query}}", server.uri()),
            }],
            max_items_per_feed: 50,
            fetch_articles: false,
            timeout_secs: 5,
            retry: RetryPolicy::NONE,
        })
        .unwrap(),
    )
}

fn reddit_listing() -> serde_json::Value {
    json!({ "data": { "children": [
        { "data": { "id": "r1", "title": "Rust love", "selftext": "", "author": "a",
                    "permalink": "/r/rust/comments/r1/x/", "subreddit": "rust" } },
        { "data": { "id": "r2", "title": "Rust hate", "selftext": "", "author": "b",
                    "permalink": "/r/rust/comments/r2/y/", "subreddit": "rust" } }
    ] } })
}

const RSS: &str = "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
<item><title>Rust report</title><link>https://news.example/1</link>\
<description>Rust in the news</description></item></channel></rss>";

#[tokio::test]
async fn partial_availability_merges_in_request_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/all/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reddit_listing()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
        .mount(&server)
        .await;

    let collectors = vec![reddit(&server), news(&server)];
    let result = collect_all(
        &collectors,
        &Platform::ALL,
        "rust",
        10,
        Duration::from_secs(5),
        false,
    )
    .await;

    assert_eq!(result.posts.len(), 3);
    let platforms: Vec<Platform> = result.posts.iter().map(|p| p.platform).collect();
    assert_eq!(platforms, [Platform::Reddit, Platform::Reddit, Platform::News]);

    let statuses: Vec<(Platform, SourceStatus, usize)> = result
        .sources
        .iter()
        .map(|s| (s.platform, s.status, s.count))
        .collect();
    assert_eq!(
        statuses,
        [
            (Platform::Reddit, SourceStatus::Ok, 2),
            (Platform::Twitter, SourceStatus::Unavailable, 0),
            (Platform::News, SourceStatus::Ok, 1),
        ]
    );
}

#[tokio::test]
async fn all_failures_yield_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let collectors = vec![reddit(&server), news(&server)];
    let result = collect_all(
        &collectors,
        &[Platform::Reddit, Platform::News],
        "rust",
        10,
        Duration::from_secs(5),
        false,
    )
    .await;

    assert!(result.is_empty());
    assert!(result.sources.iter().all(|s| s.status == SourceStatus::Failed));
    assert!(result.sources.iter().all(|s| s.error.is_some()));
}

#[tokio::test]
async fn slow_collector_times_out_without_blocking_others() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/all/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reddit_listing())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
        .mount(&server)
        .await;

    let collectors = vec![reddit(&server), news(&server)];
    let result = collect_all(
        &collectors,
        &[Platform::Reddit, Platform::News],
        "rust",
        10,
        Duration::from_millis(500),
        false,
    )
    .await;

    assert_eq!(result.posts.len(), 1);
    assert_eq!(result.posts[0].platform, Platform::News);
    assert_eq!(result.sources[0].status, SourceStatus::TimedOut);
    assert_eq!(result.sources[1].status, SourceStatus::Ok);
}
