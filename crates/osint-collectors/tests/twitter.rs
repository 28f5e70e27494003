//! Integration tests for `TwitterCollector` using wiremock HTTP mocks.

use osint_collectors::{CollectError, RetryPolicy, TwitterCollector};
use osint_core::Platform;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_collector(base_url: &str) -> TwitterCollector {
    TwitterCollector::with_base_url("bearer-abc", 5, RetryPolicy::NONE, base_url)
        .expect("client construction should not fail")
}

fn search_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "1790000000000000001",
                "text": "Rust makes systems programming fun again",
                "author_id": "42",
                "created_at": "2024-05-13T10:00:00.000Z",
                "lang": "en",
                "public_metrics": {
                    "retweet_count": 5, "reply_count": 2,
                    "like_count": 50, "quote_count": 1
                }
            },
            {
                "id": "1790000000000000002",
                "text": "Compile times though...",
                "author_id": "43",
                "created_at": "2024-05-13T11:00:00.000Z",
                "lang": "en"
            }
        ],
        "includes": {
            "users": [
                { "id": "42", "username": "rustacean", "name": "Rustacean" },
                { "id": "43", "username": "skeptic", "name": "Skeptic" }
            ]
        },
        "meta": { "result_count": 2 }
    })
}

#[tokio::test]
async fn search_sends_v2_params_and_maps_tweets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(header("authorization", "Bearer bearer-abc"))
        .and(query_param("query", "rust"))
        .and(query_param("max_results", "10"))
        .and(query_param("tweet.fields", "created_at,public_metrics,author_id,lang"))
        .and(query_param("expansions", "author_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let collector = test_collector(&server.uri());
    let posts = collector.search("rust", 5).await.expect("search should succeed");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].platform, Platform::Twitter);
    assert_eq!(posts[0].author, "rustacean");
    assert_eq!(
        posts[0].url,
        "https://twitter.com/i/web/status/1790000000000000001"
    );
    assert_eq!(posts[0].metrics.likes, Some(50));
    assert_eq!(posts[1].author, "skeptic");
    assert_eq!(posts[1].metrics.likes, Some(0));
    assert!(posts[0].title.is_none());
}

#[tokio::test]
async fn max_results_is_capped_at_100() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("max_results", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let posts = test_collector(&server.uri()).search("rust", 500).await.unwrap();
    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "title": "Unauthorized" })))
        .mount(&server)
        .await;

    let err = test_collector(&server.uri()).search("rust", 10).await.unwrap_err();
    assert!(
        matches!(err, CollectError::Authentication { platform: Platform::Twitter, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_collector(&server.uri()).search("rust", 10).await.unwrap_err();
    assert!(
        matches!(err, CollectError::UnexpectedStatus { platform: Platform::Twitter, status: 503 }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn hashtag_search_adds_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("query", "#rustlang"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let posts = test_collector(&server.uri())
        .search_hashtag("rustlang", 10)
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
}
