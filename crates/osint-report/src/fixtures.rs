use chrono::{TimeZone, Utc};
use osint_collectors::{CollectionResult, SourceOutcome, SourceStatus};
use osint_core::{Platform, PostMetrics, PostRecord};
use osint_sentiment::{build_report, AnalysisReport, SentimentAnalyzer};

fn post(platform: Platform, id: &str, title: Option<&str>, text: &str, hour: u32) -> PostRecord {
    PostRecord {
        platform,
        id: id.to_string(),
        title: title.map(ToString::to_string),
        text: text.to_string(),
        author: "author".to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 5, 13, hour, 0, 0).unwrap()),
        url: format!("https://example.com/{id}?a=1&b=2"),
        source: None,
        metrics: PostMetrics::default(),
    }
}

pub(crate) fn report() -> AnalysisReport {
    let collection = CollectionResult {
        posts: vec![
            post(
                Platform::Reddit,
                "r1",
                Some("Rust <script>alert(1)</script> is great"),
                "I love the compiler",
                9,
            ),
            post(Platform::Reddit, "r2", None, "Terrible awful compile times", 10),
            post(Platform::News, "n1", Some("Rust conference scheduled"), "", 10),
        ],
        sources: vec![
            SourceOutcome {
                platform: Platform::Reddit,
                status: SourceStatus::Ok,
                count: 2,
                error: None,
            },
            SourceOutcome {
                platform: Platform::Twitter,
                status: SourceStatus::Unavailable,
                count: 0,
                error: None,
            },
            SourceOutcome {
                platform: Platform::News,
                status: SourceStatus::Ok,
                count: 1,
                error: None,
            },
        ],
    };
    build_report(
        "rust lang",
        &Platform::ALL,
        collection,
        &SentimentAnalyzer::new(),
    )
}

pub(crate) fn empty_report() -> AnalysisReport {
    build_report(
        "rust lang",
        &Platform::ALL,
        CollectionResult::default(),
        &SentimentAnalyzer::new(),
    )
}
