//! Time buckets and term frequencies over analyzed posts.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use osint_core::{AnalyzedPost, SentimentClass};
use serde::{Deserialize, Serialize};

use crate::lexicon::{is_stopword, tokenize};

/// Above this many timestamped posts the timeline switches to day buckets.
pub const HOURLY_BUCKET_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Hour,
    Day,
}

impl Granularity {
    fn delta(self) -> TimeDelta {
        match self {
            Granularity::Hour => TimeDelta::hours(1),
            Granularity::Day => TimeDelta::days(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub start: DateTime<Utc>,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub avg_polarity: f64,
}

impl TimelineBucket {
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    #[must_use]
    pub fn count(&self, class: SentimentClass) -> usize {
        match class {
            SentimentClass::Positive => self.positive,
            SentimentClass::Negative => self.negative,
            SentimentClass::Neutral => self.neutral,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub granularity: Granularity,
    /// Chronological, empty buckets omitted.
    pub buckets: Vec<TimelineBucket>,
}

impl Timeline {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Class counts per hour (or per day past [`HOURLY_BUCKET_LIMIT`] posts).
/// Posts without a timestamp are skipped.
#[must_use]
pub fn sentiment_timeline(posts: &[AnalyzedPost]) -> Timeline {
    let dated: Vec<(DateTime<Utc>, &AnalyzedPost)> = posts
        .iter()
        .filter_map(|p| p.post.created_at.map(|ts| (ts, p)))
        .collect();

    let granularity = if dated.len() > HOURLY_BUCKET_LIMIT {
        Granularity::Day
    } else {
        Granularity::Hour
    };

    let mut grouped: BTreeMap<DateTime<Utc>, (TimelineBucket, f64)> = BTreeMap::new();
    for (ts, post) in dated {
        let start = ts.duration_trunc(granularity.delta()).unwrap_or(ts);
        let (bucket, polarity_sum) = grouped.entry(start).or_insert((
            TimelineBucket {
                start,
                positive: 0,
                negative: 0,
                neutral: 0,
                avg_polarity: 0.0,
            },
            0.0,
        ));
        match post.class() {
            SentimentClass::Positive => bucket.positive += 1,
            SentimentClass::Negative => bucket.negative += 1,
            SentimentClass::Neutral => bucket.neutral += 1,
        }
        *polarity_sum += post.polarity();
    }

    let buckets = grouped
        .into_values()
        .map(|(mut bucket, polarity_sum)| {
            #[allow(clippy::cast_precision_loss)]
            let n = bucket.total() as f64;
            bucket.avg_polarity = (polarity_sum / n * 1000.0).round() / 1000.0;
            bucket
        })
        .collect();

    Timeline {
        granularity,
        buckets,
    }
}

/// The `limit` most frequent terms across all posts, highest count first
/// and alphabetical among ties. Stopwords, numbers, and words shorter than
/// three characters are skipped. Each post counts a term at most once.
#[must_use]
pub fn top_terms(posts: &[AnalyzedPost], limit: usize) -> Vec<TermCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        let terms: HashSet<String> = tokenize(&post.post.full_text())
            .filter(|t| t.chars().count() >= 3)
            .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
            .filter(|t| !is_stopword(t))
            .collect();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
    }

    let mut terms: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(limit);
    terms
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use osint_core::{Platform, PostMetrics, PostRecord, SentimentAnalysis, SentimentScore};

    use super::*;

    fn post(text: &str, created_at: Option<DateTime<Utc>>, polarity: f64) -> AnalyzedPost {
        AnalyzedPost::new(
            PostRecord {
                platform: Platform::Twitter,
                id: text.to_string(),
                title: None,
                text: text.to_string(),
                author: "a".to_string(),
                created_at,
                url: "https://example.com".to_string(),
                source: None,
                metrics: PostMetrics::default(),
            },
            SentimentAnalysis::from_score(SentimentScore {
                polarity,
                subjectivity: 0.0,
            }),
        )
    }

    fn at(hour: u32, minute: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 5, 13, hour, minute, 0).unwrap())
    }

    #[test]
    fn timeline_buckets_by_hour_and_skips_undated() {
        let posts = vec![
            post("a", at(10, 5), 0.5),
            post("b", at(10, 55), -0.5),
            post("c", at(12, 0), 0.0),
            post("d", None, 0.9),
        ];
        let timeline = sentiment_timeline(&posts);
        assert_eq!(timeline.granularity, Granularity::Hour);
        assert_eq!(timeline.buckets.len(), 2);

        let first = &timeline.buckets[0];
        assert_eq!(first.start, at(10, 0).unwrap());
        assert_eq!((first.positive, first.negative, first.neutral), (1, 1, 0));
        assert!(first.avg_polarity.abs() < 1e-9);
        assert_eq!(timeline.buckets[1].neutral, 1);
    }

    #[test]
    fn timeline_switches_to_days_for_large_sets() {
        let posts: Vec<AnalyzedPost> = (0..=HOURLY_BUCKET_LIMIT)
            .map(|i| {
                let hour = u32::try_from(i % 24).unwrap();
                post(&format!("p{i}"), at(hour, 0), 0.3)
            })
            .collect();
        let timeline = sentiment_timeline(&posts);
        assert_eq!(timeline.granularity, Granularity::Day);
        assert_eq!(timeline.buckets.len(), 1);
        assert_eq!(timeline.buckets[0].positive, HOURLY_BUCKET_LIMIT + 1);
    }

    #[test]
    fn timeline_of_undated_posts_is_empty() {
        assert!(sentiment_timeline(&[post("x", None, 0.0)]).is_empty());
    }

    #[test]
    fn top_terms_skips_stopwords_and_counts_once_per_post() {
        let posts = vec![
            post("Rust rust rust is the best language", None, 0.0),
            post("Rust compiler is slow", None, 0.0),
            post("The compiler team ships 2024 edition", None, 0.0),
        ];
        let terms = top_terms(&posts, 3);
        assert_eq!(
            terms,
            [
                TermCount { term: "compiler".to_string(), count: 2 },
                TermCount { term: "rust".to_string(), count: 2 },
                TermCount { term: "best".to_string(), count: 1 },
            ]
        );
    }
}
