use serde::{Deserialize, Serialize};

use crate::posts::PostRecord;

/// Polarity strictly above this is classified positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity strictly below this is classified negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

impl SentimentClass {
    pub const ALL: [SentimentClass; 3] = [
        SentimentClass::Positive,
        SentimentClass::Negative,
        SentimentClass::Neutral,
    ];

    /// Threshold a polarity into a class.
    #[must_use]
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentClass::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            SentimentClass::Negative
        } else {
            SentimentClass::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentClass::Positive => "positive",
            SentimentClass::Negative => "negative",
            SentimentClass::Neutral => "neutral",
        }
    }

    /// Chart colour for this class.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            SentimentClass::Positive => "#4CAF50",
            SentimentClass::Negative => "#F44336",
            SentimentClass::Neutral => "#9E9E9E",
        }
    }
}

impl std::fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw scorer output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// `-1.0` (most negative) to `1.0` (most positive).
    pub polarity: f64,
    /// `0.0` (objective) to `1.0` (subjective).
    pub subjectivity: f64,
}

impl SentimentScore {
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }
}

/// How strongly an opinion word leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorStrength {
    Strong,
    Moderate,
}

impl IndicatorStrength {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorStrength::Strong => "strong",
            IndicatorStrength::Moderate => "moderate",
        }
    }
}

/// An opinion word found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub word: String,
    pub strength: IndicatorStrength,
}

/// Score of one sentence, truncated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub text: String,
    pub sentiment: SentimentClass,
    pub score: f64,
}

/// Why a text scored the way it did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentExplanation {
    pub positive_words: Vec<Indicator>,
    pub negative_words: Vec<Indicator>,
    pub negations: Vec<String>,
    pub intensifiers: Vec<String>,
    pub sentence_breakdown: Vec<SentenceSentiment>,
    /// One-paragraph summary; empty when nothing was explained.
    pub explanation: String,
    pub reasoning: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentiment: SentimentClass,
    /// Distance from neutral, `|polarity|`.
    pub confidence: f64,
    #[serde(flatten)]
    pub details: SentimentExplanation,
}

impl SentimentAnalysis {
    /// Build an analysis from a score. Values are clamped to their ranges and
    /// rounded to 3 decimals; the class is derived from the rounded polarity.
    #[must_use]
    pub fn from_score(score: SentimentScore) -> Self {
        let polarity = round3(score.polarity.clamp(-1.0, 1.0));
        let subjectivity = round3(score.subjectivity.clamp(0.0, 1.0));
        Self {
            polarity,
            subjectivity,
            sentiment: SentimentClass::from_polarity(polarity),
            confidence: polarity.abs(),
            details: SentimentExplanation::default(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: SentimentExplanation) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn neutral() -> Self {
        Self::from_score(SentimentScore::neutral())
    }
}

/// A post plus its sentiment. Created once by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedPost {
    #[serde(flatten)]
    pub post: PostRecord,
    pub sentiment_analysis: SentimentAnalysis,
}

impl AnalyzedPost {
    #[must_use]
    pub fn new(post: PostRecord, sentiment_analysis: SentimentAnalysis) -> Self {
        Self {
            post,
            sentiment_analysis,
        }
    }

    #[must_use]
    pub fn class(&self) -> SentimentClass {
        self.sentiment_analysis.sentiment
    }

    #[must_use]
    pub fn polarity(&self) -> f64 {
        self.sentiment_analysis.polarity
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::{Platform, PostMetrics};

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(SentimentClass::from_polarity(0.1), SentimentClass::Neutral);
        assert_eq!(SentimentClass::from_polarity(-0.1), SentimentClass::Neutral);
        assert_eq!(SentimentClass::from_polarity(0.1001), SentimentClass::Positive);
        assert_eq!(SentimentClass::from_polarity(-0.1001), SentimentClass::Negative);
        assert_eq!(SentimentClass::from_polarity(0.0), SentimentClass::Neutral);
    }

    #[test]
    fn from_score_clamps_and_rounds() {
        let analysis = SentimentAnalysis::from_score(SentimentScore {
            polarity: 1.7,
            subjectivity: 0.123_456,
        });
        assert!((analysis.polarity - 1.0).abs() < f64::EPSILON);
        assert!((analysis.subjectivity - 0.123).abs() < f64::EPSILON);
        assert_eq!(analysis.sentiment, SentimentClass::Positive);
        assert!((analysis.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_is_absolute_polarity() {
        let analysis = SentimentAnalysis::from_score(SentimentScore {
            polarity: -0.5,
            subjectivity: 0.4,
        });
        assert!((analysis.confidence - 0.5).abs() < f64::EPSILON);
        assert_eq!(analysis.sentiment, SentimentClass::Negative);
    }

    #[test]
    fn analyzed_post_flattens_record_fields() {
        let post = PostRecord {
            platform: Platform::News,
            id: "n1".to_string(),
            title: Some("Headline".to_string()),
            text: "Body".to_string(),
            author: "Reuters".to_string(),
            created_at: None,
            url: "https://example.com/a".to_string(),
            source: Some("Reuters".to_string()),
            metrics: PostMetrics::default(),
        };
        let analyzed = AnalyzedPost::new(post, SentimentAnalysis::neutral());
        let json = serde_json::to_value(&analyzed).unwrap();
        assert_eq!(json["platform"], "news");
        assert_eq!(json["title"], "Headline");
        assert_eq!(json["sentiment_analysis"]["sentiment"], "neutral");
    }

    #[test]
    fn details_serialize_alongside_scores() {
        let analysis = SentimentAnalysis::from_score(SentimentScore {
            polarity: 0.8,
            subjectivity: 0.75,
        })
        .with_details(SentimentExplanation {
            positive_words: vec![Indicator {
                word: "great".to_string(),
                strength: IndicatorStrength::Strong,
            }],
            explanation: "This text is POSITIVE (score: 0.800).".to_string(),
            reasoning: vec!["Contains 1 positive indicators".to_string()],
            ..SentimentExplanation::default()
        });
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["polarity"], 0.8);
        assert_eq!(json["positive_words"][0]["word"], "great");
        assert_eq!(json["positive_words"][0]["strength"], "strong");
        assert_eq!(json["explanation"], "This text is POSITIVE (score: 0.800).");
        assert_eq!(json["negations"], serde_json::json!([]));
    }
}
