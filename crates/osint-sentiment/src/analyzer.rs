use osint_core::{AnalyzedPost, PostRecord, SentimentAnalysis};

use crate::explain::explain;
use crate::scorer::{LexiconScorer, SentimentScorer};

/// Applies a [`SentimentScorer`] to posts.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer<S = LexiconScorer> {
    scorer: S,
}

impl SentimentAnalyzer<LexiconScorer> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SentimentScorer> SentimentAnalyzer<S> {
    #[must_use]
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// Score and explain one text. Unscorable or empty text is treated as
    /// neutral with no explanation.
    #[must_use]
    pub fn analyze_text(&self, text: &str) -> SentimentAnalysis {
        match self.scorer.score(text) {
            Ok(score) => {
                let analysis = SentimentAnalysis::from_score(score);
                let details = explain(&self.scorer, text, &analysis);
                analysis.with_details(details)
            }
            Err(e) => {
                tracing::debug!(error = %e, "scoring failed, falling back to neutral");
                SentimentAnalysis::neutral()
            }
        }
    }

    /// Score each post's combined title and body. Order is preserved.
    #[must_use]
    pub fn analyze(&self, posts: Vec<PostRecord>) -> Vec<AnalyzedPost> {
        posts
            .into_iter()
            .map(|post| {
                let analysis = self.analyze_text(&post.full_text());
                AnalyzedPost::new(post, analysis)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use osint_core::{Platform, PostMetrics, SentimentClass};

    use super::*;

    fn post(id: &str, title: Option<&str>, text: &str) -> PostRecord {
        PostRecord {
            platform: Platform::Reddit,
            id: id.to_string(),
            title: title.map(ToString::to_string),
            text: text.to_string(),
            author: "someone".to_string(),
            created_at: None,
            url: format!("https://reddit.com/{id}"),
            source: None,
            metrics: PostMetrics::default(),
        }
    }

    #[test]
    fn analyze_preserves_order_and_records() {
        let analyzer = SentimentAnalyzer::new();
        let posts = vec![
            post("a", Some("Awesome release"), ""),
            post("b", None, "This is terrible"),
            post("c", None, "Meeting at noon"),
        ];
        let analyzed = analyzer.analyze(posts.clone());

        let ids: Vec<&str> = analyzed.iter().map(|p| p.post.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(analyzed[1].post, posts[1]);

        let classes: Vec<SentimentClass> = analyzed.iter().map(AnalyzedPost::class).collect();
        assert_eq!(
            classes,
            [SentimentClass::Positive, SentimentClass::Negative, SentimentClass::Neutral]
        );
    }

    #[test]
    fn empty_text_is_neutral() {
        let analyzed = SentimentAnalyzer::new().analyze(vec![post("e", None, "   ")]);
        assert_eq!(analyzed[0].sentiment_analysis, SentimentAnalysis::neutral());
    }

    #[test]
    fn title_contributes_to_score() {
        let analyzer = SentimentAnalyzer::new();
        let with_title = analyzer.analyze_text(&post("t", Some("Great news"), "rollout").full_text());
        assert_eq!(with_title.sentiment, SentimentClass::Positive);
    }

    #[test]
    fn analyzed_posts_carry_an_explanation() {
        let analyzed = SentimentAnalyzer::new().analyze(vec![post("x", None, "This is terrible")]);
        let details = &analyzed[0].sentiment_analysis.details;
        assert!(details.explanation.starts_with("This text is NEGATIVE"));
        assert_eq!(details.negative_words[0].word, "terrible");
        assert!(!details.reasoning.is_empty());
    }
}
