//! Word-level and sentence-level breakdown of a score.

use osint_core::{
    Indicator, IndicatorStrength, SentenceSentiment, SentimentAnalysis, SentimentClass,
    SentimentExplanation,
};

use crate::lexicon::{intensity, is_negation, is_strong, opinion, tokenize};
use crate::scorer::SentimentScorer;

/// Only the leading sentences are broken down.
const MAX_SENTENCES: usize = 5;
const SENTENCE_PREVIEW_CHARS: usize = 100;

/// Explain `analysis`, the score `scorer` gave `text`.
///
/// Indicator words, negations and intensifiers come from the built-in
/// lexicon regardless of which scorer produced the score. Sentences are
/// scored with `scorer`; a sentence it cannot score counts as neutral.
#[must_use]
pub fn explain<S: SentimentScorer>(
    scorer: &S,
    text: &str,
    analysis: &SentimentAnalysis,
) -> SentimentExplanation {
    let tokens: Vec<String> = tokenize(text).collect();

    let mut positive_words = Vec::new();
    let mut negative_words = Vec::new();
    for token in &tokens {
        let Some((polarity, _)) = opinion(token) else {
            continue;
        };
        let indicator = Indicator {
            word: token.clone(),
            strength: if is_strong(token) {
                IndicatorStrength::Strong
            } else {
                IndicatorStrength::Moderate
            },
        };
        if polarity > 0.0 {
            positive_words.push(indicator);
        } else if polarity < 0.0 {
            negative_words.push(indicator);
        }
    }

    let negations: Vec<String> = tokens.iter().filter(|t| is_negation(t)).cloned().collect();
    let intensifiers: Vec<String> = tokens
        .iter()
        .filter(|t| intensity(t).is_some())
        .cloned()
        .collect();

    let sentence_breakdown: Vec<SentenceSentiment> = split_sentences(text)
        .take(MAX_SENTENCES)
        .map(|sentence| {
            let scored = scorer
                .score(sentence)
                .map_or_else(|_| SentimentAnalysis::neutral(), SentimentAnalysis::from_score);
            SentenceSentiment {
                text: preview(sentence),
                sentiment: scored.sentiment,
                score: scored.polarity,
            }
        })
        .collect();

    let mut details = SentimentExplanation {
        positive_words,
        negative_words,
        negations,
        intensifiers,
        sentence_breakdown,
        explanation: String::new(),
        reasoning: Vec::new(),
    };
    details.explanation = explanation_text(analysis, &details);
    details.reasoning = reasoning(analysis.sentiment, &details);
    details
}

fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn preview(sentence: &str) -> String {
    if sentence.chars().count() > SENTENCE_PREVIEW_CHARS {
        let cut: String = sentence.chars().take(SENTENCE_PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        sentence.to_string()
    }
}

/// Distinct words in first-seen order.
fn distinct<'a>(words: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for word in words {
        if !seen.contains(&word) {
            seen.push(word);
        }
    }
    seen
}

fn words_with(indicators: &[Indicator], strength: IndicatorStrength) -> Vec<&str> {
    distinct(
        indicators
            .iter()
            .filter(|i| i.strength == strength)
            .map(|i| i.word.as_str()),
    )
}

fn explanation_text(analysis: &SentimentAnalysis, details: &SentimentExplanation) -> String {
    let mut parts = vec![format!(
        "This text is {} (score: {:.3}).",
        analysis.sentiment.as_str().to_uppercase(),
        analysis.polarity
    )];

    for (indicators, strong_label, moderate_label) in [
        (&details.positive_words, "Strong positive words found", "Positive words"),
        (&details.negative_words, "Strong negative words found", "Negative words"),
    ] {
        let strong = words_with(indicators, IndicatorStrength::Strong);
        if !strong.is_empty() {
            parts.push(format!("{strong_label}: {}.", strong.join(", ")));
        }
        let moderate = words_with(indicators, IndicatorStrength::Moderate);
        if !moderate.is_empty() {
            parts.push(format!("{moderate_label}: {}.", moderate.join(", ")));
        }
    }

    if !details.negations.is_empty() {
        let words = distinct(details.negations.iter().map(String::as_str));
        parts.push(format!(
            "Negations detected ({}) which may flip sentiment.",
            words.join(", ")
        ));
    }
    if !details.intensifiers.is_empty() {
        let words = distinct(details.intensifiers.iter().map(String::as_str));
        parts.push(format!(
            "Intensifiers found ({}) which amplify sentiment.",
            words.join(", ")
        ));
    }

    let sentences = &details.sentence_breakdown;
    if sentences.len() > 1 {
        let count = |class| sentences.iter().filter(|s| s.sentiment == class).count();
        let positive = count(SentimentClass::Positive);
        let negative = count(SentimentClass::Negative);
        if positive > negative {
            parts.push(format!(
                "Most sentences ({positive}/{}) are positive.",
                sentences.len()
            ));
        } else if negative > positive {
            parts.push(format!(
                "Most sentences ({negative}/{}) are negative.",
                sentences.len()
            ));
        }
    }

    parts.join(" ")
}

fn reasoning(class: SentimentClass, details: &SentimentExplanation) -> Vec<String> {
    let positives = details.positive_words.len();
    let negatives = details.negative_words.len();
    let intensifiers = details.intensifiers.len();
    let mut reasons = Vec::new();

    match class {
        SentimentClass::Positive => {
            if positives > 0 {
                reasons.push(format!("Contains {positives} positive indicators"));
            }
            if intensifiers > 0 {
                reasons.push(format!("Uses {intensifiers} intensifiers to strengthen tone"));
            }
            if negatives == 0 {
                reasons.push("No significant negative language detected".to_string());
            }
        }
        SentimentClass::Negative => {
            if negatives > 0 {
                reasons.push(format!("Contains {negatives} negative indicators"));
            }
            if intensifiers > 0 {
                reasons.push(format!(
                    "Uses {intensifiers} intensifiers to strengthen criticism"
                ));
            }
            if positives == 0 {
                reasons.push("No significant positive language detected".to_string());
            }
        }
        SentimentClass::Neutral => {
            reasons.push("Balanced or factual language".to_string());
            if positives == 0 && negatives == 0 {
                reasons.push("Lacks strong emotional indicators".to_string());
            }
        }
    }

    if !details.negations.is_empty() {
        reasons.push(format!(
            "Contains {} negations that may affect meaning",
            details.negations.len()
        ));
    }
    reasons
}

#[cfg(test)]
mod tests {
    use osint_core::SentimentScore;

    use super::*;
    use crate::scorer::LexiconScorer;

    fn explained(text: &str) -> (SentimentAnalysis, SentimentExplanation) {
        let analysis = SentimentAnalysis::from_score(LexiconScorer.score(text).unwrap());
        let details = explain(&LexiconScorer, text, &analysis);
        (analysis, details)
    }

    fn indicator(word: &str, strength: IndicatorStrength) -> Indicator {
        Indicator {
            word: word.to_string(),
            strength,
        }
    }

    #[test]
    fn finds_indicators_and_modifiers() {
        let (analysis, details) = explained("Rust is very great. But the docs are not bad!");
        assert_eq!(analysis.sentiment, SentimentClass::Positive);
        assert_eq!(
            details.positive_words,
            [indicator("great", IndicatorStrength::Strong)]
        );
        assert_eq!(
            details.negative_words,
            [indicator("bad", IndicatorStrength::Moderate)]
        );
        assert_eq!(details.negations, ["not"]);
        assert_eq!(details.intensifiers, ["very"]);
    }

    #[test]
    fn breaks_down_each_sentence() {
        let (_, details) = explained("Rust is very great. But the docs are not bad!");
        let breakdown = &details.sentence_breakdown;
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].text, "Rust is very great");
        assert_eq!(breakdown[0].sentiment, SentimentClass::Positive);
        assert!((breakdown[0].score - 1.0).abs() < 1e-9);
        assert_eq!(breakdown[1].text, "But the docs are not bad");
        assert_eq!(breakdown[1].sentiment, SentimentClass::Positive);
        assert!((breakdown[1].score - 0.35).abs() < 1e-9);
    }

    #[test]
    fn explanation_and_reasoning_follow_the_class() {
        let (_, details) = explained("Rust is very great. But the docs are not bad!");
        assert!(details.explanation.starts_with("This text is POSITIVE (score: "));
        assert!(details.explanation.contains("Strong positive words found: great."));
        assert!(details.explanation.contains("Negative words: bad."));
        assert!(details
            .explanation
            .contains("Negations detected (not) which may flip sentiment."));
        assert!(details.explanation.ends_with("Most sentences (2/2) are positive."));
        assert_eq!(
            details.reasoning,
            [
                "Contains 1 positive indicators",
                "Uses 1 intensifiers to strengthen tone",
                "Contains 1 negations that may affect meaning",
            ]
        );
    }

    #[test]
    fn negative_reasoning() {
        let (_, details) = explained("terrible terrible app");
        assert_eq!(
            details.negative_words,
            [
                indicator("terrible", IndicatorStrength::Strong),
                indicator("terrible", IndicatorStrength::Strong),
            ]
        );
        assert!(details
            .explanation
            .contains("Strong negative words found: terrible."));
        assert_eq!(
            details.reasoning,
            [
                "Contains 2 negative indicators",
                "No significant positive language detected",
            ]
        );
    }

    #[test]
    fn factual_text_is_explained_as_neutral() {
        let (_, details) = explained("Meeting at noon");
        assert_eq!(details.explanation, "This text is NEUTRAL (score: 0.000).");
        assert_eq!(
            details.reasoning,
            ["Balanced or factual language", "Lacks strong emotional indicators"]
        );
        assert_eq!(details.sentence_breakdown.len(), 1);
    }

    #[test]
    fn long_sentences_are_truncated_and_capped() {
        let long = "word ".repeat(40);
        let text = format!("{long}. two. three. four. five. six. seven");
        let (_, details) = explained(&text);
        assert_eq!(details.sentence_breakdown.len(), MAX_SENTENCES);
        let first = &details.sentence_breakdown[0].text;
        assert_eq!(first.chars().count(), SENTENCE_PREVIEW_CHARS + 3);
        assert!(first.ends_with("..."));
    }

    #[test]
    fn unscorable_sentences_count_as_neutral() {
        struct Refuses;
        impl SentimentScorer for Refuses {
            fn score(&self, _: &str) -> Result<SentimentScore, crate::ScoreError> {
                Err(crate::ScoreError::Unscorable("no".to_string()))
            }
        }
        let details = explain(&Refuses, "good. bad", &SentimentAnalysis::neutral());
        assert!(details
            .sentence_breakdown
            .iter()
            .all(|s| s.sentiment == SentimentClass::Neutral && s.score.abs() < f64::EPSILON));
    }
}
