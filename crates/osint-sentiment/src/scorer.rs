//! Lexicon-based polarity and subjectivity scoring.

use osint_core::SentimentScore;

use crate::error::ScoreError;
use crate::lexicon::{intensity, is_negation, opinion, tokenize};

/// How many tokens before an opinion word are checked for a negation.
const NEGATION_WINDOW: usize = 3;
/// Factor applied to the polarity of a negated opinion word.
const NEGATION_FACTOR: f64 = -0.5;
/// Extra emphasis per `!`, counted up to [`MAX_EXCLAMATIONS`].
const EXCLAMATION_BOOST: f64 = 0.1;
const MAX_EXCLAMATIONS: usize = 3;

/// Turns free text into a [`SentimentScore`].
///
/// Implementations must be deterministic: the same text always yields the
/// same score.
pub trait SentimentScorer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScoreError::EmptyText`] for blank input, or
    /// [`ScoreError::Unscorable`] when the implementation cannot handle it.
    fn score(&self, text: &str) -> Result<SentimentScore, ScoreError>;
}

/// Default scorer backed by the built-in English opinion lexicon.
///
/// Each opinion word contributes its polarity and subjectivity, scaled by
/// a directly preceding intensifier and flipped (at half strength) when a
/// negation appears within the previous three tokens. The scores of all
/// opinion words are averaged. Exclamation marks add emphasis. Text with no
/// opinion words scores neutral with zero subjectivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentScore, ScoreError> {
        if text.trim().is_empty() {
            return Err(ScoreError::EmptyText);
        }

        let tokens: Vec<String> = tokenize(text).collect();
        let mut polarity_sum = 0.0_f64;
        let mut subjectivity_sum = 0.0_f64;
        let mut hits = 0_u32;

        for (i, token) in tokens.iter().enumerate() {
            let Some((mut polarity, mut subjectivity)) = opinion(token) else {
                continue;
            };

            if let Some(factor) = i.checked_sub(1).and_then(|prev| intensity(&tokens[prev])) {
                polarity *= factor;
                subjectivity *= factor;
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| is_negation(t)) {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            return Ok(SentimentScore::neutral());
        }

        let n = f64::from(hits);
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        #[allow(clippy::cast_precision_loss)]
        let emphasis = 1.0 + EXCLAMATION_BOOST * exclamations as f64;

        Ok(SentimentScore {
            polarity: (polarity_sum / n * emphasis).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / n).clamp(0.0, 1.0),
        })
    }
}
