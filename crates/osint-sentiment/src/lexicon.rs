//! Word tables used by [`crate::LexiconScorer`] and [`crate::top_terms`].

/// Opinion words as `(word, polarity, subjectivity)`.
///
/// Keys are lowercase single words. Polarity is in `[-1.0, 1.0]`,
/// subjectivity in `[0.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64, f64)] = &[
    // Strong positive
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("loving", 0.6, 0.9),
    ("amazing", 0.6, 0.9),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("wonderful", 1.0, 1.0),
    ("brilliant", 0.9, 1.0),
    ("awesome", 1.0, 1.0),
    ("great", 0.8, 0.75),
    ("perfect", 1.0, 1.0),
    ("outstanding", 0.5, 0.7),
    ("superb", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("best", 1.0, 0.3),
    ("beautiful", 0.85, 1.0),
    ("impressive", 1.0, 1.0),
    ("exciting", 0.3, 0.8),
    // Positive
    ("good", 0.7, 0.6),
    ("nice", 0.6, 1.0),
    ("fine", 0.4, 0.5),
    ("ok", 0.5, 0.5),
    ("okay", 0.5, 0.5),
    ("decent", 0.17, 0.67),
    ("solid", 0.3, 0.5),
    ("happy", 0.8, 1.0),
    ("pleased", 0.5, 1.0),
    ("satisfied", 0.5, 1.0),
    ("enjoyable", 0.4, 0.6),
    ("enjoy", 0.4, 0.5),
    ("fun", 0.3, 0.2),
    ("interesting", 0.5, 0.5),
    ("cool", 0.35, 0.65),
    ("helpful", 0.5, 0.4),
    ("useful", 0.3, 0.0),
    ("effective", 0.6, 0.8),
    ("efficient", 0.4, 0.6),
    ("reliable", 0.4, 0.6),
    ("quality", 0.3, 0.4),
    ("better", 0.5, 0.5),
    ("improved", 0.4, 0.4),
    ("success", 0.3, 0.3),
    ("successful", 0.75, 0.95),
    ("win", 0.8, 0.4),
    ("like", 0.2, 0.3),
    ("recommend", 0.4, 0.5),
    ("fast", 0.2, 0.6),
    ("easy", 0.43, 0.83),
    ("safe", 0.5, 0.5),
    ("strong", 0.43, 0.73),
    ("thanks", 0.2, 0.2),
    // Strong negative
    ("hate", -0.8, 0.9),
    ("hated", -0.8, 0.9),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("disgusting", -1.0, 1.0),
    ("pathetic", -1.0, 1.0),
    ("useless", -0.5, 0.0),
    ("garbage", -0.7, 0.8),
    ("trash", -0.7, 0.8),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("disaster", -0.8, 0.8),
    ("nightmare", -0.8, 0.9),
    ("dreadful", -1.0, 1.0),
    ("appalling", -1.0, 1.0),
    ("atrocious", -1.0, 1.0),
    // Negative
    ("bad", -0.7, 0.67),
    ("poor", -0.4, 0.6),
    ("weak", -0.38, 0.56),
    ("frustrating", -0.4, 0.7),
    ("annoying", -0.8, 0.9),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.29, 0.54),
    ("confusing", -0.3, 0.7),
    ("complicated", -0.5, 1.0),
    ("slow", -0.3, 0.39),
    ("expensive", -0.5, 0.7),
    ("broken", -0.4, 0.4),
    ("buggy", -0.5, 0.6),
    ("error", -0.3, 0.2),
    ("issue", -0.2, 0.2),
    ("problem", -0.3, 0.3),
    ("worse", -0.4, 0.6),
    ("wrong", -0.5, 0.9),
    ("fail", -0.5, 0.4),
    ("failed", -0.5, 0.4),
    ("failure", -0.5, 0.4),
    ("crash", -0.4, 0.3),
    ("dangerous", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("scary", -0.5, 1.0),
    ("ugly", -0.7, 1.0),
    ("boring", -1.0, 1.0),
    ("stupid", -0.8, 1.0),
    ("lawsuit", -0.3, 0.3),
    ("scandal", -0.5, 0.6),
];

/// Opinion words reported as strong indicators. Everything else in
/// [`LEXICON`] is moderate.
pub(crate) const STRONG_OPINIONS: &[&str] = &[
    "love", "loved", "loving", "amazing", "excellent", "fantastic", "wonderful", "brilliant",
    "awesome", "great", "perfect", "outstanding", "superb", "incredible", "best", "beautiful",
    "impressive", "exciting", "hate", "hated", "terrible", "awful", "horrible", "worst",
    "disgusting", "pathetic", "useless", "garbage", "trash", "disappointing", "disappointed",
    "disaster", "nightmare", "dreadful", "appalling", "atrocious",
];

/// Tokens that flip the polarity of the opinion word that follows them.
pub(crate) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nobody", "nowhere", "none", "don't", "doesn't",
    "didn't", "won't", "wouldn't", "shouldn't", "can't", "cannot", "couldn't", "isn't", "aren't",
    "wasn't", "nor",
];

/// Degree adverbs and the factor they apply to the next opinion word.
pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.4),
    ("completely", 1.4),
    ("totally", 1.4),
    ("really", 1.2),
    ("quite", 1.1),
    ("fairly", 1.1),
    ("pretty", 1.1),
    ("highly", 1.3),
    ("exceptionally", 1.5),
    ("remarkably", 1.4),
    ("extraordinarily", 1.5),
    ("so", 1.2),
    ("super", 1.3),
];

/// Common English words skipped when counting top terms.
pub(crate) const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "get",
    "got", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i",
    "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "let's", "me",
    "more", "most", "my", "new", "no", "nor", "not", "now", "of", "off", "on", "once", "one",
    "only", "or", "other", "our", "ours", "out", "over", "own", "said", "same", "says", "she",
    "should", "so", "some", "such", "than", "that", "that's", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "us", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your", "yours", "http", "https", "www", "com",
    "amp",
];

#[must_use]
pub(crate) fn opinion(word: &str) -> Option<(f64, f64)> {
    LEXICON
        .iter()
        .find(|(w, _, _)| *w == word)
        .map(|&(_, polarity, subjectivity)| (polarity, subjectivity))
}

#[must_use]
pub(crate) fn is_strong(word: &str) -> bool {
    STRONG_OPINIONS.contains(&word)
}

#[must_use]
pub(crate) fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, factor)| factor)
}

#[must_use]
pub(crate) fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

#[must_use]
pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Lowercase word tokens with surrounding punctuation removed.
///
/// Inner apostrophes survive so contractions like `don't` stay intact.
/// Curly apostrophes are normalized to `'`.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|word| {
            word.replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_keys_are_unique_and_in_range() {
        for (i, (word, polarity, subjectivity)) in LEXICON.iter().enumerate() {
            assert!((-1.0..=1.0).contains(polarity), "{word} polarity");
            assert!((0.0..=1.0).contains(subjectivity), "{word} subjectivity");
            assert!(
                LEXICON[i + 1..].iter().all(|(other, _, _)| other != word),
                "duplicate entry: {word}"
            );
        }
    }

    #[test]
    fn tokenize_strips_punctuation_and_keeps_contractions() {
        let tokens: Vec<String> = tokenize("Don\u{2019}t PANIC!! (really) ...").collect();
        assert_eq!(tokens, ["don't", "panic", "really"]);
    }

    #[test]
    fn negation_catches_unlisted_contractions() {
        assert!(is_negation("not"));
        assert!(is_negation("hasn't"));
        assert!(!is_negation("note"));
    }

    #[test]
    fn lookups() {
        assert_eq!(opinion("great"), Some((0.8, 0.75)));
        assert_eq!(opinion("table"), None);
        assert_eq!(intensity("very"), Some(1.3));
        assert!(is_stopword("the"));
        assert!(!is_stopword("rust"));
        assert!(is_strong("terrible"));
        assert!(!is_strong("bad"));
    }

    #[test]
    fn strong_opinions_are_in_the_lexicon() {
        for word in STRONG_OPINIONS {
            assert!(opinion(word).is_some(), "{word} missing from lexicon");
        }
    }
}
