use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("text is empty")]
    EmptyText,

    /// The scorer could not produce a score for non-empty text.
    #[error("text could not be scored: {0}")]
    Unscorable(String),
}
