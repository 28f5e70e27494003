//! Sentiment scoring and distribution summaries for collected posts.
//!
//! [`LexiconScorer`] assigns polarity and subjectivity to text,
//! [`SentimentAnalyzer`] applies a scorer to a batch of posts, the
//! [`summary`] and [`trends`] functions aggregate the results, and
//! [`pipeline::run_analysis`] ties collection and analysis together.

pub mod analyzer;
pub mod error;
pub mod explain;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod trends;

pub use analyzer::SentimentAnalyzer;
pub use error::ScoreError;
pub use explain::explain;
pub use pipeline::{build_report, run_analysis, AnalysisReport, AnalysisRequest};
pub use scorer::{LexiconScorer, SentimentScorer};
pub use summary::{
    average_sentiment, summarize, summarize_by_platform, summary_text, top_posts, AnalysisSummary,
    AverageSentiment, DistributionSummary,
};
pub use trends::{sentiment_timeline, top_terms, Granularity, TermCount, Timeline, TimelineBucket};
