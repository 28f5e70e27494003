//! Platform collectors for the keyword monitor.
//!
//! Each collector turns a keyword into normalized [`osint_core::PostRecord`]s:
//! Reddit (OAuth or anonymous public JSON), Twitter API v2 recent search, and
//! news RSS search feeds with optional article scraping. [`aggregate`] fans a
//! search out across the configured collectors and folds the results back
//! into one list with a per-platform outcome report.

pub mod aggregate;
pub mod collector;
pub mod error;
pub mod news;
pub mod reddit;
pub mod twitter;

mod http;
mod reddit_helpers;
mod retry;

pub use aggregate::{collect_all, merge, merge_tagged, CollectionResult, SourceOutcome, SourceStatus};
pub use collector::{build_collectors, PlatformCollector, RetryPolicy};
pub use error::CollectError;
pub use news::NewsCollector;
pub use reddit::RedditCollector;
pub use twitter::TwitterCollector;
