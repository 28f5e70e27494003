//! Output file names.

use chrono::{DateTime, Local};
use osint_core::ReportFormat;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Make a keyword safe for a file name: whitespace runs become `_` and
/// anything other than ASCII alphanumerics, `-`, and `_` is dropped.
/// Falls back to `"query"` when nothing survives.
#[must_use]
pub fn sanitize_keyword(keyword: &str) -> String {
    let joined = keyword.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "query".to_string()
    } else {
        cleaned
    }
}

/// `osint_report_{keyword}_{YYYYmmdd_HHMMSS}.{ext}`
#[must_use]
pub fn report_file_name(keyword: &str, at: DateTime<Local>, format: ReportFormat) -> String {
    format!(
        "osint_report_{}_{}.{}",
        sanitize_keyword(keyword),
        at.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// `osint_{chart}_{keyword}_{YYYYmmdd_HHMMSS}.html`
#[must_use]
pub fn chart_file_name(chart: &str, keyword: &str, at: DateTime<Local>) -> String {
    format!(
        "osint_{chart}_{}_{}.html",
        sanitize_keyword(keyword),
        at.format(TIMESTAMP_FORMAT)
    )
}
