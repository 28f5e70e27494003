//! JSON, HTML, and plain-text reports plus Plotly chart pages for an
//! [`osint_sentiment::AnalysisReport`].

pub mod charts;
pub mod error;
pub mod html;
pub mod json;
pub mod naming;
pub mod text;
pub mod writer;

pub use charts::{chart_figure, chart_page, ChartKind};
pub use error::ReportError;
pub use html::{is_web_url, render_html};
pub use json::render_json;
pub use naming::{chart_file_name, report_file_name, sanitize_keyword};
pub use text::render_text;
pub use writer::ReportWriter;

#[cfg(test)]
pub(crate) mod fixtures;
