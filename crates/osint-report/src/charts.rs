//! Plotly figure specifications and standalone chart pages.
//!
//! Figures are plain Plotly JSON (`{"data": [...], "layout": {...}}`). The
//! dashboard renders them client-side; [`chart_page`] wraps one in an HTML
//! page that loads Plotly.js.

use osint_core::SentimentClass;
use osint_sentiment::AnalysisReport;
use serde_json::{json, Value};

use crate::html::escape_html;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const HISTOGRAM_COLOR: &str = "#2196F3";
const TOP_TERMS_COLOR: &str = "#667eea";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SentimentPie,
    PlatformComparison,
    PolarityHistogram,
    SentimentTimeline,
    TopTerms,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::SentimentPie,
        ChartKind::PlatformComparison,
        ChartKind::PolarityHistogram,
        ChartKind::SentimentTimeline,
        ChartKind::TopTerms,
    ];

    /// File-name fragment.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::SentimentPie => "sentiment_pie",
            ChartKind::PlatformComparison => "platform_comparison",
            ChartKind::PolarityHistogram => "polarity_histogram",
            ChartKind::SentimentTimeline => "sentiment_timeline",
            ChartKind::TopTerms => "top_terms",
        }
    }

    #[must_use]
    pub fn title(self, keyword: &str) -> String {
        let prefix = match self {
            ChartKind::SentimentPie => "Sentiment Distribution",
            ChartKind::PlatformComparison => "Platform Comparison",
            ChartKind::PolarityHistogram => "Polarity Distribution",
            ChartKind::SentimentTimeline => "Sentiment Timeline",
            ChartKind::TopTerms => "Top Terms",
        };
        format!("{prefix}: {keyword}")
    }
}

/// Build the Plotly figure for `kind`, or `None` when the report has no data
/// for it (no posts, or no timestamps for the timeline).
#[must_use]
pub fn chart_figure(kind: ChartKind, report: &AnalysisReport) -> Option<Value> {
    if report.is_empty() {
        return None;
    }
    let title = kind.title(&report.keyword);
    match kind {
        ChartKind::SentimentPie => Some(sentiment_pie(report, &title)),
        ChartKind::PlatformComparison => Some(platform_comparison(report, &title)),
        ChartKind::PolarityHistogram => Some(polarity_histogram(report, &title)),
        ChartKind::SentimentTimeline => sentiment_timeline(report, &title),
        ChartKind::TopTerms => top_terms(report, &title),
    }
}

/// Standalone HTML page rendering `figure` with Plotly.js.
#[must_use]
pub fn chart_page(title: &str, figure: &Value) -> String {
    // A literal "</script>" inside the JSON would end the script element.
    let figure_json = figure.to_string().replace("</", "<\\/");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n<script src=\"{PLOTLY_JS}\"></script>\n</head>\n<body>\n\
         <div id=\"chart\" style=\"width:100%;height:600px;\"></div>\n\
         <script>\nconst figure = {figure_json};\n\
         Plotly.newPlot('chart', figure.data, figure.layout, {{responsive: true}});\n</script>\n\
         </body>\n</html>\n",
        title = escape_html(title),
    )
}

fn sentiment_pie(report: &AnalysisReport, title: &str) -> Value {
    let d = &report.summary.distribution;
    let labels: Vec<String> = SentimentClass::ALL.iter().map(|c| label(*c)).collect();
    let values: Vec<usize> = SentimentClass::ALL.iter().map(|c| d.count(*c)).collect();
    let colors: Vec<&str> = SentimentClass::ALL.iter().map(|c| c.color()).collect();
    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "hole": 0.3,
            "marker": { "colors": colors },
            "textinfo": "label+percent",
        }],
        "layout": { "title": { "text": title }, "showlegend": true, "height": 500 },
    })
}

fn platform_comparison(report: &AnalysisReport, title: &str) -> Value {
    let by_platform = &report.summary.by_platform;
    let platforms: Vec<String> = by_platform.keys().map(|p| label_str(p.as_str())).collect();
    let traces: Vec<Value> = SentimentClass::ALL
        .iter()
        .map(|&class| {
            let counts: Vec<usize> = by_platform.values().map(|d| d.count(class)).collect();
            json!({
                "type": "bar",
                "name": label(class),
                "x": platforms,
                "y": counts,
                "marker": { "color": class.color() },
            })
        })
        .collect();
    json!({
        "data": traces,
        "layout": {
            "title": { "text": title },
            "xaxis": { "title": { "text": "Platform" } },
            "yaxis": { "title": { "text": "Number of Posts" } },
            "barmode": "group",
            "height": 500,
        },
    })
}

fn polarity_histogram(report: &AnalysisReport, title: &str) -> Value {
    let polarities: Vec<f64> = report.posts.iter().map(|p| p.polarity()).collect();
    json!({
        "data": [{
            "type": "histogram",
            "x": polarities,
            "nbinsx": 50,
            "marker": { "color": HISTOGRAM_COLOR },
        }],
        "layout": {
            "title": { "text": title },
            "xaxis": { "title": { "text": "Polarity Score (-1 to 1)" }, "range": [-1, 1] },
            "yaxis": { "title": { "text": "Number of Posts" } },
            "height": 500,
            "shapes": [threshold_line(-0.1, "red"), threshold_line(0.1, "green")],
        },
    })
}

fn sentiment_timeline(report: &AnalysisReport, title: &str) -> Option<Value> {
    let timeline = &report.summary.timeline;
    if timeline.is_empty() {
        return None;
    }
    let x: Vec<String> = timeline
        .buckets
        .iter()
        .map(|b| b.start.to_rfc3339())
        .collect();
    let traces: Vec<Value> = SentimentClass::ALL
        .iter()
        .map(|&class| {
            let y: Vec<usize> = timeline.buckets.iter().map(|b| b.count(class)).collect();
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": label(class),
                "x": x,
                "y": y,
                "line": { "color": class.color(), "width": 2 },
            })
        })
        .collect();
    Some(json!({
        "data": traces,
        "layout": {
            "title": { "text": title },
            "xaxis": { "title": { "text": "Time" } },
            "yaxis": { "title": { "text": "Number of Posts" } },
            "hovermode": "x unified",
            "height": 500,
        },
    }))
}

fn top_terms(report: &AnalysisReport, title: &str) -> Option<Value> {
    let terms = &report.summary.top_terms;
    if terms.is_empty() {
        return None;
    }
    // Horizontal bars draw bottom-up, so reverse to put the top term first.
    let words: Vec<&str> = terms.iter().rev().map(|t| t.term.as_str()).collect();
    let counts: Vec<usize> = terms.iter().rev().map(|t| t.count).collect();
    Some(json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "x": counts,
            "y": words,
            "marker": { "color": TOP_TERMS_COLOR },
        }],
        "layout": {
            "title": { "text": title },
            "xaxis": { "title": { "text": "Posts mentioning term" } },
            "height": 600,
        },
    }))
}

fn threshold_line(x: f64, color: &str) -> Value {
    json!({
        "type": "line",
        "x0": x, "x1": x, "yref": "paper", "y0": 0, "y1": 1,
        "line": { "color": color, "dash": "dash" },
    })
}

fn label(class: SentimentClass) -> String {
    label_str(class.as_str())
}

fn label_str(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
