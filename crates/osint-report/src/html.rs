//! Self-contained HTML report.

use osint_core::{AnalyzedPost, SentimentClass};
use osint_sentiment::{AnalysisReport, DistributionSummary};

/// Indicator words listed per post card.
const MAX_LISTED_WORDS: usize = 5;

const STYLE: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; \
max-width: 1200px; margin: 0 auto; padding: 20px; background-color: #f5f5f5; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; \
padding: 30px; border-radius: 10px; margin-bottom: 30px; }
.header h1 { margin: 0; font-size: 2.5em; }
.metadata, .section { background: white; padding: 20px; border-radius: 8px; \
margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.section h2 { color: #667eea; border-bottom: 2px solid #667eea; padding-bottom: 10px; margin-top: 0; }
.metric { display: inline-block; margin: 10px 20px 10px 0; }
.metric-value { font-size: 2em; font-weight: bold; display: block; }
.metric-label { color: #666; font-size: 0.9em; }
.positive { color: #4CAF50; }
.negative { color: #F44336; }
.neutral { color: #9E9E9E; }
.post-card { background: #f9f9f9; padding: 15px; margin: 10px 0; border-left: 4px solid #667eea; border-radius: 4px; }
.post-platform { font-weight: bold; color: #667eea; text-transform: uppercase; font-size: 0.85em; }
.post-text { margin: 10px 0; color: #333; }
.post-meta { font-size: 0.9em; color: #666; }
.post-why { background: #eef1fb; padding: 10px; border-radius: 4px; font-size: 0.9em; }
table { width: 100%; border-collapse: collapse; margin: 15px 0; }
th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #667eea; color: white; }
.footer { text-align: center; margin-top: 40px; padding: 20px; color: #666; font-size: 0.9em; }
a { color: #667eea; text-decoration: none; }
";

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full report page. Every interpolated string is escaped.
#[must_use]
pub fn render_html(report: &AnalysisReport) -> String {
    let keyword = escape_html(&report.keyword);
    let summary = &report.summary;
    let platforms = summary
        .by_platform
        .keys()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let body = if report.is_empty() {
        format!(
            "<div class=\"section\"><h2>No results</h2>\
             <p>No posts were found for \"{keyword}\" on any platform.</p></div>"
        )
    } else {
        [
            overview_section(&summary.distribution),
            average_section(report),
            platform_section(report),
            posts_section("Top Positive Posts", &summary.top_positive, SentimentClass::Positive),
            posts_section("Top Negative Posts", &summary.top_negative, SentimentClass::Negative),
        ]
        .concat()
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>OSINT Analysis Report - {keyword}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"header\"><h1>OSINT Analysis Report</h1>\
         <p style=\"font-size: 1.2em; margin: 10px 0 0 0;\">Keyword: \"{keyword}\"</p></div>\n\
         <div class=\"metadata\"><strong>Generated:</strong> {generated}<br>\
         <strong>Total Posts Analyzed:</strong> {total}<br>\
         <strong>Platforms:</strong> {platforms}</div>\n\
         {body}\n\
         <div class=\"footer\"><p>Generated by the OSINT keyword monitor</p>\
         <p>This report contains publicly available information collected for analysis purposes.</p></div>\n\
         </body>\n</html>\n",
        generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total = report.posts.len(),
        platforms = escape_html(&platforms),
    )
}

fn overview_section(d: &DistributionSummary) -> String {
    let metrics: String = SentimentClass::ALL
        .iter()
        .map(|&class| {
            format!(
                "<div class=\"metric\"><span class=\"metric-value {class}\">{count}</span>\
                 <span class=\"metric-label\">{label} ({pct}%)</span></div>",
                count = d.count(class),
                label = capitalize(class.as_str()),
                pct = d.pct(class),
            )
        })
        .collect();
    format!("<div class=\"section\"><h2>Sentiment Overview</h2>{metrics}</div>\n")
}

fn average_section(report: &AnalysisReport) -> String {
    let avg = &report.summary.average;
    format!(
        "<div class=\"section\"><h2>Average Sentiment Scores</h2>\
         <p><strong>Overall Sentiment:</strong> <span class=\"{class}\">{upper}</span></p>\
         <p><strong>Average Polarity:</strong> {polarity} <em>(range: -1 to 1)</em></p>\
         <p><strong>Average Subjectivity:</strong> {subjectivity} <em>(range: 0 to 1)</em></p></div>\n",
        class = avg.overall_sentiment,
        upper = avg.overall_sentiment.as_str().to_uppercase(),
        polarity = avg.avg_polarity,
        subjectivity = avg.avg_subjectivity,
    )
}

fn platform_section(report: &AnalysisReport) -> String {
    let rows: String = report
        .summary
        .by_platform
        .iter()
        .map(|(platform, d)| {
            format!(
                "<tr><td><strong>{name}</strong></td><td>{total}</td>\
                 <td class=\"positive\">{} ({}%)</td>\
                 <td class=\"negative\">{} ({}%)</td>\
                 <td class=\"neutral\">{} ({}%)</td></tr>",
                d.positive,
                d.positive_pct,
                d.negative,
                d.negative_pct,
                d.neutral,
                d.neutral_pct,
                name = capitalize(platform.as_str()),
                total = d.total,
            )
        })
        .collect();
    format!(
        "<div class=\"section\"><h2>Platform Breakdown</h2><table><thead><tr>\
         <th>Platform</th><th>Total Posts</th><th>Positive</th><th>Negative</th><th>Neutral</th>\
         </tr></thead><tbody>{rows}</tbody></table></div>\n"
    )
}

fn posts_section(title: &str, posts: &[AnalyzedPost], class: SentimentClass) -> String {
    let cards: String = if posts.is_empty() {
        "<p>None.</p>".to_string()
    } else {
        posts.iter().map(|p| post_card(p, class)).collect()
    };
    format!("<div class=\"section\"><h2>{title}</h2>{cards}</div>\n")
}

fn post_card(p: &AnalyzedPost, class: SentimentClass) -> String {
    let link = if is_web_url(&p.post.url) {
        format!(
            " | <a href=\"{}\" target=\"_blank\" rel=\"noopener\">View Post</a>",
            escape_html(&p.post.url)
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"post-card\"><div class=\"post-platform\">{platform}</div>\
         <div class=\"post-text\">{headline}</div>{why}\
         <div class=\"post-meta\">Polarity: <strong class=\"{class}\">{polarity}</strong>{link}</div></div>",
        platform = p.post.platform,
        headline = escape_html(&p.post.headline()),
        why = explanation_block(p, class),
        polarity = p.polarity(),
    )
}

/// Explanation, the indicator words of the section's class and the reasoning.
fn explanation_block(p: &AnalyzedPost, class: SentimentClass) -> String {
    let details = &p.sentiment_analysis.details;
    if details.explanation.is_empty() {
        return String::new();
    }

    let indicators = match class {
        SentimentClass::Negative => &details.negative_words,
        _ => &details.positive_words,
    };
    let words: String = indicators
        .iter()
        .take(MAX_LISTED_WORDS)
        .map(|i| format!("<li>{} ({})</li>", escape_html(&i.word), i.strength.as_str()))
        .collect();
    let reasons: String = details
        .reasoning
        .iter()
        .map(|r| format!("<li>{}</li>", escape_html(r)))
        .collect();

    let mut block = format!(
        "<div class=\"post-why\"><p><strong>Why {class}?</strong> {}</p>",
        escape_html(&details.explanation)
    );
    if !words.is_empty() {
        block.push_str(&format!(
            "<p><strong>{} words:</strong></p><ul>{words}</ul>",
            capitalize(class.as_str())
        ));
    }
    if !reasons.is_empty() {
        block.push_str(&format!("<p><strong>Reasoning:</strong></p><ul>{reasons}</ul>"));
    }
    block.push_str("</div>");
    block
}

/// Only `http(s)` links are rendered; anything else from a feed is dropped.
#[must_use]
pub fn is_web_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn post_text_is_escaped() {
        let html = render_html(&fixtures::report());
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("https://example.com/r1?a=1&amp;b=2"));
    }

    #[test]
    fn page_has_overview_and_platform_table() {
        let html = render_html(&fixtures::report());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Keyword: \"rust lang\""));
        assert!(html.contains("Platform Breakdown"));
        assert!(html.contains("<td><strong>Reddit</strong></td>"));
        assert!(html.contains("Top Negative Posts"));
        assert!(html.contains(">NEGATIVE</span>"));
    }

    #[test]
    fn empty_report_says_no_results() {
        let html = render_html(&fixtures::empty_report());
        assert!(html.contains("No results"));
        assert!(!html.contains("Platform Breakdown"));
    }

    #[test]
    fn top_posts_explain_their_sentiment() {
        let html = render_html(&fixtures::report());
        assert!(html.contains("<strong>Why negative?</strong> This text is NEGATIVE"));
        assert!(html.contains("Strong negative words found: terrible, awful."));
        assert!(html.contains("<li>terrible (strong)</li>"));
        assert!(html.contains("<li>Contains 2 negative indicators</li>"));
        assert!(html.contains("<strong>Why positive?</strong>"));
        assert!(html.contains("<li>love (strong)</li>"));
    }

    #[test]
    fn non_web_links_are_not_rendered() {
        let mut report = fixtures::report();
        report.summary.top_negative[0].post.url = "javascript:alert(document.cookie)".to_string();
        let html = render_html(&report);
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"https://example.com/r1?a=1&amp;b=2\""));
    }

    #[test]
    fn web_url_check() {
        assert!(is_web_url("https://example.com"));
        assert!(is_web_url("HTTP://example.com"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url(" data:text/html,hi"));
        assert!(!is_web_url(""));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("news"), "News");
        assert_eq!(capitalize(""), "");
    }
}
