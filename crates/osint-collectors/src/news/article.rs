//! Best-effort article page scraping.

use std::sync::LazyLock;

use osint_core::Platform;
use regex::Regex;
use reqwest::Client;

use super::rss::strip_html;
use crate::error::CollectError;
use crate::http::check_status;

/// Paragraphs shorter than this are navigation, captions, or boilerplate.
const MIN_PARAGRAPH_LEN: usize = 40;
const MAX_ARTICLE_CHARS: usize = 5_000;

static OG_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*property=["']og:title["'][^>]*content=["'](.*?)["']"#)
        .expect("valid og:title regex")
});
static META_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<meta\s+[^>]*(?:name=["']description["']|property=["']og:description["'])[^>]*content=["'](.*?)["']"#,
    )
    .expect("valid meta description regex")
});
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("valid paragraph regex"));
static SCRIPTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
        .expect("valid script regex")
});

/// Text pulled from an article page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleContent {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Body paragraphs joined with blank lines, capped in length.
    pub text: String,
}

impl ArticleContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.text.is_empty()
    }
}

/// Extract title, description, and body text from an HTML page.
#[must_use]
pub fn extract_article(html: &str) -> ArticleContent {
    let title = capture(&OG_TITLE, html).or_else(|| capture(&TITLE, html));
    let description = capture(&META_DESCRIPTION, html);

    let cleaned = SCRIPTS.replace_all(html, " ");
    let mut text = String::new();
    for cap in PARAGRAPH.captures_iter(&cleaned) {
        let paragraph = strip_html(cap.get(1).map_or("", |m| m.as_str()));
        if paragraph.chars().count() < MIN_PARAGRAPH_LEN {
            continue;
        }
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&paragraph);
        if text.chars().count() >= MAX_ARTICLE_CHARS {
            break;
        }
    }
    if text.chars().count() > MAX_ARTICLE_CHARS {
        text = text.chars().take(MAX_ARTICLE_CHARS).collect();
    }

    ArticleContent {
        title,
        description,
        text,
    }
}

/// Download one article page and extract its content.
///
/// # Errors
///
/// Returns a [`CollectError`] on transport failure or a non-2xx status.
pub async fn fetch_article(client: &Client, url: &str) -> Result<ArticleContent, CollectError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(|e| CollectError::network(Platform::News, e))?;
    let response = check_status(Platform::News, response)?;
    let body = response
        .text()
        .await
        .map_err(|e| CollectError::network(Platform::News, e))?;
    Ok(extract_article(&body))
}

fn capture(re: &Regex, html: &str) -> Option<String> {
    let raw = re.captures(html)?.get(1)?.as_str();
    let text = strip_html(raw);
    (!text.is_empty()).then_some(text)
}
