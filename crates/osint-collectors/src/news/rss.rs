//! RSS item extraction for news search feeds.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One `<item>` from a search feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Description with HTML stripped.
    pub description: String,
    pub published: Option<DateTime<Utc>>,
    /// Outlet name from `<source>`, when the feed provides it.
    pub source: Option<String>,
}

/// Parse an RSS XML body, keeping at most `max_items` items that have both a
/// title and a link.
///
/// # Errors
///
/// Returns the underlying [`quick_xml::Error`] if the XML is malformed.
pub fn parse_rss(xml: &str, max_items: usize) -> Result<Vec<FeedItem>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut partial = PartialItem::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    partial = PartialItem::default();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    if let Some(item) = std::mem::take(&mut partial).finish() {
                        items.push(item);
                        if items.len() >= max_items {
                            break;
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    partial.append(&current_tag, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    partial.append(&current_tag, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(items)
}

#[derive(Default)]
struct PartialItem {
    title: String,
    link: String,
    description: String,
    pub_date: String,
    source: String,
}

impl PartialItem {
    fn append(&mut self, tag: &str, text: &str) {
        let target = match tag {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "description" => &mut self.description,
            "pubDate" => &mut self.pub_date,
            "source" => &mut self.source,
            _ => return,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(text.trim());
    }

    fn finish(self) -> Option<FeedItem> {
        if self.title.is_empty() || self.link.is_empty() {
            return None;
        }
        Some(FeedItem {
            published: parse_pub_date(&self.pub_date),
            description: strip_html(&self.description),
            source: Some(self.source).filter(|s| !s.is_empty()),
            title: self.title,
            link: self.link,
        })
    }
}

fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the handful of HTML entities that show up in feed and page text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
