use async_trait::async_trait;
use dr_core::{config, NewsEntry, NewsFeed, Result, MAX_RESULTS};
use feed_rs::model::Entry;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use url::Url;

use crate::logging::Logger;
use crate::utils::{ensure_success, normalize_whitespace, parse_feed, strip_html, text_content};

/// Reads one fixed RSS/Atom feed. Keywords are not applied here.
pub struct FeedClient {
    client: Client,
    url: Url,
    logger: Logger,
}

impl FeedClient {
    pub fn new() -> Result<Self> {
        Self::with_url(config::DEFAULT_FEED_URL)
    }

    pub fn with_url(url: &str) -> Result<Self> {
        let url = config::validate_url(url)?;
        let host = url.host_str().unwrap_or("feed").to_string();
        Ok(Self {
            client: Client::new(),
            url,
            logger: Logger::new().with_prefix("🌍").with_prefix(host),
        })
    }
}

#[async_trait]
impl NewsFeed for FeedClient {
    fn source(&self) -> &str {
        self.url.host_str().unwrap_or("feed")
    }

    async fn latest(&self) -> Result<Vec<NewsEntry>> {
        self.logger.info(&format!("Fetching {}", self.url));
        let response = self.client.get(self.url.clone()).send().await?;
        let body = ensure_success(response).await?.bytes().await?;
        self.logger.debug(&format!("Received {} bytes", body.len()));

        let entries = parse_entries(&body);
        self.logger.info(&format!("Got {} entries", entries.len()));
        Ok(entries)
    }
}

/// First [`MAX_RESULTS`] entries in feed order. Unparseable feeds give an empty list.
pub fn parse_entries(body: &[u8]) -> Vec<NewsEntry> {
    let feed = match parse_feed(body) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!("Feed did not parse, showing no entries: {}", e);
            return Vec::new();
        }
    };

    let mut published = published_texts(body).into_iter();
    feed.entries
        .iter()
        .take(MAX_RESULTS)
        .map(|entry| to_news_entry(entry, published.next().flatten()))
        .collect()
}

fn to_news_entry(entry: &Entry, published: Option<String>) -> NewsEntry {
    let summary = Some(text_content(entry.summary.as_ref()))
        .filter(|s| !s.trim().is_empty())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
        .unwrap_or_default();

    // The parsed timestamps are normalised to UTC; only used when the raw text is missing.
    let published = published.or_else(|| entry.published.or(entry.updated).map(|t| t.to_rfc2822()));

    NewsEntry {
        title: normalize_whitespace(&text_content(entry.title.as_ref())),
        link: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
        published,
        summary: strip_html(&summary),
    }
}

/// Publication text of every `<item>`/`<entry>`, in document order, exactly as written.
///
/// `pubDate` and `published` win over `updated` and `dc:date`. Only direct children of
/// the item count, so an Atom `<source>` block cannot leak its own timestamps.
fn published_texts(body: &[u8]) -> Vec<Option<String>> {
    let mut reader = Reader::from_reader(body);
    let mut scan = DateScan::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => scan.start(e.local_name().as_ref()),
            Ok(Event::End(_)) => scan.end(),
            Ok(Event::Text(t)) => match t.unescape() {
                Ok(text) => scan.text(&text),
                Err(_) => scan.text(&String::from_utf8_lossy(&t)),
            },
            Ok(Event::CData(c)) => scan.text(&String::from_utf8_lossy(&c.into_inner())),
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!("Stopped reading raw feed dates: {}", e);
                break;
            }
            _ => {}
        }
    }
    scan.items
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DateField {
    Published,
    Updated,
}

impl DateField {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"pubDate" | b"published" => Some(DateField::Published),
            b"updated" | b"date" => Some(DateField::Updated),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct DateScan {
    items: Vec<Option<String>>,
    in_item: bool,
    /// Element depth below the current item.
    depth: usize,
    field: Option<DateField>,
    text: String,
    published: Option<String>,
    updated: Option<String>,
}

impl DateScan {
    fn start(&mut self, name: &[u8]) {
        if !self.in_item {
            self.in_item = matches!(name, b"item" | b"entry");
            return;
        }
        if self.depth == 0 {
            self.field = DateField::from_name(name);
            self.text.clear();
        }
        self.depth += 1;
    }

    fn text(&mut self, text: &str) {
        if self.field.is_some() && self.depth == 1 {
            self.text.push_str(text);
        }
    }

    fn end(&mut self) {
        if !self.in_item {
            return;
        }
        if self.depth == 0 {
            let published = self.published.take();
            let updated = self.updated.take();
            self.items.push(published.or(updated));
            self.in_item = false;
            return;
        }

        self.depth -= 1;
        if self.depth > 0 {
            return;
        }
        let text = self.text.trim();
        if text.is_empty() {
            self.field = None;
            return;
        }
        match self.field.take() {
            Some(DateField::Published) if self.published.is_none() => self.published = Some(text.to_string()),
            Some(DateField::Updated) if self.updated.is_none() => self.updated = Some(text.to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{rss_feed, rss_item, serve};
    use axum::{routing::get, Router};

    #[test]
    fn test_parse_entries_keeps_feed_order_and_caps() {
        let items: Vec<String> = (1..=7)
            .map(|n| rss_item(n, "Fri, 17 Oct 2025 18:30:00 +0000", "<p>Body</p>"))
            .collect();
        let entries = parse_entries(rss_feed(&items).as_bytes());
        assert_eq!(entries.len(), MAX_RESULTS);
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 1", "Story 2", "Story 3", "Story 4", "Story 5"]);
    }

    #[test]
    fn test_parse_entries_fields() {
        let item = rss_item(
            1,
            "Fri, 17 Oct 2025 18:30:00 +0000",
            "<p>Humanoid robots <b>ship</b> to warehouses.</p>",
        );
        let entries = parse_entries(rss_feed(&[item]).as_bytes());
        let entry = &entries[0];
        assert_eq!(entry.title, "Story 1");
        assert_eq!(entry.link, "https://news.example.com/story-1");
        assert_eq!(entry.published_label(), "Fri, 17 Oct 2025");
        assert_eq!(entry.summary, "Humanoid robots ship to warehouses.");
    }

    #[test]
    fn test_parse_entries_keep_feed_offset() {
        let items = vec![
            rss_item(1, "Fri, 17 Oct 2025 23:30:00 -0700", "Late in California"),
            rss_item(2, "Sat, 18 Oct 2025 08:15:00 +0800", "Morning in Shanghai"),
        ];
        let entries = parse_entries(rss_feed(&items).as_bytes());
        assert_eq!(entries[0].published.as_deref(), Some("Fri, 17 Oct 2025 23:30:00 -0700"));
        assert_eq!(entries[0].published_label(), "Fri, 17 Oct 2025");
        assert_eq!(entries[1].published_label(), "Sat, 18 Oct 2025");
    }

    #[test]
    fn test_parse_entries_atom_dates_and_missing_dates() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>AI News</title>
  <id>urn:news</id>
  <updated>2025-10-18T00:00:00Z</updated>
  <entry>
    <id>urn:news:1</id>
    <title>Updated only</title>
    <link href="https://news.example.com/1"/>
    <source><id>urn:other</id><updated>2001-01-01T00:00:00Z</updated></source>
    <updated>2025-10-17T23:30:00-07:00</updated>
  </entry>
  <entry>
    <id>urn:news:2</id>
    <title>Published wins</title>
    <link href="https://news.example.com/2"/>
    <updated>2025-10-18T10:00:00+02:00</updated>
    <published>2025-10-16T09:00:00+02:00</published>
  </entry>
</feed>"#;
        let entries = parse_entries(feed.as_bytes());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].published.as_deref(), Some("2025-10-17T23:30:00-07:00"));
        assert_eq!(entries[1].published_label(), "2025-10-16T09:00");

        let undated = r#"<rss version="2.0"><channel><title>t</title>
            <item><title>No date</title><link>https://news.example.com/x</link></item>
        </channel></rss>"#;
        let entries = parse_entries(undated.as_bytes());
        assert_eq!(entries[0].published, None);
        assert_eq!(entries[0].published_label(), "");
    }

    #[test]
    fn test_parse_entries_garbage_is_empty() {
        assert!(parse_entries(b"<html><body>maintenance</body>").is_empty());
    }

    #[tokio::test]
    async fn test_latest_fetches_unfiltered_entries() {
        let router = Router::new().route(
            "/feed/",
            get(|| async {
                let items: Vec<String> = (1..=6)
                    .map(|n| rss_item(n, "Thu, 16 Oct 2025 09:00:00 +0000", "Unrelated to any keyword"))
                    .collect();
                rss_feed(&items)
            }),
        );
        let base = serve(router).await;
        let feed = FeedClient::with_url(&format!("{}/feed/", base)).unwrap();

        let entries = feed.latest().await.unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].title, "Story 1");
        assert_eq!(entries[4].title, "Story 5");
    }

    #[tokio::test]
    async fn test_latest_propagates_connection_errors() {
        let feed = FeedClient::with_url("http://127.0.0.1:9/feed/").unwrap();
        assert!(feed.latest().await.is_err());
    }
}
