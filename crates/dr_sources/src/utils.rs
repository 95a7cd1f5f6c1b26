use dr_core::{Error, Result};
use feed_rs::model::{Feed, Text};
use scraper::Html;

pub fn parse_feed(bytes: &[u8]) -> Result<Feed> {
    feed_rs::parser::parse(bytes).map_err(|e| Error::Feed(e.to_string()))
}

pub fn text_content(text: Option<&Text>) -> String {
    text.map(|t| t.content.clone()).unwrap_or_default()
}

/// Collapse runs of whitespace (including line breaks) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop markup from a feed description, keeping only the readable text.
pub fn strip_html(fragment: &str) -> String {
    if !fragment.contains('<') {
        return fragment.trim().to_string();
    }
    let document = Html::parse_fragment(fragment);
    normalize_whitespace(&document.root_element().text().collect::<String>())
}

/// Fail with the upstream status and body when the response is not a success.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(Error::Upstream {
        status: status.as_u16(),
        message: message.trim().chars().take(200).collect(),
    })
}
