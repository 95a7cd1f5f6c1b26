use async_trait::async_trait;
use dr_core::{config, Error, Paper, PaperSearch, Result, MAX_RESULTS};
use feed_rs::model::Entry;
use reqwest::Client;
use url::Url;

use crate::logging::Logger;
use crate::utils::{ensure_success, normalize_whitespace, parse_feed, text_content};

const USER_AGENT: &str = concat!("research-radar/", env!("CARGO_PKG_VERSION"));

/// Title-scoped phrase match per keyword, OR-joined.
pub fn build_search_query(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| format!("ti:\"{}\"", k))
        .collect::<Vec<_>>()
        .join(" OR ")
}

pub struct ArxivClient {
    client: Client,
    endpoint: Url,
    logger: Logger,
}

impl ArxivClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(config::DEFAULT_ARXIV_URL)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            endpoint: config::validate_url(endpoint)?,
            logger: Logger::new().with_prefix("📄").with_prefix("arXiv"),
        })
    }
}

#[async_trait]
impl PaperSearch for ArxivClient {
    fn source(&self) -> &str {
        "arXiv"
    }

    async fn search(&self, keywords: &[String]) -> Result<Vec<Paper>> {
        if keywords.is_empty() {
            self.logger.warn("No keywords configured, skipping paper search");
            return Ok(Vec::new());
        }

        let query = build_search_query(keywords);
        self.logger.info(&format!("Searching for {}", query));

        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("search_query", query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?;
        let body = ensure_success(response).await?.bytes().await?;
        self.logger.debug(&format!("Received {} bytes", body.len()));

        let papers = parse_papers(&body)?;
        self.logger.info(&format!("Found {} papers", papers.len()));
        Ok(papers)
    }
}

/// Turn an arXiv Atom response into at most [`MAX_RESULTS`] papers.
pub fn parse_papers(body: &[u8]) -> Result<Vec<Paper>> {
    let feed = parse_feed(body)?;

    if let Some(error) = feed.entries.iter().find(|e| e.id.contains("/api/errors")) {
        return Err(Error::Upstream {
            status: 400,
            message: text_content(error.summary.as_ref()).trim().to_string(),
        });
    }

    Ok(feed
        .entries
        .iter()
        .filter_map(to_paper)
        .take(MAX_RESULTS)
        .collect())
}

fn to_paper(entry: &Entry) -> Option<Paper> {
    let date = entry.published.or(entry.updated)?.date_naive();
    let title = normalize_whitespace(&text_content(entry.title.as_ref()));
    let link = pdf_link(entry)?;
    if title.is_empty() {
        tracing::debug!("Skipping untitled entry {}", entry.id);
        return None;
    }

    Some(Paper {
        title,
        link,
        summary: text_content(entry.summary.as_ref()).trim().to_string(),
        date,
    })
}

/// The link titled `pdf`, else any PDF-typed link, else the abstract page rewritten to its PDF.
fn pdf_link(entry: &Entry) -> Option<String> {
    entry
        .links
        .iter()
        .find(|l| l.title.as_deref() == Some("pdf"))
        .or_else(|| {
            entry
                .links
                .iter()
                .find(|l| l.media_type.as_deref() == Some("application/pdf"))
        })
        .map(|l| l.href.clone())
        .or_else(|| {
            entry
                .id
                .contains("/abs/")
                .then(|| entry.id.replacen("/abs/", "/pdf/", 1))
        })
}
