use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of items a single scan returns, for papers and news alike.
pub const MAX_RESULTS: usize = 5;

/// Length of the timestamp prefix shown next to a news headline.
const PUBLISHED_LABEL_CHARS: usize = 16;

/// One search hit from the paper-metadata provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    /// Link to the PDF; doubles as the paper's identity.
    pub link: String,
    /// Abstract.
    pub summary: String,
    pub date: NaiveDate,
}

/// One item from the news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEntry {
    pub title: String,
    pub link: String,
    /// Publication time exactly as the feed wrote it, original offset included.
    pub published: Option<String>,
    /// Summary or description, whichever the feed filled in first.
    pub summary: String,
}

impl NewsEntry {
    /// Short timestamp shown in front of the title, e.g. `Fri, 17 Oct 2025`.
    pub fn published_label(&self) -> String {
        self.published
            .as_deref()
            .map(|p| p.trim().chars().take(PUBLISHED_LABEL_CHARS).collect())
            .unwrap_or_default()
    }

    /// Text handed to the summarizer: the headline followed by its summary.
    pub fn summary_input(&self) -> String {
        format!("{}\n{}", self.title, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(published: Option<&str>) -> NewsEntry {
        NewsEntry {
            title: "Robots learn to fold laundry".to_string(),
            link: "https://example.com/robots".to_string(),
            published: published.map(str::to_string),
            summary: "A new policy model.".to_string(),
        }
    }

    #[test]
    fn test_published_label_uses_first_sixteen_chars() {
        assert_eq!(entry(Some("Fri, 17 Oct 2025 18:30:00 +0000")).published_label(), "Fri, 17 Oct 2025");
    }

    #[test]
    fn test_published_label_keeps_feed_offset() {
        let late_pacific = entry(Some("Fri, 17 Oct 2025 23:30:00 -0700"));
        assert_eq!(late_pacific.published_label(), "Fri, 17 Oct 2025");

        let atom = entry(Some("2025-10-17T23:30:00-07:00"));
        assert_eq!(atom.published_label(), "2025-10-17T23:30");
    }

    #[test]
    fn test_published_label_empty_without_date() {
        assert_eq!(entry(None).published_label(), "");
    }

    #[test]
    fn test_summary_input_joins_title_and_summary() {
        assert_eq!(
            entry(None).summary_input(),
            "Robots learn to fold laundry\nA new policy model."
        );
    }
}
