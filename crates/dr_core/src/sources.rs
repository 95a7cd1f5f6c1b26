use async_trait::async_trait;

use crate::types::{NewsEntry, Paper};
use crate::Result;

#[async_trait]
pub trait PaperSearch: Send + Sync {
    /// Name of the paper provider
    fn source(&self) -> &str;

    /// Most recently submitted papers whose title matches any keyword
    async fn search(&self, keywords: &[String]) -> Result<Vec<Paper>>;
}

#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Name of the news source
    fn source(&self) -> &str;

    /// Leading entries of the feed, in feed order
    async fn latest(&self) -> Result<Vec<NewsEntry>>;
}
