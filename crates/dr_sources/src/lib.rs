pub mod arxiv;
pub mod logging;
pub mod rss;
mod utils;

/// Local HTTP fixtures shared by the workspace's tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use arxiv::{build_search_query, ArxivClient};
pub use rss::FeedClient;

pub mod prelude {
    pub use super::{ArxivClient, FeedClient};
    pub use dr_core::{NewsEntry, NewsFeed, Paper, PaperSearch, Result, Error};
}
