//! Pipeline entry points for feedpage operations.
//!
//! - `run_generate`: Fetch all sources and write the static page
//! - `run_check`: Report which sources load
//! - `run_discover`: Find the feed URL of a website
//! - `run_search`: Filter generated articles the way the page does
//! - `run_validate`: Check configuration, sources and template

pub mod check;
#[cfg(feature = "discover")]
pub mod discover;
pub mod generate;
pub mod search;
pub mod validate;

pub use check::run_check;
#[cfg(feature = "discover")]
pub use discover::run_discover;
pub use generate::{GenerateSummary, run_generate};
pub use search::run_search;
pub use validate::run_validate;

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use crate::error::{AppError, Result};
    use crate::models::{FeedItem, FeedSource};
    use crate::services::FeedFetcher;

    /// Fetcher serving canned items by URL; unknown URLs fail.
    #[derive(Default)]
    pub struct StaticFetcher {
        pub feeds: HashMap<String, Vec<FeedItem>>,
    }

    impl StaticFetcher {
        pub fn with_feed(mut self, url: &str, items: Vec<FeedItem>) -> Self {
            self.feeds.insert(url.to_string(), items);
            self
        }
    }

    #[async_trait]
    impl FeedFetcher for StaticFetcher {
        async fn fetch(&self, source: &FeedSource) -> Result<Vec<FeedItem>> {
            self.feeds
                .get(&source.url)
                .cloned()
                .ok_or_else(|| AppError::source_fetch(&source.name, "connection refused"))
        }
    }

    pub fn item(title: &str, link: &str) -> FeedItem {
        FeedItem::new()
            .with("title", Some(title))
            .with("link", Some(link))
            .with("description", Some(format!("About {title}")))
    }
}
