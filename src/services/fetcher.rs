//! Feed fetching.
//!
//! [`FeedFetcher`] is the seam between the aggregator and the network:
//! given a source it yields the parsed items of its feed document.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{FeedItem, FeedSource, FetchConfig};
use crate::services::parser::parse_feed;
use crate::utils::http::{create_async_client, fetch_bytes};

/// Retrieves and parses a single feed.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the source's feed and return its items in document order.
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<FeedItem>>;
}

/// Fetcher backed by an HTTP client and the RSS/Atom parser.
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a fetcher with a client configured from `config`.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<FeedItem>> {
        log::debug!("Fetching {} ({})", source.name, source.url);
        let body = fetch_bytes(&self.client, &source.url).await?;
        parse_feed(&body)
    }
}
