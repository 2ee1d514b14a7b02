// src/pipeline/discover.rs

//! Feed URL discovery for a website.

use reqwest::Client;

use crate::error::Result;
use crate::services::FeedDiscoveryService;

/// Find the RSS or Atom feed of `site_url`.
pub async fn run_discover(client: &Client, site_url: &str) -> Result<Option<String>> {
    log::info!("Discovering feed for {}", site_url);

    let found = FeedDiscoveryService::new(client).discover(site_url).await?;
    match &found {
        Some(feed_url) => log::info!("Feed found: {}", feed_url),
        None => log::warn!("No feed found for {}", site_url),
    }
    Ok(found)
}
