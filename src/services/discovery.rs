//! Feed discovery service.
//!
//! Finds the RSS/Atom feed of a website, first through the page's
//! `<link rel="alternate">` declarations, then by probing common feed paths.

use futures::future;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::services::parser::parse_feed;
use crate::utils::{
    http::{fetch_bytes, fetch_page_async},
    resolve_url,
};

/// Paths probed when the page declares no feed.
const CANDIDATE_PATHS: &[&str] = &[
    "/feed/",
    "/rss/",
    "/rss.xml",
    "/feed/rss/",
    "/atom.xml",
    "/blog/feed/",
    "/news/feed/",
];

/// Media types accepted on `<link rel="alternate">`.
const FEED_TYPES: &[&str] = &["application/rss+xml", "application/atom+xml"];

/// Service for locating the feed URL of a website.
pub struct FeedDiscoveryService<'a> {
    client: &'a Client,
    candidate_paths: Vec<String>,
}

impl<'a> FeedDiscoveryService<'a> {
    /// Create a new discovery service using the default candidate paths.
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            candidate_paths: CANDIDATE_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Discover the feed URL for a site, or `None` if nothing was found.
    pub async fn discover(&self, site_url: &str) -> Result<Option<String>> {
        let base = Url::parse(site_url)
            .map_err(|e| AppError::discovery(format!("invalid site URL '{site_url}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::discovery(format!(
                "site URL must use http or https: {site_url}"
            )));
        }

        match fetch_page_async(self.client, base.as_str()).await {
            Ok(document) => {
                if let Some(feed_url) = find_alternate_link(&document, &base) {
                    log::debug!("Found declared feed: {}", feed_url);
                    return Ok(Some(feed_url));
                }
            }
            Err(e) => log::debug!("Could not load {}: {}", base, e),
        }

        let candidates = candidate_urls(&base, &self.candidate_paths);
        let probes = candidates.iter().map(|url| self.probe(url));
        let results = future::join_all(probes).await;

        Ok(candidates
            .into_iter()
            .zip(results)
            .find_map(|(url, ok)| ok.then_some(url)))
    }

    /// A candidate counts if it parses as a feed with at least one item.
    async fn probe(&self, url: &str) -> bool {
        match fetch_bytes(self.client, url).await {
            Ok(body) => parse_feed(&body).is_ok_and(|items| !items.is_empty()),
            Err(e) => {
                log::debug!("Probe failed for {}: {}", url, e);
                false
            }
        }
    }
}

/// Find the first declared RSS/Atom `<link rel="alternate">`, resolved
/// against `base`.
pub fn find_alternate_link(document: &Html, base: &Url) -> Option<String> {
    let selector = Selector::parse(r#"link[rel~="alternate"][href]"#).ok()?;

    document.select(&selector).find_map(|element| {
        let kind = element.value().attr("type")?.trim().to_ascii_lowercase();
        if !FEED_TYPES.contains(&kind.as_str()) {
            return None;
        }
        let href = element.value().attr("href")?.trim();
        (!href.is_empty()).then(|| resolve_url(base, href))
    })
}

fn candidate_urls(base: &Url, paths: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    paths
        .iter()
        .map(|path| resolve_url(base, path))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_alternate_link_resolves_relative_href() {
        let html = Html::parse_document(
            r#"<html><head>
                <link rel="stylesheet" href="/style.css">
                <link rel="alternate" type="text/html" href="/en/">
                <link rel="alternate" type="application/rss+xml" title="News" href="/news/feed/">
            </head><body></body></html>"#,
        );
        let base = Url::parse("https://www.meskwaki.org/about/").unwrap();
        assert_eq!(
            find_alternate_link(&html, &base),
            Some("https://www.meskwaki.org/news/feed/".to_string())
        );
    }

    #[test]
    fn test_find_alternate_link_accepts_atom() {
        let html = Html::parse_document(
            r#"<head><link rel="alternate" type="Application/Atom+XML" href="https://a.org/atom.xml"></head>"#,
        );
        let base = Url::parse("https://a.org/").unwrap();
        assert_eq!(
            find_alternate_link(&html, &base),
            Some("https://a.org/atom.xml".to_string())
        );
    }

    #[test]
    fn test_find_alternate_link_none() {
        let html = Html::parse_document("<html><head></head><body><a href='/feed/'>RSS</a></body></html>");
        let base = Url::parse("https://a.org/").unwrap();
        assert_eq!(find_alternate_link(&html, &base), None);
    }

    #[test]
    fn test_candidate_urls_are_rooted_and_unique() {
        let base = Url::parse("https://www.yakama.com/news/page").unwrap();
        let paths = vec!["/feed/".to_string(), "/rss.xml".to_string(), "/feed/".to_string()];
        assert_eq!(
            candidate_urls(&base, &paths),
            vec![
                "https://www.yakama.com/feed/".to_string(),
                "https://www.yakama.com/rss.xml".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_rejects_invalid_url() {
        let client = Client::new();
        let service = FeedDiscoveryService::new(&client);
        assert!(matches!(
            service.discover("not a url").await,
            Err(AppError::Discovery(_))
        ));
        assert!(matches!(
            service.discover("ftp://a.org").await,
            Err(AppError::Discovery(_))
        ));
    }
}
