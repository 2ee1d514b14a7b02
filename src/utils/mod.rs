//! Utility functions and helpers.

pub mod http;
pub mod text;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "feed.xml"),
            "https://example.com/path/feed.xml"
        );
        assert_eq!(resolve_url(&base, "/rss/"), "https://example.com/rss/");
        assert_eq!(
            resolve_url(&base, "https://other.com/feed"),
            "https://other.com/feed"
        );
    }
}
