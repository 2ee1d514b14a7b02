//! Feed document parsing.
//!
//! Turns raw RSS 2.0 or Atom bytes into [`FeedItem`]s in document order.
//! RSS is tried first; documents RSS rejects are retried as Atom.

use atom_syndication::Feed;
use rss::Channel;

use crate::error::{AppError, Result};
use crate::models::FeedItem;

/// Parse an RSS or Atom document.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>> {
    match Channel::read_from(bytes) {
        Ok(channel) => Ok(channel.items().iter().map(rss_item).collect()),
        Err(rss_error) => match Feed::read_from(bytes) {
            Ok(feed) => Ok(feed.entries().iter().map(atom_entry).collect()),
            Err(atom_error) => Err(AppError::feed_parse(format!(
                "not RSS ({rss_error}) and not Atom ({atom_error})"
            ))),
        },
    }
}

fn rss_item(item: &rss::Item) -> FeedItem {
    let dc_date = item
        .dublin_core_ext()
        .and_then(|dc| dc.dates().first().cloned());

    FeedItem::new()
        .with("title", item.title())
        .with("link", item.link())
        .with("pubDate", item.pub_date())
        .with("dc:date", dc_date)
        .with("description", item.description())
        .with("content", item.content())
        .with("author", item.author())
        .with("guid", item.guid().map(|g| g.value()))
}

fn atom_entry(entry: &atom_syndication::Entry) -> FeedItem {
    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href());

    FeedItem::new()
        .with("title", Some(entry.title().value.as_str()))
        .with("link", link)
        .with("published", entry.published().map(|d| d.to_rfc3339()))
        .with("updated", Some(entry.updated().to_rfc3339()))
        .with("summary", entry.summary().map(|s| s.value.as_str()))
        .with("content", entry.content().and_then(|c| c.value()))
        .with("author", entry.authors().first().map(|p| p.name()))
        .with("id", Some(entry.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Osage News</title>
    <link>https://osagenews.org</link>
    <description>News</description>
    <item>
      <title>Election results</title>
      <link>https://osagenews.org/election</link>
      <pubDate>Mon, 02 Jun 2025 14:30:00 +0000</pubDate>
      <description>&lt;p&gt;The results are in.&lt;/p&gt;</description>
    </item>
    <item>
      <title>No link here</title>
      <dc:date>2025-06-01T08:00:00Z</dc:date>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Cultural Survival</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2025-06-03T18:30:02Z</updated>
  <entry>
    <title>Language revitalization</title>
    <link rel="enclosure" href="https://cs.org/audio.mp3"/>
    <link rel="alternate" href="https://cs.org/lang"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2025-06-03T18:30:02Z</updated>
    <summary>Elders teach.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_items_in_order() {
        let items = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get("title"), Some("Election results"));
        assert_eq!(items[0].get("link"), Some("https://osagenews.org/election"));
        assert_eq!(items[0].get("description"), Some("<p>The results are in.</p>"));
        assert_eq!(items[1].get("link"), None);
        assert_eq!(items[1].get("dc:date"), Some("2025-06-01T08:00:00Z"));
    }

    #[test]
    fn test_parse_atom_prefers_alternate_link() {
        let items = parse_feed(ATOM.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("link"), Some("https://cs.org/lang"));
        assert_eq!(items[0].get("summary"), Some("Elders teach."));
        assert!(items[0].get("updated").is_some());
    }

    #[test]
    fn test_parse_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description></channel></rss>"#;
        assert!(parse_feed(xml.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_fails() {
        let err = parse_feed(b"<html><body>Not Acceptable</body></html>").unwrap_err();
        assert!(matches!(err, AppError::FeedParse(_)));
    }
}
