//! Normalized feed record.

use serde::{Deserialize, Serialize};

/// Link substituted for items that carry none.
pub const PLACEHOLDER_LINK: &str = "#";

/// Title substituted for items that carry none.
pub const PLACEHOLDER_TITLE: &str = "No Title";

/// A validated article entry derived from one feed item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedRecord {
    /// Article title
    pub title: String,

    /// Article URL, or [`PLACEHOLDER_LINK`]
    pub link: String,

    /// Publication date (empty if the feed has none)
    #[serde(default, rename = "published")]
    pub published_at: String,

    /// Plain-text summary (empty if the feed has none)
    #[serde(default)]
    pub summary: String,

    /// Name of the owning feed source
    #[serde(rename = "source")]
    pub source_name: String,

    /// Display label of the owning feed source
    #[serde(default, rename = "label", alias = "tribe")]
    pub source_label: String,
}

impl FeedRecord {
    /// Text the search filter matches against: title, summary and label.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.label())
    }

    /// Source label, falling back to the source name.
    pub fn label(&self) -> &str {
        if self.source_label.is_empty() {
            &self.source_name
        } else {
            &self.source_label
        }
    }

    /// Format record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{title}`, `{link}`, `{published}`, `{summary}`, `{source}`, `{label}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{title}", &self.title)
            .replace("{link}", &self.link)
            .replace("{published}", &self.published_at)
            .replace("{summary}", &self.summary)
            .replace("{source}", &self.source_name)
            .replace("{label}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FeedRecord {
        FeedRecord {
            title: "Tribal College Expands".to_string(),
            link: "https://ictnews.org/news/1".to_string(),
            published_at: "2025-06-01 12:00:00".to_string(),
            summary: "New campus opens this fall.".to_string(),
            source_name: "ICT News".to_string(),
            source_label: "National".to_string(),
        }
    }

    #[test]
    fn test_format() {
        let record = sample_record();
        assert_eq!(
            record.format("[{label}] {title} <{link}>"),
            "[National] Tribal College Expands <https://ictnews.org/news/1>"
        );
    }

    #[test]
    fn test_searchable_text_includes_label() {
        let text = sample_record().searchable_text();
        assert!(text.contains("Tribal College"));
        assert!(text.contains("campus opens"));
        assert!(text.contains("National"));
        assert!(!text.contains("2025"));
    }

    #[test]
    fn test_deserialize_reference_data_shape() {
        let json = r#"{
            "title": "Powwow season",
            "link": "https://example.org/p",
            "published": "",
            "summary": "",
            "source": "Powwows.com",
            "tribe": "Intertribal"
        }"#;
        let record: FeedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.label(), "Intertribal");
        assert_eq!(record.link, "https://example.org/p");
    }
}
