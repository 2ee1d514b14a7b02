// src/models/source.rs

//! Feed source configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A named RSS/Atom endpoint configured for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    /// Display name, copied into every record from this source
    pub name: String,

    /// Absolute feed URL
    #[serde(alias = "rss")]
    pub url: String,

    /// Per-source cap on items taken from the feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_limit: Option<usize>,

    /// Label shown next to each item and matched by the search filter
    /// (falls back to `name`)
    #[serde(default, alias = "tribe", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Wrapper for the TOML sources file layout (`[[sources]]`).
#[derive(Debug, Deserialize)]
struct SourcesFile {
    #[serde(default)]
    sources: Vec<FeedSource>,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            item_limit: None,
            label: None,
        }
    }

    /// Label used for display and search.
    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// Load sources from a JSON array or a TOML `[[sources]]` file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            let file: SourcesFile = toml::from_str(&content)?;
            Ok(file.sources)
        }
    }

    /// Check that the source has a name and an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation(format!(
                "source with url {} has an empty name",
                self.url
            )));
        }
        let url = url::Url::parse(&self.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "source '{}' must use http or https, got {}",
                self.name,
                url.scheme()
            )));
        }
        Ok(())
    }
}
