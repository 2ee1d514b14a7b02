//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::FeedSource;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP request settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Item selection and normalization rules
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Page rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Inline feed sources, used when the sources file does not exist
    #[serde(default = "defaults::sources")]
    pub sources: Vec<FeedSource>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Resolve the feed sources: the sources file if present, else inline sources.
    pub fn load_sources(&self, base_dir: &Path) -> Result<Vec<FeedSource>> {
        let path = base_dir.join(&self.paths.sources);
        if path.exists() {
            log::debug!("Loading sources from {}", path.display());
            FeedSource::load_all(&path)
        } else {
            log::debug!(
                "Sources file {} not found, using {} inline source(s)",
                path.display(),
                self.sources.len()
            );
            Ok(self.sources.clone())
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        for (name, value) in &self.fetch.headers {
            if name.trim().is_empty() || value.contains('\n') {
                return Err(AppError::validation(format!(
                    "fetch.headers has an invalid entry '{name}'"
                )));
            }
        }
        if self.aggregate.item_limit == Some(0) {
            return Err(AppError::validation("aggregate.item_limit must be > 0"));
        }
        self.aggregate.field_names.validate()?;
        if self.render.page_title.trim().is_empty() {
            return Err(AppError::validation("render.page_title is empty"));
        }
        if self.paths.output_dir.trim().is_empty() {
            return Err(AppError::validation("paths.output_dir is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            aggregate: AggregateConfig::default(),
            render: RenderConfig::default(),
            paths: PathsConfig::default(),
            sources: defaults::sources(),
        }
    }
}

/// HTTP request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for feed requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header; some publishers answer 406 without one
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause between consecutive sources in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,

    /// Extra request headers sent with every feed request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: 0,
            headers: BTreeMap::new(),
        }
    }
}

/// What to do with items that lack a title or a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Exclude the item
    #[default]
    Drop,
    /// Keep the item with placeholder title/link
    Placeholder,
}

/// Item selection and normalization rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Default per-source item cap (unlimited when unset)
    #[serde(default)]
    pub item_limit: Option<usize>,

    /// Summary length cap in characters (0 disables truncation)
    #[serde(default = "defaults::summary_max_chars")]
    pub summary_max_chars: usize,

    /// Policy for items lacking title or link
    #[serde(default)]
    pub missing_field: MissingFieldPolicy,

    /// Sort the combined records newest first instead of keeping feed order
    #[serde(default)]
    pub sort_newest_first: bool,

    /// Item fields mapped onto record fields
    #[serde(default)]
    pub field_names: FieldNames,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            item_limit: None,
            summary_max_chars: defaults::summary_max_chars(),
            missing_field: MissingFieldPolicy::default(),
            sort_newest_first: false,
            field_names: FieldNames::default(),
        }
    }
}

/// Candidate item field names per record field, tried in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldNames {
    #[serde(default = "defaults::title_fields")]
    pub title: Vec<String>,

    #[serde(default = "defaults::link_fields")]
    pub link: Vec<String>,

    #[serde(default = "defaults::published_fields")]
    pub published: Vec<String>,

    #[serde(default = "defaults::summary_fields")]
    pub summary: Vec<String>,
}

impl FieldNames {
    fn validate(&self) -> Result<()> {
        for (key, names) in [("title", &self.title), ("link", &self.link)] {
            if names.iter().all(|n| n.trim().is_empty()) {
                return Err(AppError::validation(format!(
                    "aggregate.field_names.{key} has no field names"
                )));
            }
        }
        Ok(())
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            title: defaults::title_fields(),
            link: defaults::link_fields(),
            published: defaults::published_fields(),
            summary: defaults::summary_fields(),
        }
    }
}

/// Page rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Heading and `<title>` of the generated page
    #[serde(default = "defaults::page_title")]
    pub page_title: String,

    /// HTML-escape feed text before interpolation
    #[serde(default = "defaults::escape_output")]
    pub escape_output: bool,

    /// Custom page template (built-in template when unset)
    #[serde(default)]
    pub template_path: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_title: defaults::page_title(),
            escape_output: defaults::escape_output(),
            template_path: None,
        }
    }
}

/// Input and output locations, relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Sources file (`.toml` with `[[sources]]` or `.json` array)
    #[serde(default = "defaults::sources_path")]
    pub sources: String,

    /// Directory receiving `index.html` and `articles.json`
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: defaults::sources_path(),
            output_dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    use super::FeedSource;

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; feedpage/0.1)".into()
    }
    pub fn accept() -> String {
        "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Aggregate defaults
    pub fn summary_max_chars() -> usize {
        500
    }
    pub fn title_fields() -> Vec<String> {
        vec!["title".into()]
    }
    pub fn link_fields() -> Vec<String> {
        vec!["link".into()]
    }
    pub fn published_fields() -> Vec<String> {
        vec![
            "published".into(),
            "pubDate".into(),
            "updated".into(),
            "dc:date".into(),
        ]
    }
    pub fn summary_fields() -> Vec<String> {
        vec!["summary".into(), "description".into(), "content".into()]
    }

    // Render defaults
    pub fn page_title() -> String {
        "Native News Feed".into()
    }
    pub fn escape_output() -> bool {
        true
    }

    // Path defaults
    pub fn sources_path() -> String {
        "sources.toml".into()
    }
    pub fn output_dir() -> String {
        "media".into()
    }

    // Source defaults
    pub fn sources() -> Vec<FeedSource> {
        vec![
            FeedSource::new("Indian Country Today", "https://ictnews.org/feed"),
            FeedSource::new("National Native News", "https://www.nativenews.net/feed/"),
            FeedSource::new(
                "Native America Calling",
                "https://nativeamericacalling.com/feed/",
            ),
        ]
    }
}
