//! Output persistence for generated pages.
//!
//! ## Directory Structure
//!
//! ```text
//! {output_dir}/
//! ├── index.html      # Rendered page
//! └── articles.json   # Records for runtime rendering and search
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FeedRecord;

pub use local::LocalStorage;

/// Key of the rendered page.
pub const PAGE_KEY: &str = "index.html";

/// Key of the record data file.
pub const ARTICLES_KEY: &str = "articles.json";

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of records written to the data file
    pub article_count: usize,
    /// Size of the rendered page in bytes
    pub page_bytes: usize,
}

/// Trait for page output backends.
#[async_trait]
pub trait PageStorage: Send + Sync {
    /// Write the rendered page and the records it was built from.
    ///
    /// Both files are staged before either is renamed into place; the page
    /// is renamed first, and a failure there leaves both files untouched.
    async fn write_output(&self, html: &str, records: &[FeedRecord]) -> Result<WriteMetadata>;

    /// Load records from the data file.
    async fn load_articles(&self) -> Result<Vec<FeedRecord>>;
}
