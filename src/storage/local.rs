//! Local filesystem storage implementation.
//!
//! Every file is written to a temporary sibling first and renamed into place,
//! so a failed run never leaves a half-written page behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::FeedRecord;
use crate::storage::{ARTICLES_KEY, PAGE_KEY, PageStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes to a temporary sibling of `key`, returning its path.
    async fn stage(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(tmp)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PageStorage for LocalStorage {
    async fn write_output(&self, html: &str, records: &[FeedRecord]) -> Result<WriteMetadata> {
        let articles = serde_json::to_vec_pretty(records)?;
        let staged_articles = self.stage(ARTICLES_KEY, &articles).await?;
        let staged_page = match self.stage(PAGE_KEY, html.as_bytes()).await {
            Ok(tmp) => tmp,
            Err(e) => {
                let _ = tokio::fs::remove_file(&staged_articles).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&staged_page, self.path(PAGE_KEY)).await {
            let _ = tokio::fs::remove_file(&staged_page).await;
            let _ = tokio::fs::remove_file(&staged_articles).await;
            return Err(AppError::Io(e));
        }
        tokio::fs::rename(&staged_articles, self.path(ARTICLES_KEY)).await?;

        log::info!("Page written to {}", self.path(PAGE_KEY).display());
        log::info!(
            "{} record(s) written to {}",
            records.len(),
            self.path(ARTICLES_KEY).display()
        );

        Ok(WriteMetadata {
            article_count: records.len(),
            page_bytes: html.len(),
        })
    }

    async fn load_articles(&self) -> Result<Vec<FeedRecord>> {
        match self.read_json(ARTICLES_KEY).await? {
            Some(records) => Ok(records),
            None => {
                log::warn!("No {} found in {}", ARTICLES_KEY, self.root_dir.display());
                Ok(Vec::new())
            }
        }
    }
}
