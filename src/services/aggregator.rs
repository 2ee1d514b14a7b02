// src/services/aggregator.rs

//! Feed aggregation service.
//!
//! Fetches every configured source one at a time, maps feed items onto
//! [`FeedRecord`]s and concatenates them in configuration order. A source
//! that fails to load is logged and skipped; it never aborts the run.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::error::AppError;
use crate::models::{
    AggregateConfig, FeedItem, FeedRecord, FeedSource, MissingFieldPolicy, PLACEHOLDER_LINK,
    PLACEHOLDER_TITLE,
};
use crate::services::FeedFetcher;
use crate::utils::text::{self, DATE_FORMAT};

/// A source that contributed nothing because it could not be loaded.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub source_name: String,
    pub url: String,
    pub message: String,
}

/// Summary of an aggregation run.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Retained records, in source order then feed order
    pub records: Vec<FeedRecord>,
    /// Number of sources attempted
    pub source_total: usize,
    /// Sources that failed to fetch or parse
    pub failures: Vec<SourceFailure>,
    /// Items excluded for lacking a title or link
    pub dropped_items: usize,
}

impl Aggregation {
    pub fn succeeded_sources(&self) -> usize {
        self.source_total - self.failures.len()
    }
}

/// Result of probing one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceHealth {
    Ok { items: usize },
    Failed { message: String },
}

/// Health of a single configured source.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub source: FeedSource,
    pub health: SourceHealth,
}

/// Service producing one ordered record sequence from many feeds.
pub struct FeedAggregator<'a> {
    fetcher: &'a dyn FeedFetcher,
    config: AggregateConfig,
    request_delay: Duration,
}

impl<'a> FeedAggregator<'a> {
    /// Create a new aggregator over the given fetcher.
    pub fn new(fetcher: &'a dyn FeedFetcher, config: &AggregateConfig) -> Self {
        Self {
            fetcher,
            config: config.clone(),
            request_delay: Duration::ZERO,
        }
    }

    /// Pause between consecutive sources.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Fetch all sources sequentially and collect their records.
    pub async fn aggregate(&self, sources: &[FeedSource]) -> Aggregation {
        let mut outcome = Aggregation {
            source_total: sources.len(),
            ..Aggregation::default()
        };

        for (i, source) in sources.iter().enumerate() {
            if i > 0 {
                self.pause().await;
            }

            let items = match self.fetcher.fetch(source).await {
                Ok(items) => items,
                Err(error) => {
                    let error = AppError::source_fetch(&source.name, error);
                    log::warn!("{} ({})", error, source.url);
                    outcome.failures.push(SourceFailure {
                        source_name: source.name.clone(),
                        url: source.url.clone(),
                        message: error.to_string(),
                    });
                    continue;
                }
            };

            let limit = self.item_limit(source);
            let before = outcome.records.len();
            for item in items.iter().take(limit) {
                match self.to_record(item, source) {
                    Some(record) => outcome.records.push(record),
                    None => outcome.dropped_items += 1,
                }
            }

            log::info!(
                "{}: {} record(s)",
                source.name,
                outcome.records.len() - before
            );
        }

        if self.config.sort_newest_first {
            sort_newest_first(&mut outcome.records);
        }

        outcome
    }

    /// Probe every source sequentially, reporting item counts or errors.
    pub async fn check(&self, sources: &[FeedSource]) -> Vec<HealthReport> {
        let mut reports = Vec::with_capacity(sources.len());

        for (i, source) in sources.iter().enumerate() {
            if i > 0 {
                self.pause().await;
            }

            let health = match self.fetcher.fetch(source).await {
                Ok(items) => SourceHealth::Ok { items: items.len() },
                Err(error) => SourceHealth::Failed {
                    message: error.to_string(),
                },
            };
            reports.push(HealthReport {
                source: source.clone(),
                health,
            });
        }

        reports
    }

    /// Map one feed item onto a record, or `None` if it must be dropped.
    pub fn to_record(&self, item: &FeedItem, source: &FeedSource) -> Option<FeedRecord> {
        let names = &self.config.field_names;

        let title = item
            .first_of(&names.title)
            .map(text::normalize_whitespace)
            .filter(|t| !t.is_empty());
        let link = item
            .first_of(&names.link)
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let (title, link) = match (self.config.missing_field, title, link) {
            (_, Some(title), Some(link)) => (title, link),
            (MissingFieldPolicy::Drop, _, _) => return None,
            (MissingFieldPolicy::Placeholder, title, link) => (
                title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
                link.unwrap_or_else(|| PLACEHOLDER_LINK.to_string()),
            ),
        };

        let published_at = item
            .first_of(&names.published)
            .map(text::normalize_date)
            .unwrap_or_default();
        let summary = item
            .first_of(&names.summary)
            .map(|s| text::truncate(&text::strip_html(s), self.config.summary_max_chars))
            .unwrap_or_default();

        Some(FeedRecord {
            title,
            link,
            published_at,
            summary,
            source_name: source.name.clone(),
            source_label: source.label().to_string(),
        })
    }

    fn item_limit(&self, source: &FeedSource) -> usize {
        source
            .item_limit
            .or(self.config.item_limit)
            .unwrap_or(usize::MAX)
    }

    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}

/// Stable sort, newest first; records without a parseable date go last.
fn sort_newest_first(records: &mut [FeedRecord]) {
    records.sort_by_cached_key(|r| {
        std::cmp::Reverse(NaiveDateTime::parse_from_str(&r.published_at, DATE_FORMAT).ok())
    });
}
