// src/pipeline/check.rs

//! Feed health check.

use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, FeedSource};
use crate::services::{FeedAggregator, FeedFetcher, HealthReport, SourceHealth};

/// Probe every source and log which ones load.
///
/// Returns the per-source reports; failing sources are reported, not errors.
pub async fn run_check(
    config: &Config,
    sources: &[FeedSource],
    fetcher: &dyn FeedFetcher,
) -> Result<Vec<HealthReport>> {
    log::info!("Checking {} source(s)", sources.len());

    let aggregator = FeedAggregator::new(fetcher, &config.aggregate)
        .with_request_delay(Duration::from_millis(config.fetch.request_delay_ms));
    let reports = aggregator.check(sources).await;

    let mut failed = 0;
    for report in &reports {
        match &report.health {
            SourceHealth::Ok { items } => {
                log::info!("OK {} ({} item(s))", report.source.name, items);
            }
            SourceHealth::Failed { message } => {
                failed += 1;
                log::error!("FAILED {} ({}): {}", report.source.name, report.source.url, message);
            }
        }
    }

    log::info!(
        "{}/{} source(s) healthy",
        reports.len() - failed,
        reports.len()
    );
    Ok(reports)
}
