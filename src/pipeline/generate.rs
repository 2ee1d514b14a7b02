// src/pipeline/generate.rs

//! Build-time page generation.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, FeedSource};
use crate::render::{PageRenderer, RenderContext};
use crate::services::{FeedAggregator, FeedFetcher};
use crate::storage::PageStorage;

/// Outcome of a generate run.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub source_total: usize,
    pub failed_sources: usize,
    pub article_count: usize,
    pub dropped_items: usize,
}

/// Fetch every source, render the page and persist it.
///
/// Unreachable sources are skipped; a template error aborts the run before
/// anything is written.
pub async fn run_generate(
    config: &Config,
    sources: &[FeedSource],
    fetcher: &dyn FeedFetcher,
    storage: &dyn PageStorage,
) -> Result<GenerateSummary> {
    let started_at = Utc::now();
    log::info!("Generating page from {} source(s)", sources.len());

    let renderer = PageRenderer::new(&config.render)?;

    let aggregator = FeedAggregator::new(fetcher, &config.aggregate)
        .with_request_delay(std::time::Duration::from_millis(
            config.fetch.request_delay_ms,
        ));
    let aggregation = aggregator.aggregate(sources).await;

    for failure in &aggregation.failures {
        log::debug!("Skipped {} ({})", failure.source_name, failure.url);
    }

    let succeeded = aggregation.succeeded_sources();
    let summary = GenerateSummary {
        source_total: aggregation.source_total,
        failed_sources: aggregation.failures.len(),
        article_count: aggregation.records.len(),
        dropped_items: aggregation.dropped_items,
    };

    let ctx = RenderContext::new(aggregation.records, &config.render.page_title);
    let html = renderer.render(&ctx)?;
    let meta = storage.write_output(&html, &ctx.articles).await?;
    log::debug!(
        "Wrote {} byte page with {} record(s)",
        meta.page_bytes,
        meta.article_count
    );

    log::info!(
        "Generated {} article(s) from {}/{} source(s) in {}ms",
        summary.article_count,
        succeeded,
        summary.source_total,
        (Utc::now() - started_at).num_milliseconds()
    );
    if summary.dropped_items > 0 {
        log::info!(
            "Dropped {} item(s) without title or link",
            summary.dropped_items
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::pipeline::testing::{StaticFetcher, item};
    use crate::storage::{LocalStorage, PAGE_KEY};
    use scraper::{Html, Selector};
    use tempfile::TempDir;

    fn sources() -> Vec<FeedSource> {
        vec![
            FeedSource::new("Osage News", "https://osagenews.org/feed/"),
            FeedSource::new("Empty", "https://empty.example/feed"),
            FeedSource::new("Down", "https://down.example/feed"),
        ]
    }

    fn fetcher() -> StaticFetcher {
        StaticFetcher::default()
            .with_feed(
                "https://osagenews.org/feed/",
                vec![
                    item("Council Meeting", "https://osagenews.org/1"),
                    item("Language Camp", "https://osagenews.org/2"),
                ],
            )
            .with_feed("https://empty.example/feed", Vec::new())
    }

    #[tokio::test]
    async fn test_generate_writes_page_and_articles() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("media"));

        let summary = run_generate(&Config::default(), &sources(), &fetcher(), &storage)
            .await
            .unwrap();

        assert_eq!(summary.source_total, 3);
        assert_eq!(summary.failed_sources, 1);
        assert_eq!(summary.article_count, 2);
        assert_eq!(summary.dropped_items, 0);

        let html = std::fs::read_to_string(storage.path(PAGE_KEY)).unwrap();
        let doc = Html::parse_document(&html);
        let hrefs: Vec<_> = doc
            .select(&Selector::parse("li.article h2 a").unwrap())
            .filter_map(|a| a.value().attr("href"))
            .collect();
        assert_eq!(hrefs, vec!["https://osagenews.org/1", "https://osagenews.org/2"]);

        let articles = storage.load_articles().await.unwrap();
        assert!(articles.iter().all(|r| r.source_name == "Osage News"));
    }

    #[tokio::test]
    async fn test_template_error_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("broken.html");
        std::fs::write(&template, "{% for a in articles %}").unwrap();

        let mut config = Config::default();
        config.render.template_path = Some(template.display().to_string());
        let storage = LocalStorage::new(tmp.path().join("media"));

        let err = run_generate(&config, &sources(), &fetcher(), &storage)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
        assert!(!storage.path(PAGE_KEY).exists());
    }
}
