// src/pipeline/search.rs

//! Runtime search over generated articles.

use crate::error::Result;
use crate::models::{FeedRecord, RenderConfig};
use crate::runtime::{MemoryDom, Page, PageOptions};
use crate::storage::PageStorage;

/// Mount the generated articles in an in-memory document, type `query`
/// into its search box and return the records left visible.
pub async fn run_search(
    storage: &dyn PageStorage,
    render: &RenderConfig,
    query: &str,
    data_driven: bool,
) -> Result<Vec<FeedRecord>> {
    let records = storage.load_articles().await?;
    log::debug!("Loaded {} article(s)", records.len());

    let mut dom = MemoryDom::new();
    let body = dom.body();
    let options = PageOptions {
        escape_output: render.escape_output,
        data_driven,
    };
    let page = Page::mount(&mut dom, body, records, options);

    let outcome = page.input(&mut dom, query);
    log::info!(
        "{} of {} article(s) match '{}'",
        outcome.visible,
        outcome.total,
        query
    );

    Ok(page.visible_records(&dom).into_iter().cloned().collect())
}
