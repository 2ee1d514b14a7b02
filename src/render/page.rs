//! Static page rendering.
//!
//! Renders a [`RenderContext`] into a complete HTML document through a
//! minijinja template. The built-in template lives in `page.html`; a custom
//! template can be supplied through `render.template_path`.

use std::fs;

use chrono::{DateTime, Utc};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use serde::Serialize;

use crate::error::Result;
use crate::models::{FeedRecord, RenderConfig};

const PAGE_TEMPLATE: &str = include_str!("page.html");
const TEMPLATE_NAME: &str = "page.html";

/// Data handed to the template for one page-generation pass.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub articles: Vec<FeedRecord>,
    pub title: String,
    pub generated_at: DateTime<Utc>,
}

impl RenderContext {
    pub fn new(articles: Vec<FeedRecord>, title: impl Into<String>) -> Self {
        Self {
            articles,
            title: title.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Per-article template view.
#[derive(Debug, Serialize)]
struct ArticleView<'a> {
    title: &'a str,
    link: &'a str,
    published: &'a str,
    summary: &'a str,
    source: &'a str,
    label: &'a str,
    search: String,
}

impl<'a> From<&'a FeedRecord> for ArticleView<'a> {
    fn from(record: &'a FeedRecord) -> Self {
        Self {
            title: &record.title,
            link: &record.link,
            published: &record.published_at,
            summary: &record.summary,
            source: &record.source_name,
            label: record.label(),
            search: record.searchable_text().to_lowercase(),
        }
    }
}

/// Template engine wrapper around minijinja.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Build a renderer from configuration, loading a custom template if set.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        let template = match &config.template_path {
            Some(path) => {
                log::debug!("Loading page template from {}", path);
                fs::read_to_string(path)?
            }
            None => PAGE_TEMPLATE.to_string(),
        };
        Self::with_template(template, config.escape_output)
    }

    /// Build a renderer from a template string.
    ///
    /// Fails if the template does not compile.
    pub fn with_template(template: impl Into<String>, escape_output: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_auto_escape_callback(move |_| {
            if escape_output {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env.add_template_owned(TEMPLATE_NAME, template.into())?;
        Ok(Self { env })
    }

    /// Render the page. Pure: no I/O.
    pub fn render(&self, ctx: &RenderContext) -> Result<String> {
        let articles: Vec<ArticleView<'_>> = ctx.articles.iter().map(ArticleView::from).collect();
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let rendered = template.render(context! {
            title => ctx.title,
            generated_at => ctx.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            articles => articles,
        })?;
        Ok(rendered)
    }
}
