//! Runtime rendering of records into a live document.

use crate::models::FeedRecord;
use crate::runtime::dom::{Dom, NodeId};

/// Attribute carrying the lower-cased searchable text of an article node.
pub const SEARCH_ATTR: &str = "data-search";

/// Appends one `<article>` element per record to a container.
#[derive(Debug, Clone, Copy)]
pub struct DomRenderer {
    escape_output: bool,
}

impl Default for DomRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DomRenderer {
    /// With `escape_output` feed text goes through text nodes; without it
    /// the article body is assigned as raw markup.
    pub fn new(escape_output: bool) -> Self {
        Self { escape_output }
    }

    /// Append records to `container` in order, returning the new nodes.
    pub fn render(
        &self,
        dom: &mut dyn Dom,
        container: NodeId,
        records: &[FeedRecord],
    ) -> Vec<NodeId> {
        records
            .iter()
            .map(|record| {
                let node = self.render_record(dom, record);
                dom.append_child(container, node);
                node
            })
            .collect()
    }

    /// Clear `container`, then render `records` into it.
    pub fn replace(
        &self,
        dom: &mut dyn Dom,
        container: NodeId,
        records: &[FeedRecord],
    ) -> Vec<NodeId> {
        dom.remove_children(container);
        self.render(dom, container, records)
    }

    fn render_record(&self, dom: &mut dyn Dom, record: &FeedRecord) -> NodeId {
        let article = dom.create_element("article");
        dom.set_attribute(article, "class", "article");
        dom.set_attribute(
            article,
            SEARCH_ATTR,
            &record.searchable_text().to_lowercase(),
        );

        if self.escape_output {
            self.build_nodes(dom, article, record);
        } else {
            dom.set_inner_html(article, &raw_markup(record));
        }
        article
    }

    fn build_nodes(&self, dom: &mut dyn Dom, article: NodeId, record: &FeedRecord) {
        let heading = dom.create_element("h2");
        let anchor = dom.create_element("a");
        dom.set_attribute(anchor, "href", &record.link);
        dom.set_attribute(anchor, "target", "_blank");
        dom.set_text(anchor, &record.title);
        dom.append_child(heading, anchor);
        dom.append_child(article, heading);

        let meta = dom.create_element("p");
        dom.set_attribute(meta, "class", "meta");
        if !record.published_at.is_empty() {
            let date = dom.create_element("span");
            dom.set_text(date, &format!("{} |", record.published_at));
            dom.append_child(meta, date);
        }
        let label = dom.create_element("strong");
        dom.set_text(label, record.label());
        dom.append_child(meta, label);
        dom.append_child(article, meta);

        let summary = dom.create_element("p");
        dom.set_text(summary, &record.summary);
        dom.append_child(article, summary);
    }
}

/// Unescaped article body, interpolating feed text directly.
fn raw_markup(record: &FeedRecord) -> String {
    format!(
        r#"<h2><a href="{}" target="_blank">{}</a></h2><p class="meta">{} | <strong>{}</strong></p><p>{}</p>"#,
        record.link,
        record.title,
        record.published_at,
        record.label(),
        record.summary
    )
}
