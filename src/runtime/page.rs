//! A mounted article list with its search box.

use crate::models::FeedRecord;
use crate::runtime::dom::{Dom, NodeId};
use crate::runtime::filter::{FilterOutcome, SearchFilter};
use crate::runtime::renderer::DomRenderer;

/// How the page renders and filters.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    pub escape_output: bool,
    /// Re-render from records on every query instead of toggling visibility
    pub data_driven: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            escape_output: true,
            data_driven: false,
        }
    }
}

/// Search input plus article container, rendered from a record list.
#[derive(Debug, Clone)]
pub struct Page {
    input: NodeId,
    container: NodeId,
    records: Vec<FeedRecord>,
    filter: SearchFilter,
}

impl Page {
    /// Create the search input and container under `root` and render `records`.
    pub fn mount(
        dom: &mut dyn Dom,
        root: NodeId,
        records: Vec<FeedRecord>,
        options: PageOptions,
    ) -> Self {
        let input = dom.create_element("input");
        dom.set_attribute(input, "type", "text");
        dom.set_attribute(input, "id", "search");
        dom.set_attribute(input, "placeholder", "Search articles...");
        dom.append_child(root, input);

        let container = dom.create_element("div");
        dom.set_attribute(container, "id", "articles");
        dom.append_child(root, container);

        let renderer = DomRenderer::new(options.escape_output);
        renderer.render(dom, container, &records);

        let filter = if options.data_driven {
            SearchFilter::data(input, container, records.clone(), renderer)
        } else {
            SearchFilter::view(input, container)
        };

        log::debug!(
            "Mounted {} article(s), {} filter",
            records.len(),
            if options.data_driven { "data-driven" } else { "view" }
        );

        Self {
            input,
            container,
            records,
            filter,
        }
    }

    /// Simulate typing: set the input value and fire the input handler.
    pub fn input(&self, dom: &mut dyn Dom, text: &str) -> FilterOutcome {
        dom.set_value(self.input, text);
        self.filter.handle_input(dom)
    }

    /// Records whose article nodes are currently visible.
    ///
    /// View mode maps visible nodes back to records by position; data mode
    /// re-renders, so visible nodes are the current query's matches.
    pub fn visible_records(&self, dom: &dyn Dom) -> Vec<&FeedRecord> {
        let nodes = dom.children(self.container);
        if nodes.len() == self.records.len() {
            nodes
                .iter()
                .zip(&self.records)
                .filter(|(node, _)| !dom.is_hidden(**node))
                .map(|(_, record)| record)
                .collect()
        } else {
            let query = dom.value(self.input);
            crate::runtime::filter::filter_records(&query, &self.records)
        }
    }
}
