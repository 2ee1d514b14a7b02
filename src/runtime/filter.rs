//! Client-side substring filter over rendered articles.
//!
//! The filter never fetches. The view-driven variant toggles visibility of
//! the nodes already mounted in the container; the data-driven variant
//! filters the original records and re-renders the container.

use crate::models::FeedRecord;
use crate::runtime::dom::{Dom, NodeId};
use crate::runtime::renderer::{DomRenderer, SEARCH_ATTR};

/// Visibility predicate shared by both filter variants.
///
/// An empty query matches everything; otherwise the lower-cased query must
/// be a substring of the lower-cased text.
pub fn matches(query: &str, searchable_text: &str) -> bool {
    query.is_empty() || searchable_text.to_lowercase().contains(&query.to_lowercase())
}

/// Records whose searchable text matches `query`, in original order.
pub fn filter_records<'a>(query: &str, records: &'a [FeedRecord]) -> Vec<&'a FeedRecord> {
    records
        .iter()
        .filter(|r| matches(query, &r.searchable_text()))
        .collect()
}

/// Result of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub query: String,
    pub visible: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
enum FilterMode {
    View,
    Data {
        records: Vec<FeedRecord>,
        renderer: DomRenderer,
    },
}

/// Filter bound to an input element and an article container.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    input: NodeId,
    container: NodeId,
    mode: FilterMode,
}

impl SearchFilter {
    /// Filter the container's mounted nodes in place.
    pub fn view(input: NodeId, container: NodeId) -> Self {
        Self {
            input,
            container,
            mode: FilterMode::View,
        }
    }

    /// Filter `records` and re-render the container on every pass.
    pub fn data(
        input: NodeId,
        container: NodeId,
        records: Vec<FeedRecord>,
        renderer: DomRenderer,
    ) -> Self {
        Self {
            input,
            container,
            mode: FilterMode::Data { records, renderer },
        }
    }

    /// Input-event handler: filter by the input element's current value.
    pub fn handle_input(&self, dom: &mut dyn Dom) -> FilterOutcome {
        let query = dom.value(self.input);
        self.apply(dom, &query)
    }

    /// Run one filter pass for `query`.
    pub fn apply(&self, dom: &mut dyn Dom, query: &str) -> FilterOutcome {
        let query = query.to_lowercase();

        let (visible, total) = match &self.mode {
            FilterMode::View => {
                let nodes = dom.children(self.container);
                let mut visible = 0;
                for &node in &nodes {
                    let text = dom
                        .attribute(node, SEARCH_ATTR)
                        .unwrap_or_else(|| dom.text_content(node));
                    let show = matches(&query, &text);
                    dom.set_hidden(node, !show);
                    visible += usize::from(show);
                }
                (visible, nodes.len())
            }
            FilterMode::Data { records, renderer } => {
                let kept: Vec<FeedRecord> = filter_records(&query, records)
                    .into_iter()
                    .cloned()
                    .collect();
                renderer.replace(dom, self.container, &kept);
                (kept.len(), records.len())
            }
        };

        log::debug!("Filter '{}': {}/{} visible", query, visible, total);
        FilterOutcome {
            query,
            visible,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::dom::MemoryDom;

    fn record(title: &str, summary: &str, label: &str) -> FeedRecord {
        FeedRecord {
            title: title.to_string(),
            link: "https://example.org/".to_string(),
            published_at: "2025-06-02 14:30:00".to_string(),
            summary: summary.to_string(),
            source_name: "Source".to_string(),
            source_label: label.to_string(),
        }
    }

    fn records() -> Vec<FeedRecord> {
        vec![
            record("Water Rights Ruling", "Court sides with tribe", "Navajo"),
            record("Language Camp", "Summer program for youth", "Osage"),
            record("Election Results", "Chief re-elected", "Cherokee"),
            record("Powwow Schedule", "Dates for June", "Osage"),
        ]
    }

    fn mount(records: &[FeedRecord]) -> (MemoryDom, NodeId, NodeId) {
        let mut dom = MemoryDom::new();
        let input = dom.create_element("input");
        let container = dom.create_element("div");
        dom.append_child(dom.body(), input);
        dom.append_child(dom.body(), container);
        DomRenderer::default().render(&mut dom, container, records);
        (dom, input, container)
    }

    fn visible_titles(dom: &MemoryDom, container: NodeId) -> Vec<String> {
        dom.children(container)
            .into_iter()
            .filter(|&n| !dom.is_hidden(n))
            .map(|n| dom.text_content(dom.find_first(n, "a").unwrap()))
            .collect()
    }

    #[test]
    fn test_matches_predicate() {
        assert!(matches("", "anything"));
        assert!(matches("OSAGE", "language camp osage"));
        assert!(matches("camp", "Language Camp"));
        assert!(!matches("navajo", "language camp osage"));
    }

    #[test]
    fn test_view_filter_matches_predicate_for_every_query() {
        let records = records();
        let (mut dom, input, container) = mount(&records);
        let filter = SearchFilter::view(input, container);

        for query in ["", "osage", "OSAGE", "re-elected", "june", "zzz", "a", " "] {
            dom.set_value(input, query);
            let outcome = filter.handle_input(&mut dom);

            let expected: Vec<String> = filter_records(query, &records)
                .iter()
                .map(|r| r.title.clone())
                .collect();
            assert_eq!(visible_titles(&dom, container), expected, "query {query:?}");
            assert_eq!(outcome.visible, expected.len());
            assert_eq!(outcome.total, records.len());
        }
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let records = records();
        let (mut dom, input, container) = mount(&records);
        let filter = SearchFilter::view(input, container);

        filter.apply(&mut dom, "osage");
        filter.apply(&mut dom, "");
        assert_eq!(visible_titles(&dom, container).len(), records.len());
    }

    #[test]
    fn test_view_filter_is_idempotent_and_keeps_nodes() {
        let records = records();
        let (mut dom, input, container) = mount(&records);
        let filter = SearchFilter::view(input, container);
        let nodes_before = dom.children(container);

        filter.apply(&mut dom, "osage");
        let once = visible_titles(&dom, container);
        filter.apply(&mut dom, "osage");
        let twice = visible_titles(&dom, container);

        assert_eq!(once, twice);
        assert_eq!(once, vec!["Language Camp", "Powwow Schedule"]);
        assert_eq!(dom.children(container), nodes_before);
    }

    #[test]
    fn test_date_is_not_searchable() {
        let records = records();
        let (mut dom, input, container) = mount(&records);
        let outcome = SearchFilter::view(input, container).apply(&mut dom, "2025");
        assert_eq!(outcome.visible, 0);
    }

    #[test]
    fn test_view_filter_falls_back_to_text_content() {
        let mut dom = MemoryDom::new();
        let input = dom.create_element("input");
        let container = dom.create_element("ul");
        for text in ["Alpha news", "Beta news"] {
            let li = dom.create_element("li");
            dom.set_text(li, text);
            dom.append_child(container, li);
        }

        let outcome = SearchFilter::view(input, container).apply(&mut dom, "beta");
        assert_eq!(outcome.visible, 1);
        assert!(dom.is_hidden(dom.children(container)[0]));
    }

    #[test]
    fn test_data_filter_rerenders_matching_records() {
        let records = records();
        let mut dom = MemoryDom::new();
        let input = dom.create_element("input");
        let container = dom.create_element("div");
        let filter = SearchFilter::data(input, container, records.clone(), DomRenderer::default());

        dom.set_value(input, "Osage");
        let outcome = filter.handle_input(&mut dom);
        assert_eq!(outcome.visible, 2);
        assert_eq!(
            visible_titles(&dom, container),
            vec!["Language Camp", "Powwow Schedule"]
        );

        let outcome = filter.apply(&mut dom, "");
        assert_eq!(outcome.visible, records.len());
        assert_eq!(dom.children(container).len(), records.len());
    }

    #[test]
    fn test_data_filter_does_not_grow_document() {
        let records = records();
        let mut dom = MemoryDom::new();
        let input = dom.create_element("input");
        let container = dom.create_element("div");
        let filter = SearchFilter::data(input, container, records, DomRenderer::default());

        filter.apply(&mut dom, "");
        let high_water = dom.create_element("span");

        for query in ["o", "os", "osa", "osag", "osage", ""].iter().cycle().take(60) {
            filter.apply(&mut dom, query);
        }
        assert!(dom.create_element("span") <= high_water + 1);
    }
}
