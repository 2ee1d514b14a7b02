//! Document abstraction for runtime rendering.
//!
//! [`Dom`] is the slice of a host document the runtime page needs:
//! element creation, child management, text/markup assignment, attribute
//! access, visibility toggling and the value of an input element.
//! [`MemoryDom`] is the in-process implementation used by the CLI and tests.

use std::collections::BTreeMap;

use crate::utils::text::strip_html;

/// Handle to a node owned by a [`Dom`].
pub type NodeId = usize;

/// Minimal document interface.
pub trait Dom {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach every child of `parent`. Handles to the removed subtrees
    /// become invalid.
    fn remove_children(&mut self, parent: NodeId);

    /// Children of `parent`, in order.
    fn children(&self, parent: NodeId) -> Vec<NodeId>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Replace the node's content with a text node (never interpreted as markup).
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Replace the node's content with raw markup.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Concatenated text of the node and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    fn set_hidden(&mut self, node: NodeId, hidden: bool);

    fn is_hidden(&self, node: NodeId) -> bool;

    /// Current value of an input element.
    fn value(&self, node: NodeId) -> String;

    fn set_value(&mut self, node: NodeId, value: &str);
}

#[derive(Debug, Clone, Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<NodeId>,
    content: Content,
    hidden: bool,
    value: String,
}

/// In-memory document. Node 0 is the `<body>` element.
///
/// Slots of removed subtrees are reused by later `create_element` calls.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                ..Node::default()
            }],
            free: Vec::new(),
        }
    }

    /// The document body.
    pub fn body(&self) -> NodeId {
        0
    }

    /// Detach and recycle every child subtree of `node`.
    fn release_children(&mut self, node: NodeId) {
        let Some(n) = self.nodes.get_mut(node) else {
            return;
        };
        let mut pending = std::mem::take(&mut n.children);
        while let Some(child) = pending.pop() {
            if child == 0 {
                continue;
            }
            if let Some(c) = self.nodes.get_mut(child) {
                pending.append(&mut c.children);
                *c = Node::default();
                self.free.push(child);
            }
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    /// First descendant of `node` with the given tag, depth-first.
    pub fn find_first(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let n = self.nodes.get(node)?;
        n.children.iter().find_map(|&child| {
            if self.tag(child) == Some(tag) {
                Some(child)
            } else {
                self.find_first(child, tag)
            }
        })
    }

    /// Serialize the node as HTML. Text content is escaped, raw markup is not.
    pub fn to_html(&self, node: NodeId) -> String {
        let Some(n) = self.nodes.get(node) else {
            return String::new();
        };

        let mut out = format!("<{}", n.tag);
        for (name, value) in &n.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
        }
        if n.hidden {
            out.push_str(" hidden");
        }
        out.push('>');

        match &n.content {
            Content::Empty => {}
            Content::Text(text) => out.push_str(&html_escape(text)),
            Content::Html(html) => out.push_str(html),
        }
        for &child in &n.children {
            out.push_str(&self.to_html(child));
        }

        out.push_str(&format!("</{}>", n.tag));
        out
    }
}

impl Dom for MemoryDom {
    fn create_element(&mut self, tag: &str) -> NodeId {
        let node = Node {
            tag: tag.to_string(),
            ..Node::default()
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || child >= self.nodes.len() {
            return;
        }
        if let Some(n) = self.nodes.get_mut(parent) {
            n.children.push(child);
        }
    }

    fn remove_children(&mut self, parent: NodeId) {
        self.release_children(parent);
    }

    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(parent)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.get(node)?.attributes.get(name).cloned()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.release_children(node);
        if let Some(n) = self.nodes.get_mut(node) {
            n.content = Content::Text(text.to_string());
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.release_children(node);
        if let Some(n) = self.nodes.get_mut(node) {
            n.content = Content::Html(html.to_string());
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(n) = self.nodes.get(node) else {
            return String::new();
        };

        let mut parts = Vec::new();
        match &n.content {
            Content::Empty => {}
            Content::Text(text) => parts.push(text.clone()),
            Content::Html(html) => parts.push(strip_html(html)),
        }
        parts.extend(
            n.children
                .iter()
                .map(|&child| self.text_content(child))
                .filter(|t| !t.is_empty()),
        );
        parts.join(" ")
    }

    fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.hidden = hidden;
        }
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.hidden)
    }

    fn value(&self, node: NodeId) -> String {
        self.nodes
            .get(node)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.value = value.to_string();
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped_markup_is_not() {
        let mut dom = MemoryDom::new();
        let p = dom.create_element("p");
        dom.set_text(p, "<b>bold</b>");
        assert_eq!(dom.to_html(p), "<p>&lt;b&gt;bold&lt;/b&gt;</p>");

        dom.set_inner_html(p, "<b>bold</b>");
        assert_eq!(dom.to_html(p), "<p><b>bold</b></p>");
        assert_eq!(dom.text_content(p), "bold");
    }

    #[test]
    fn test_children_and_text_content() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let list = dom.create_element("ul");
        dom.append_child(body, list);
        for text in ["one", "two"] {
            let li = dom.create_element("li");
            dom.set_text(li, text);
            dom.append_child(list, li);
        }

        assert_eq!(dom.children(list).len(), 2);
        assert_eq!(dom.text_content(body), "one two");
        assert_eq!(dom.find_first(body, "li"), Some(dom.children(list)[0]));

        dom.remove_children(list);
        assert!(dom.children(list).is_empty());
    }

    #[test]
    fn test_removed_nodes_are_recycled() {
        let mut dom = MemoryDom::new();
        let list = dom.create_element("ul");
        let li = dom.create_element("li");
        let a = dom.create_element("a");
        dom.set_attribute(a, "href", "https://example.org/");
        dom.append_child(li, a);
        dom.append_child(list, li);

        dom.remove_children(list);
        let mut reused = vec![dom.create_element("li"), dom.create_element("a")];
        reused.sort();
        assert_eq!(reused, vec![li, a]);
        assert_eq!(dom.attribute(a, "href"), None);
        assert!(dom.children(li).is_empty());
        assert_eq!(dom.create_element("p"), a + 1);
    }

    #[test]
    fn test_hidden_and_value() {
        let mut dom = MemoryDom::new();
        let input = dom.create_element("input");
        assert!(!dom.is_hidden(input));
        dom.set_hidden(input, true);
        assert!(dom.is_hidden(input));
        assert!(dom.to_html(input).contains(" hidden"));

        dom.set_value(input, "osage");
        assert_eq!(dom.value(input), "osage");
    }

    #[test]
    fn test_unknown_nodes_are_ignored() {
        let mut dom = MemoryDom::new();
        dom.append_child(0, 42);
        dom.set_hidden(42, true);
        assert!(dom.children(0).is_empty());
        assert!(!dom.is_hidden(42));
        assert_eq!(dom.text_content(42), "");
    }
}
