//! Parsed feed item, as handed over by the feed interface.

use std::collections::BTreeMap;

/// A single item from an RSS or Atom document.
///
/// Field values are untrusted text copied from the feed. Fields the
/// document does not carry are absent, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    fields: BTreeMap<String, String>,
}

impl FeedItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, ignoring `None`.
    pub fn with(mut self, name: &str, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Get a field, treating blank values as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Return the first non-blank value among `names`, in order.
    pub fn first_of<S: AsRef<str>>(&self, names: &[S]) -> Option<&str> {
        names.iter().find_map(|name| self.get(name.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
