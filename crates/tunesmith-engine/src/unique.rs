//! Insertion-ordered, case-insensitive string set.

use std::collections::HashSet;

/// Keeps the first occurrence of each string, comparing case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct UniqueList {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl UniqueList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` unless an equal one (ignoring case) is present.
    /// Returns true if it was inserted.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.seen.insert(item.to_lowercase()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn extend<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.insert(item);
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.seen.contains(&item.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}
