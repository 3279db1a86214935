//! List types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// Kind of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// `*` marker
    Bulleted,
    /// `#` marker
    Numbered,
}

/// A bulleted or numbered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Bulleted or numbered
    pub kind: ListKind,

    /// Entries in document order
    pub entries: Vec<ListEntry>,
}

impl List {
    /// Create an empty list.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Add an entry.
    pub fn add_entry(&mut self, entry: ListEntry) {
        self.entries.push(entry);
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get plain text, one entry per line.
    pub fn plain_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single list entry. Nested lists live inside its paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Entry content
    pub paragraphs: Vec<Paragraph>,
}

impl ListEntry {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry holding a single paragraph of text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::with_text(text)],
        }
    }

    /// Lists nested directly inside this entry.
    pub fn nested_lists(&self) -> impl Iterator<Item = &List> {
        self.paragraphs
            .iter()
            .flat_map(|p| &p.content)
            .filter_map(|inline| match inline {
                super::Inline::List(list) => Some(list),
                _ => None,
            })
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Inline;

    #[test]
    fn test_nested_lists() {
        let mut inner = List::new(ListKind::Numbered);
        inner.add_entry(ListEntry::text("a1"));

        let mut entry = ListEntry::text("a");
        entry.paragraphs[0].add(Inline::List(inner));

        let mut outer = List::new(ListKind::Bulleted);
        outer.add_entry(entry);
        outer.add_entry(ListEntry::text("b"));

        assert_eq!(outer.len(), 2);
        let nested: Vec<&List> = outer.entries[0].nested_lists().collect();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].kind, ListKind::Numbered);
        assert_eq!(outer.entries[1].nested_lists().count(), 0);
    }
}
