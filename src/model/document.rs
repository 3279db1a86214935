//! Document-level types.

use super::{Section, Table};
use serde::{Deserialize, Serialize};

/// A parsed wiki page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Page properties (summary, sidebar, labels)
    pub properties: Vec<Property>,

    /// Root section holding all content
    pub root: Section,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property.
    pub fn add_property(&mut self, kind: PropertyKind, value: impl Into<String>) {
        self.properties.push(Property::new(kind, value));
    }

    /// The page summary, if one was given.
    pub fn summary(&self) -> Option<&str> {
        self.property(PropertyKind::Summary)
    }

    /// The sidebar page name, if one was given.
    pub fn sidebar(&self) -> Option<&str> {
        self.property(PropertyKind::Sidebar)
    }

    /// All labels in declaration order.
    pub fn labels(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.kind == PropertyKind::Labels)
            .map(|p| p.value.as_str())
            .collect()
    }

    fn property(&self, kind: PropertyKind) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| p.value.as_str())
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.root.paragraphs.is_empty() && self.root.sections.is_empty()
    }

    /// All sections below the root, depth-first.
    pub fn sections(&self) -> Vec<&Section> {
        self.root.walk().into_iter().skip(1).collect()
    }

    /// All tables in the document, in document order.
    pub fn tables(&self) -> Vec<&Table> {
        let mut tables = Vec::new();
        for section in self.root.walk() {
            for paragraph in &section.paragraphs {
                collect_tables(&paragraph.content, &mut tables);
            }
        }
        tables
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.root.plain_text()
    }
}

fn collect_tables<'a>(content: &'a [super::Inline], out: &mut Vec<&'a Table>) {
    use super::Inline;
    for inline in content {
        match inline {
            Inline::Table(table) => {
                out.push(table);
                for cell in table.rows.iter().flat_map(|r| &r.cells) {
                    for p in &cell.paragraphs {
                        collect_tables(&p.content, out);
                    }
                }
            }
            Inline::Typeface { content, .. } => collect_tables(content, out),
            Inline::List(list) => {
                for p in list.entries.iter().flat_map(|e| &e.paragraphs) {
                    collect_tables(&p.content, out);
                }
            }
            _ => {}
        }
    }
}

/// Kind of a page property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// `#summary` - short description of the page
    Summary,
    /// `#sidebar` - name of the sidebar page
    Sidebar,
    /// `#labels` - one label per property
    Labels,
}

impl PropertyKind {
    /// Pragma keyword for the kind.
    pub fn keyword(self) -> &'static str {
        match self {
            PropertyKind::Summary => "summary",
            PropertyKind::Sidebar => "sidebar",
            PropertyKind::Labels => "labels",
        }
    }

    /// Look up a kind by pragma keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "summary" => Some(PropertyKind::Summary),
            "sidebar" => Some(PropertyKind::Sidebar),
            "labels" => Some(PropertyKind::Labels),
            _ => None,
        }
    }
}

/// A page-level property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property kind
    pub kind: PropertyKind,
    /// Property value
    pub value: String,
}

impl Property {
    /// Create a property.
    pub fn new(kind: PropertyKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Inline, Paragraph, TableRow};

    #[test]
    fn test_document_properties() {
        let mut doc = Document::new();
        doc.add_property(PropertyKind::Summary, "About");
        doc.add_property(PropertyKind::Labels, "abc");
        doc.add_property(PropertyKind::Labels, "def");

        assert_eq!(doc.summary(), Some("About"));
        assert_eq!(doc.sidebar(), None);
        assert_eq!(doc.labels(), vec!["abc", "def"]);
    }

    #[test]
    fn test_property_keyword() {
        for kind in [
            PropertyKind::Summary,
            PropertyKind::Sidebar,
            PropertyKind::Labels,
        ] {
            assert_eq!(PropertyKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(PropertyKind::from_keyword("title"), None);
    }

    #[test]
    fn test_document_tables() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a"]));
        let mut p = Paragraph::new();
        p.add(Inline::Table(table));

        let mut doc = Document::new();
        let mut section = Section::with_depth(1);
        section.add_paragraph(p);
        doc.root.add_section(section);

        assert_eq!(doc.tables().len(), 1);
        assert_eq!(doc.sections().len(), 1);
        assert!(!doc.is_empty());
    }
}
