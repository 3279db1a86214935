//! Page statistics.

use crate::model::{Document, Inline};
use serde::{Deserialize, Serialize};

/// Statistics about a parsed page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of pages processed
    pub page_count: u32,

    /// Number of sections with a heading
    pub heading_count: u32,

    /// Number of paragraphs, including those in lists and tables
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of lists, nested ones included
    pub list_count: u32,

    /// Number of list entries
    pub list_item_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of internal and external links
    pub link_count: u32,

    /// Number of dividers
    pub divider_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics of one document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self {
            page_count: 1,
            ..Self::default()
        };
        for section in doc.root.walk() {
            if let Some(heading) = &section.heading {
                stats.heading_count += 1;
                stats.count_inlines(heading);
            }
            for paragraph in &section.paragraphs {
                stats.paragraph_count += 1;
                stats.count_inlines(&paragraph.content);
            }
        }
        stats
    }

    fn count_inlines(&mut self, content: &[Inline]) {
        for inline in content {
            match inline {
                Inline::Text { text } => self.count_text(text),
                Inline::Typeface { content, .. } => self.count_inlines(content),
                Inline::InternalLink { .. } | Inline::ExternalLink { .. } => {
                    self.link_count += 1;
                    self.count_text(&inline.plain_text());
                }
                Inline::Image { .. } => self.image_count += 1,
                Inline::Divider => self.divider_count += 1,
                Inline::Preformat { text } => self.count_text(text),
                Inline::Table(table) => {
                    self.table_count += 1;
                    for cell in table.rows.iter().flat_map(|r| &r.cells) {
                        for paragraph in &cell.paragraphs {
                            self.paragraph_count += 1;
                            self.count_inlines(&paragraph.content);
                        }
                    }
                }
                Inline::List(list) => {
                    self.list_count += 1;
                    for entry in &list.entries {
                        self.list_item_count += 1;
                        for paragraph in &entry.paragraphs {
                            self.paragraph_count += 1;
                            self.count_inlines(&paragraph.content);
                        }
                    }
                }
                Inline::NewLine | Inline::TableOfContents { .. } => {}
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DocumentStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.image_count += other.image_count;
        self.link_count += other.link_count;
        self.divider_count += other.divider_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
