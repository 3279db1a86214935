//! Paragraph and inline-level types.

use super::{List, Table};
use serde::{Deserialize, Serialize};

/// A paragraph: an ordered run of inline elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline elements in document order
    pub content: Vec<Inline>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add(Inline::text(text));
        p
    }

    /// Append an inline element.
    pub fn add(&mut self, inline: Inline) {
        self.content.push(inline);
    }

    /// Check if the paragraph has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        inline_text(&self.content)
    }
}

/// Typeface applied to a span of inline content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Typeface {
    /// `*bold*`
    Bold,
    /// `_italic_`
    Italic,
    /// `` `code` ``
    Code,
    /// `~~strikeout~~`
    Strikeout,
    /// `^superscript^`
    Super,
    /// `,,subscript,,`
    Sub,
}

impl Typeface {
    /// Lowercase name of the typeface.
    pub fn name(self) -> &'static str {
        match self {
            Typeface::Bold => "bold",
            Typeface::Italic => "italic",
            Typeface::Code => "code",
            Typeface::Strikeout => "strikeout",
            Typeface::Super => "super",
            Typeface::Sub => "sub",
        }
    }
}

/// Inline content within a paragraph, heading or typeface span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A run of literal text
    Text {
        /// The text content
        text: String,
    },

    /// Content rendered with a typeface
    Typeface {
        /// The typeface
        kind: Typeface,
        /// Content inside the span
        content: Vec<Inline>,
    },

    /// Link to another wiki page
    InternalLink {
        /// Target page name
        target: String,
        /// Optional link text
        description: Option<String>,
    },

    /// Link to an absolute URL
    ExternalLink {
        /// Target URL
        url: String,
        /// Optional link text
        description: Option<String>,
    },

    /// An image referenced by URL
    Image {
        /// Image URL
        url: String,
    },

    /// A horizontal divider
    Divider,

    /// An explicit line break
    NewLine,

    /// Preformatted text
    Preformat {
        /// Verbatim content
        text: String,
    },

    /// A table
    Table(Table),

    /// A bulleted or numbered list
    List(List),

    /// Table-of-contents marker
    TableOfContents {
        /// Deepest heading level listed (1-6)
        depth: u8,
    },
}

impl Inline {
    /// Create a text element.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    /// Create a typeface span.
    pub fn typeface(kind: Typeface, content: Vec<Inline>) -> Self {
        Inline::Typeface { kind, content }
    }

    /// Get plain text of the element.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text { text } => text.clone(),
            Inline::Typeface { content, .. } => inline_text(content),
            Inline::InternalLink {
                target,
                description,
            } => description.clone().unwrap_or_else(|| target.clone()),
            Inline::ExternalLink { url, description } => {
                description.clone().unwrap_or_else(|| url.clone())
            }
            Inline::Image { .. } | Inline::TableOfContents { .. } => String::new(),
            Inline::Divider | Inline::NewLine => "\n".to_string(),
            Inline::Preformat { text } => format!("\n{}\n", text),
            Inline::Table(table) => format!("\n{}\n", table.plain_text()),
            Inline::List(list) => format!("\n{}\n", list.plain_text()),
        }
    }
}

/// Concatenate the plain text of a run of inline elements.
pub fn inline_text(content: &[Inline]) -> String {
    content.iter().map(Inline::plain_text).collect()
}
