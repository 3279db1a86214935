//! Sections and heading levels.

use super::{Inline, Paragraph};
use serde::{Deserialize, Serialize};

/// Structural level of a section.
///
/// `Page` is the root of a document; `H1`..`H6` correspond to the heading
/// markers `=` through `======`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// The page itself
    Page,
    /// `= heading =`
    H1,
    /// `== heading ==`
    H2,
    /// `=== heading ===`
    H3,
    /// `==== heading ====`
    H4,
    /// `===== heading =====`
    H5,
    /// `====== heading ======`
    H6,
}

impl Level {
    /// All levels, root first.
    pub const ALL: [Level; 7] = [
        Level::Page,
        Level::H1,
        Level::H2,
        Level::H3,
        Level::H4,
        Level::H5,
        Level::H6,
    ];

    /// Nesting depth of the level (0 for the page, 1..=6 for headings).
    pub fn depth(self) -> usize {
        self as usize
    }

    /// Level for a nesting depth.
    pub fn from_depth(depth: usize) -> Option<Level> {
        Self::ALL.get(depth).copied()
    }

    /// The next deeper level, `None` for `H6`.
    pub fn sub_level(self) -> Option<Level> {
        Self::from_depth(self.depth() + 1)
    }

    /// The enclosing level, `None` for the page.
    pub fn parent_level(self) -> Option<Level> {
        self.depth().checked_sub(1).and_then(Self::from_depth)
    }

    /// Whether `other` is nested somewhere below this level.
    pub fn has_child(self, other: Level) -> bool {
        other.depth() > self.depth()
    }

    /// Whether this level is an actual heading.
    pub fn is_heading(self) -> bool {
        self != Level::Page
    }
}

/// A heading-scoped part of a document.
///
/// The root section of a page has depth 0 and no heading. A section created
/// only to bridge a jump in heading levels (e.g. `=` followed by `===`) has
/// no heading either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Nesting depth, one more than the parent section
    pub depth: usize,

    /// Heading content, if the section was opened by a heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<Vec<Inline>>,

    /// Paragraphs directly inside this section
    pub paragraphs: Vec<Paragraph>,

    /// Child sections in document order
    pub sections: Vec<Section>,
}

impl Section {
    /// Create the root section of a page.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create an empty section at the given depth.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Level of this section.
    pub fn level(&self) -> Level {
        Level::from_depth(self.depth).unwrap_or(Level::H6)
    }

    /// Plain text of the heading, empty if there is none.
    pub fn title(&self) -> String {
        self.heading
            .as_deref()
            .map(super::inline_text)
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Add a paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Add a child section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Iterate over this section and all descendants, depth-first.
    pub fn walk(&self) -> Vec<&Section> {
        let mut out = vec![self];
        for child in &self.sections {
            out.extend(child.walk());
        }
        out
    }

    /// Get plain text of the section including its descendants.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        let title = self.title();
        if !title.is_empty() {
            parts.push(title);
        }
        for paragraph in &self.paragraphs {
            let text = paragraph.plain_text();
            if !text.trim().is_empty() {
                parts.push(text.trim().to_string());
            }
        }
        for section in &self.sections {
            let text = section.plain_text();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join("\n\n")
    }
}
