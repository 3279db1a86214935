//! List nesting reconciliation.
//!
//! List markers carry nothing but their indentation. The tracker keeps a
//! stack of `(width, kind)` pairs for the open lists and derives from a new
//! marker whether it continues the current list, nests a new one or returns
//! to an outer one.

use crate::model::ListKind;
use crate::wem::Event;

/// Indentation width of a list marker.
pub fn marker_width(marker: &str) -> usize {
    marker.trim_end_matches([' ', '\t']).chars().count()
}

/// Stack of open lists.
#[derive(Debug, Clone, Default)]
pub struct ListTracker {
    stack: Vec<(usize, ListKind)>,
}

impl ListTracker {
    /// Create a tracker without open lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any list is open.
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Number of open lists.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Start a new entry for a marker.
    ///
    /// Leaves an entry paragraph open.
    pub fn entry(&mut self, marker: &str, kind: ListKind, out: &mut Vec<Event>) {
        let width = marker_width(marker);
        if self.stack.is_empty() {
            out.push(Event::ListStart(kind));
            out.push(Event::ListEntryStart);
            out.push(Event::ParagraphStart);
            self.stack.push((width, kind));
            return;
        }

        let previous = self.stack.len();
        // innermost first
        let mut popped = Vec::new();
        while let Some(&(w, k)) = self.stack.last() {
            if w < width {
                break;
            }
            popped.push(k);
            self.stack.pop();
        }
        self.stack.push((width, kind));
        let now = self.stack.len();

        if now > previous {
            out.push(Event::ListStart(kind));
        } else {
            out.push(Event::ParagraphEnd);
            out.push(Event::ListEntryEnd);
            if let Some((outer, inner)) = popped.split_last() {
                for k in inner {
                    out.push(Event::ListEnd(*k));
                    out.push(Event::ParagraphEnd);
                    out.push(Event::ListEntryEnd);
                }
                if *outer != kind {
                    out.push(Event::ListEnd(*outer));
                    out.push(Event::ListStart(kind));
                }
            }
        }
        out.push(Event::ListEntryStart);
        out.push(Event::ParagraphStart);
    }

    /// Close every open list, innermost first.
    pub fn close_all(&mut self, out: &mut Vec<Event>) {
        while let Some((_, kind)) = self.stack.pop() {
            out.push(Event::ParagraphEnd);
            out.push(Event::ListEntryEnd);
            out.push(Event::ListEnd(kind));
        }
    }
}
