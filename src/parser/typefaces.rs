//! Typeface stack.

use crate::model::Typeface;
use crate::wem::Event;

/// Open typeface spans, outermost first.
#[derive(Debug, Clone, Default)]
pub struct TypefaceStack {
    stack: Vec<Typeface>,
}

impl TypefaceStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a typeface is open.
    pub fn contains(&self, kind: Typeface) -> bool {
        self.stack.contains(&kind)
    }

    /// Check if no typeface is open.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Open `kind`. Returns `false` without emitting if it is already open.
    pub fn start(&mut self, kind: Typeface, out: &mut Vec<Event>) -> bool {
        if self.contains(kind) {
            return false;
        }
        self.stack.push(kind);
        out.push(Event::TypefaceStart(kind));
        true
    }

    /// Close every typeface down to and including `kind`.
    ///
    /// Returns the number of other typefaces closed on the way, or `None` if
    /// `kind` is not open.
    pub fn close_to(&mut self, kind: Typeface, out: &mut Vec<Event>) -> Option<usize> {
        if !self.contains(kind) {
            return None;
        }
        let mut others = 0;
        while let Some(open) = self.stack.pop() {
            out.push(Event::TypefaceEnd(open));
            if open == kind {
                break;
            }
            others += 1;
        }
        Some(others)
    }

    /// Close every open typeface, innermost first. Returns how many.
    pub fn close_all(&mut self, out: &mut Vec<Event>) -> usize {
        let count = self.stack.len();
        while let Some(open) = self.stack.pop() {
            out.push(Event::TypefaceEnd(open));
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Typeface::{Bold, Code, Italic};

    #[test]
    fn test_start_twice_is_noop() {
        let mut s = TypefaceStack::new();
        let mut out = Vec::new();
        assert!(s.start(Bold, &mut out));
        assert!(!s.start(Bold, &mut out));
        assert_eq!(out, vec![Event::TypefaceStart(Bold)]);
    }

    #[test]
    fn test_close_to_closes_inner_first() {
        let mut s = TypefaceStack::new();
        let mut out = Vec::new();
        s.start(Bold, &mut out);
        s.start(Code, &mut out);
        s.start(Italic, &mut out);
        out.clear();

        assert_eq!(s.close_to(Code, &mut out), Some(1));
        assert_eq!(
            out,
            vec![Event::TypefaceEnd(Italic), Event::TypefaceEnd(Code)]
        );
        assert!(s.contains(Bold));
        assert_eq!(s.close_to(Italic, &mut out), None);
    }

    #[test]
    fn test_close_all() {
        let mut s = TypefaceStack::new();
        let mut out = Vec::new();
        s.start(Italic, &mut out);
        s.start(Bold, &mut out);
        out.clear();
        assert_eq!(s.close_all(&mut out), 2);
        assert_eq!(out, vec![Event::TypefaceEnd(Bold), Event::TypefaceEnd(Italic)]);
        assert!(s.is_empty());
    }
}
