//! Heading and section reconciliation.
//!
//! Headings only say which level they are on. The tracker turns a heading
//! into the section ends and starts that move the open section path from
//! the current level to the heading's level, inserting headless sections
//! when levels are skipped.

use crate::model::Level;
use crate::wem::Event;

/// Open section path and heading.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    current: Level,
    heading: Option<Level>,
}

impl SectionTracker {
    /// Start at page level with no heading open.
    pub fn new() -> Self {
        Self {
            current: Level::Page,
            heading: None,
        }
    }

    /// Level of the innermost open section.
    pub fn current(&self) -> Level {
        self.current
    }

    /// Level of the open heading, if any.
    pub fn heading(&self) -> Option<Level> {
        self.heading
    }

    /// Open a heading at `level`.
    ///
    /// Any open heading must have been closed by the caller.
    pub fn open_heading(&mut self, level: Level, out: &mut Vec<Event>) {
        let target = level.depth();
        let current = self.current.depth();
        if target > current {
            for _ in current + 1..target {
                out.push(Event::SectionStart);
            }
        } else {
            for _ in 0..=(current - target) {
                out.push(Event::SectionEnd);
            }
        }
        out.push(Event::SectionStart);
        out.push(Event::HeadingStart(level));
        self.current = level;
        self.heading = Some(level);
    }

    /// Close the open heading, returning its level.
    pub fn close_heading(&mut self, out: &mut Vec<Event>) -> Option<Level> {
        let level = self.heading.take()?;
        out.push(Event::HeadingEnd(level));
        Some(level)
    }

    /// Close the heading and every open section down to the page.
    pub fn close_all(&mut self, out: &mut Vec<Event>) {
        self.close_heading(out);
        for _ in 0..self.current.depth() {
            out.push(Event::SectionEnd);
        }
        self.current = Level::Page;
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the closing marker from buffered heading text.
///
/// The closing marker is expected to be exactly `level` equals signs. The
/// second value is `false` when it is not, in which case the whole trailing
/// run of `=` is removed instead.
pub fn strip_closing_marker(text: &str, level: Level) -> (String, bool) {
    let text = text.trim_end();
    let bytes = text.as_bytes();
    let n = level.depth();
    let symmetric = bytes.len() >= n
        && bytes[bytes.len() - n..].iter().all(|b| *b == b'=')
        && (bytes.len() == n || bytes[bytes.len() - n - 1] != b'=');
    if symmetric {
        (text[..text.len() - n].to_string(), true)
    } else {
        (text.trim_end_matches('=').to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(tracker: &mut SectionTracker, level: Level) -> Vec<Event> {
        let mut out = Vec::new();
        tracker.close_heading(&mut out);
        out.clear();
        tracker.open_heading(level, &mut out);
        out
    }

    #[test]
    fn test_first_heading() {
        let mut t = SectionTracker::new();
        assert_eq!(
            open(&mut t, Level::H1),
            vec![Event::SectionStart, Event::HeadingStart(Level::H1)]
        );
        assert_eq!(t.current(), Level::H1);
        assert_eq!(t.heading(), Some(Level::H1));
    }

    #[test]
    fn test_skipped_levels_get_gap_sections() {
        let mut t = SectionTracker::new();
        open(&mut t, Level::H1);
        assert_eq!(
            open(&mut t, Level::H4),
            vec![
                Event::SectionStart,
                Event::SectionStart,
                Event::SectionStart,
                Event::HeadingStart(Level::H4)
            ]
        );
    }

    #[test]
    fn test_sibling_and_shallower_headings() {
        let mut t = SectionTracker::new();
        open(&mut t, Level::H2);
        assert_eq!(
            open(&mut t, Level::H2),
            vec![
                Event::SectionEnd,
                Event::SectionStart,
                Event::HeadingStart(Level::H2)
            ]
        );
        assert_eq!(
            open(&mut t, Level::H1),
            vec![
                Event::SectionEnd,
                Event::SectionEnd,
                Event::SectionStart,
                Event::HeadingStart(Level::H1)
            ]
        );
    }

    #[test]
    fn test_close_all() {
        let mut t = SectionTracker::new();
        open(&mut t, Level::H3);
        let mut out = Vec::new();
        t.close_all(&mut out);
        assert_eq!(out[0], Event::HeadingEnd(Level::H3));
        assert_eq!(out.len(), 4);
        assert_eq!(t.current(), Level::Page);
        assert_eq!(t.heading(), None);
    }

    #[test]
    fn test_strip_symmetric_marker() {
        assert_eq!(
            strip_closing_marker(" Title ==", Level::H2),
            (" Title ".to_string(), true)
        );
        assert_eq!(
            strip_closing_marker(" Title = ", Level::H1),
            (" Title ".to_string(), true)
        );
    }

    #[test]
    fn test_strip_asymmetric_marker() {
        assert_eq!(
            strip_closing_marker(" Title ===", Level::H1),
            (" Title ".to_string(), false)
        );
        assert_eq!(
            strip_closing_marker(" Title", Level::H2),
            (" Title".to_string(), false)
        );
        assert_eq!(strip_closing_marker("", Level::H1), (String::new(), false));
    }
}
