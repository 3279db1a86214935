//! Table reconciliation.
//!
//! The markup only has row and cell delimiters. The tracker opens the
//! table, body and row on the first delimiter, opens cells lazily when
//! content arrives and closes everything on demand.

use crate::wem::Event;

/// Open table state.
#[derive(Debug, Clone, Default)]
pub struct TableTracker {
    open: bool,
    cell_open: bool,
}

impl TableTracker {
    /// Create a tracker with no table open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a table (and therefore a row) is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Check if a cell paragraph is open.
    pub fn is_cell_open(&self) -> bool {
        self.cell_open
    }

    /// Row delimiter.
    pub fn row(&mut self, out: &mut Vec<Event>) {
        if self.open {
            self.close_cell(out);
            out.push(Event::TableRowEnd);
        } else {
            out.push(Event::TableStart);
            out.push(Event::TableBodyStart);
            self.open = true;
        }
        out.push(Event::TableRowStart);
        self.cell_open = false;
    }

    /// Cell delimiter.
    ///
    /// Without an open cell the delimiter closes an empty one.
    pub fn cell(&mut self, out: &mut Vec<Event>) {
        if !self.open {
            self.row(out);
            return;
        }
        if self.cell_open {
            self.close_cell(out);
        } else {
            out.push(Event::TableCellStart);
            out.push(Event::TableCellEnd);
        }
    }

    /// Open a cell and its paragraph if content needs a home.
    pub fn ensure_cell(&mut self, out: &mut Vec<Event>) {
        if self.open && !self.cell_open {
            out.push(Event::TableCellStart);
            out.push(Event::ParagraphStart);
            self.cell_open = true;
        }
    }

    /// Close the table with everything inside it.
    pub fn close(&mut self, out: &mut Vec<Event>) {
        if !self.open {
            return;
        }
        self.close_cell(out);
        out.push(Event::TableRowEnd);
        out.push(Event::TableBodyEnd);
        out.push(Event::TableEnd);
        self.open = false;
    }

    fn close_cell(&mut self, out: &mut Vec<Event>) {
        if self.cell_open {
            out.push(Event::ParagraphEnd);
            out.push(Event::TableCellEnd);
            self.cell_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_opens_table() {
        let mut t = TableTracker::new();
        let mut out = Vec::new();
        t.row(&mut out);
        assert_eq!(
            out,
            vec![
                Event::TableStart,
                Event::TableBodyStart,
                Event::TableRowStart
            ]
        );
        assert!(t.is_open());
        assert!(!t.is_cell_open());
    }

    #[test]
    fn test_cells_and_rows() {
        let mut t = TableTracker::new();
        let mut out = Vec::new();
        t.row(&mut out);
        out.clear();

        t.ensure_cell(&mut out);
        t.ensure_cell(&mut out);
        t.cell(&mut out);
        t.row(&mut out);
        assert_eq!(
            out,
            vec![
                Event::TableCellStart,
                Event::ParagraphStart,
                Event::ParagraphEnd,
                Event::TableCellEnd,
                Event::TableRowEnd,
                Event::TableRowStart
            ]
        );
    }

    #[test]
    fn test_empty_cell() {
        let mut t = TableTracker::new();
        let mut out = Vec::new();
        t.row(&mut out);
        out.clear();
        t.cell(&mut out);
        assert_eq!(out, vec![Event::TableCellStart, Event::TableCellEnd]);
    }

    #[test]
    fn test_cell_without_table_starts_row() {
        let mut t = TableTracker::new();
        let mut out = Vec::new();
        t.cell(&mut out);
        assert_eq!(out.len(), 3);
        assert!(t.is_open());
    }

    #[test]
    fn test_close_with_open_cell() {
        let mut t = TableTracker::new();
        let mut out = Vec::new();
        t.row(&mut out);
        t.ensure_cell(&mut out);
        out.clear();
        t.close(&mut out);
        assert_eq!(
            out,
            vec![
                Event::ParagraphEnd,
                Event::TableCellEnd,
                Event::TableRowEnd,
                Event::TableBodyEnd,
                Event::TableEnd
            ]
        );
        assert!(!t.is_open());

        out.clear();
        t.close(&mut out);
        assert!(out.is_empty());
    }
}
