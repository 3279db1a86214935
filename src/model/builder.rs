//! Assembles a [`Document`] from a stream of wiki events.
//!
//! The builder keeps a stack of open containers. A start event pushes a new
//! frame; the matching end event pops it and attaches the finished node to
//! the frame below, so every node ends up as a child of whatever container
//! was current when it started. Inline content goes to the innermost open
//! inline container: a typeface span, heading content or a paragraph (of a
//! section, list entry or table cell).
//!
//! The builder trusts nothing. An end event that does not match the open
//! frame, inline content outside of a paragraph or containers left open at
//! the end put the builder into a failed state; [`DocumentBuilder::finish`]
//! then returns [`Error::EventStream`] instead of a damaged tree.

use super::{
    Document, Inline, Level, List, ListEntry, ListKind, Paragraph, PropertyKind, Section, Table,
    TableCell, TableRow, Typeface,
};
use crate::error::{Error, Result};
use crate::wem::WikiEventModel;

#[derive(Debug)]
enum Frame {
    Section(Section),
    Heading(Level, Vec<Inline>),
    Paragraph(Paragraph),
    List(List),
    ListEntry(ListEntry),
    Table(Table),
    TableBody(Vec<TableRow>),
    TableRow(TableRow),
    TableCell(TableCell),
    Typeface(Typeface, Vec<Inline>),
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Frame::Section(_) => "section",
            Frame::Heading(..) => "heading",
            Frame::Paragraph(_) => "paragraph",
            Frame::List(_) => "list",
            Frame::ListEntry(_) => "list entry",
            Frame::Table(_) => "table",
            Frame::TableBody(_) => "table body",
            Frame::TableRow(_) => "table row",
            Frame::TableCell(_) => "table cell",
            Frame::Typeface(..) => "typeface",
        }
    }
}

/// Event consumer that builds the document tree.
#[derive(Debug)]
pub struct DocumentBuilder {
    properties: Vec<super::Property>,
    stack: Vec<Frame>,
    started: bool,
    ended: bool,
    error: Option<String>,
}

impl DocumentBuilder {
    /// Create a builder holding an empty root section.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            stack: vec![Frame::Section(Section::root())],
            started: false,
            ended: false,
            error: None,
        }
    }

    /// Check if the builder has rejected the event stream.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Finish building and return the document.
    pub fn finish(mut self) -> Result<Document> {
        if let Some(message) = self.error.take() {
            return Err(Error::EventStream(message));
        }
        if self.stack.len() != 1 {
            let open: Vec<&str> = self.stack[1..].iter().map(Frame::name).collect();
            return Err(Error::EventStream(format!(
                "unclosed containers at end: {}",
                open.join(", ")
            )));
        }
        match self.stack.pop() {
            Some(Frame::Section(root)) => Ok(Document {
                properties: self.properties,
                root,
            }),
            _ => Err(Error::EventStream("root section missing".to_string())),
        }
    }

    fn fail(&mut self, message: String) {
        if self.error.is_none() {
            log::error!("document builder rejected event stream: {}", message);
            self.error = Some(message);
        }
    }

    fn accepting(&mut self, event: &str) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.ended {
            self.fail(format!("{} after document end", event));
            return false;
        }
        true
    }

    fn push(&mut self, frame: Frame) {
        if !self.accepting(frame.name()) {
            return;
        }
        let parent = self.stack.last().map(Frame::name).unwrap_or("nothing");
        let allowed = match (&frame, self.stack.last()) {
            (Frame::Section(_), Some(Frame::Section(_))) => true,
            (Frame::Heading(..), Some(Frame::Section(s))) => s.heading.is_none(),
            (
                Frame::Paragraph(_),
                Some(Frame::Section(_) | Frame::ListEntry(_) | Frame::TableCell(_)),
            ) => true,
            (Frame::ListEntry(_), Some(Frame::List(_))) => true,
            (Frame::TableBody(_), Some(Frame::Table(_))) => true,
            (Frame::TableRow(_), Some(Frame::TableBody(_))) => true,
            (Frame::TableCell(_), Some(Frame::TableRow(_))) => true,
            (
                Frame::List(_) | Frame::Table(_) | Frame::Typeface(..),
                Some(Frame::Paragraph(_) | Frame::Heading(..) | Frame::Typeface(..)),
            ) => true,
            _ => false,
        };
        if allowed {
            self.stack.push(frame);
        } else {
            self.fail(format!("{} cannot start inside {}", frame.name(), parent));
        }
    }

    /// Pop the innermost frame, which must be of the named kind.
    fn pop(&mut self, expected: &'static str) -> Option<Frame> {
        if !self.accepting(expected) {
            return None;
        }
        // The root section is never popped.
        if self.stack.len() <= 1 {
            self.fail(format!("{} end without start", expected));
            return None;
        }
        match self.stack.pop() {
            Some(frame) if frame.name() == expected => Some(frame),
            Some(frame) => {
                self.fail(format!(
                    "{} end while {} is open",
                    expected,
                    frame.name()
                ));
                None
            }
            None => None,
        }
    }

    /// Add an inline element to the innermost inline container.
    fn add(&mut self, inline: Inline) {
        if !self.accepting("inline content") {
            return;
        }
        match self.stack.last_mut() {
            Some(Frame::Typeface(_, content)) | Some(Frame::Heading(_, content)) => {
                content.push(inline)
            }
            Some(Frame::Paragraph(paragraph)) => paragraph.add(inline),
            Some(frame) => {
                let name = frame.name();
                self.fail(format!("inline content directly inside {}", name));
            }
            None => self.fail("inline content without a document".to_string()),
        }
    }

    fn attach_paragraph(&mut self, paragraph: Paragraph) {
        match self.stack.last_mut() {
            Some(Frame::Section(section)) => section.add_paragraph(paragraph),
            Some(Frame::ListEntry(entry)) => entry.paragraphs.push(paragraph),
            Some(Frame::TableCell(cell)) => cell.paragraphs.push(paragraph),
            _ => self.fail("paragraph lost its container".to_string()),
        }
    }

    fn list_end(&mut self, kind: ListKind) {
        if let Some(Frame::List(list)) = self.pop("list") {
            if list.kind == kind {
                self.add(Inline::List(list));
            } else {
                self.fail(format!("{:?} list closed as {:?}", list.kind, kind));
            }
        }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiEventModel for DocumentBuilder {
    fn document_start(&mut self) {
        if !self.accepting("document start") {
            return;
        }
        if self.started {
            self.fail("document started twice".to_string());
        }
        self.started = true;
    }

    fn document_end(&mut self) {
        if !self.accepting("document end") {
            return;
        }
        if self.stack.len() != 1 {
            let open: Vec<&str> = self.stack[1..].iter().map(Frame::name).collect();
            self.fail(format!("document end with open {}", open.join(", ")));
        }
        self.ended = true;
    }

    fn section_start(&mut self) {
        let depth = match self.stack.last() {
            Some(Frame::Section(parent)) => parent.depth + 1,
            _ => 0,
        };
        self.push(Frame::Section(Section::with_depth(depth)));
    }

    fn section_end(&mut self) {
        if let Some(Frame::Section(section)) = self.pop("section") {
            match self.stack.last_mut() {
                Some(Frame::Section(parent)) => parent.add_section(section),
                _ => self.fail("section lost its parent".to_string()),
            }
        }
    }

    fn heading_start(&mut self, level: Level) {
        if let Some(Frame::Section(section)) = self.stack.last() {
            if section.depth != level.depth() {
                let depth = section.depth;
                self.fail(format!(
                    "heading {:?} inside section of depth {}",
                    level, depth
                ));
                return;
            }
        }
        self.push(Frame::Heading(level, Vec::new()));
    }

    fn heading_end(&mut self, level: Level) {
        if let Some(Frame::Heading(open, content)) = self.pop("heading") {
            if open != level {
                self.fail(format!("heading {:?} closed as {:?}", open, level));
                return;
            }
            match self.stack.last_mut() {
                Some(Frame::Section(section)) => section.heading = Some(content),
                _ => self.fail("heading lost its section".to_string()),
            }
        }
    }

    fn paragraph_start(&mut self) {
        self.push(Frame::Paragraph(Paragraph::new()));
    }

    fn paragraph_end(&mut self) {
        if let Some(Frame::Paragraph(paragraph)) = self.pop("paragraph") {
            self.attach_paragraph(paragraph);
        }
    }

    fn table_start(&mut self) {
        self.push(Frame::Table(Table::new()));
    }

    fn table_end(&mut self) {
        if let Some(Frame::Table(table)) = self.pop("table") {
            self.add(Inline::Table(table));
        }
    }

    fn table_body_start(&mut self) {
        self.push(Frame::TableBody(Vec::new()));
    }

    fn table_body_end(&mut self) {
        if let Some(Frame::TableBody(rows)) = self.pop("table body") {
            if let Some(Frame::Table(table)) = self.stack.last_mut() {
                table.rows.extend(rows);
            }
        }
    }

    fn table_row_start(&mut self) {
        self.push(Frame::TableRow(TableRow::default()));
    }

    fn table_row_end(&mut self) {
        if let Some(Frame::TableRow(row)) = self.pop("table row") {
            if let Some(Frame::TableBody(rows)) = self.stack.last_mut() {
                rows.push(row);
            }
        }
    }

    fn table_cell_start(&mut self) {
        self.push(Frame::TableCell(TableCell::new()));
    }

    fn table_cell_end(&mut self) {
        if let Some(Frame::TableCell(cell)) = self.pop("table cell") {
            if let Some(Frame::TableRow(row)) = self.stack.last_mut() {
                row.cells.push(cell);
            }
        }
    }

    fn typeface_start(&mut self, typeface: Typeface) {
        self.push(Frame::Typeface(typeface, Vec::new()));
    }

    fn typeface_end(&mut self, typeface: Typeface) {
        if let Some(Frame::Typeface(open, content)) = self.pop("typeface") {
            if open == typeface {
                self.add(Inline::typeface(open, content));
            } else {
                self.fail(format!(
                    "typeface {} closed as {}",
                    open.name(),
                    typeface.name()
                ));
            }
        }
    }

    fn list_bulleted_start(&mut self) {
        self.push(Frame::List(List::new(ListKind::Bulleted)));
    }

    fn list_bulleted_end(&mut self) {
        self.list_end(ListKind::Bulleted);
    }

    fn list_numbered_start(&mut self) {
        self.push(Frame::List(List::new(ListKind::Numbered)));
    }

    fn list_numbered_end(&mut self) {
        self.list_end(ListKind::Numbered);
    }

    fn list_entry_start(&mut self) {
        self.push(Frame::ListEntry(ListEntry::new()));
    }

    fn list_entry_end(&mut self) {
        if let Some(Frame::ListEntry(entry)) = self.pop("list entry") {
            if let Some(Frame::List(list)) = self.stack.last_mut() {
                list.add_entry(entry);
            }
        }
    }

    fn on_divider(&mut self) {
        self.add(Inline::Divider);
    }

    fn on_new_line(&mut self) {
        self.add(Inline::NewLine);
    }

    fn on_preformat(&mut self, text: &str) {
        self.add(Inline::Preformat {
            text: text.to_string(),
        });
    }

    fn on_table_of_contents(&mut self, depth: u8) {
        self.add(Inline::TableOfContents { depth });
    }

    fn on_image(&mut self, url: &str) {
        self.add(Inline::Image {
            url: url.to_string(),
        });
    }

    fn on_text(&mut self, text: &str) {
        self.add(Inline::text(text));
    }

    fn on_external_link(&mut self, url: &str, description: Option<&str>) {
        self.add(Inline::ExternalLink {
            url: url.to_string(),
            description: description.map(str::to_string),
        });
    }

    fn on_internal_link(&mut self, target: &str, description: Option<&str>) {
        self.add(Inline::InternalLink {
            target: target.to_string(),
            description: description.map(str::to_string),
        });
    }

    fn on_property(&mut self, kind: PropertyKind, value: &str) {
        if !self.accepting("property") {
            return;
        }
        if kind == PropertyKind::Labels {
            for label in value.split(',').map(str::trim).filter(|l| !l.is_empty()) {
                self.properties.push(super::Property::new(kind, label));
            }
        } else {
            self.properties.push(super::Property::new(kind, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(section: &Section) -> String {
        section.paragraphs[0].plain_text()
    }

    #[test]
    fn test_builds_nested_sections() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.section_start();
        b.heading_start(Level::H1);
        b.on_text("Intro");
        b.heading_end(Level::H1);
        b.section_start();
        b.heading_start(Level::H2);
        b.on_text("Details");
        b.heading_end(Level::H2);
        b.paragraph_start();
        b.on_text("body");
        b.paragraph_end();
        b.section_end();
        b.section_end();
        b.document_end();

        let doc = b.finish().unwrap();
        let h1 = &doc.root.sections[0];
        assert_eq!(h1.depth, 1);
        assert_eq!(h1.title(), "Intro");
        let h2 = &h1.sections[0];
        assert_eq!(h2.depth, 2);
        assert_eq!(h2.title(), "Details");
        assert_eq!(text_of(h2), "body");
    }

    #[test]
    fn test_routes_inline_to_innermost_container() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.paragraph_start();
        b.list_bulleted_start();
        b.list_entry_start();
        b.paragraph_start();
        b.typeface_start(Typeface::Bold);
        b.on_text("bold");
        b.typeface_end(Typeface::Bold);
        b.on_text(" plain");
        b.paragraph_end();
        b.list_entry_end();
        b.list_bulleted_end();
        b.paragraph_end();
        b.document_end();

        let doc = b.finish().unwrap();
        let Inline::List(list) = &doc.root.paragraphs[0].content[0] else {
            panic!("expected list");
        };
        let entry = &list.entries[0].paragraphs[0];
        assert_eq!(
            entry.content[0],
            Inline::typeface(Typeface::Bold, vec![Inline::text("bold")])
        );
        assert_eq!(entry.content[1], Inline::text(" plain"));
    }

    #[test]
    fn test_table_cells() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.paragraph_start();
        b.table_start();
        b.table_body_start();
        b.table_row_start();
        b.table_cell_start();
        b.paragraph_start();
        b.on_text("a");
        b.paragraph_end();
        b.table_cell_end();
        b.table_cell_start();
        b.table_cell_end();
        b.table_row_end();
        b.table_body_end();
        b.table_end();
        b.paragraph_end();
        b.document_end();

        let doc = b.finish().unwrap();
        let tables = doc.tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[0].cells.len(), 2);
        assert_eq!(tables[0].rows[0].cells[0].plain_text(), "a");
        assert!(tables[0].rows[0].cells[1].paragraphs.is_empty());
    }

    #[test]
    fn test_labels_split() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.on_property(PropertyKind::Labels, "abc, ttt,,def");
        b.on_property(PropertyKind::Summary, "A page");
        b.document_end();

        let doc = b.finish().unwrap();
        assert_eq!(doc.labels(), vec!["abc", "ttt", "def"]);
        assert_eq!(doc.summary(), Some("A page"));
    }

    #[test]
    fn test_end_without_start_fails() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.section_end();
        b.document_end();
        assert!(b.is_failed());
        let err = b.finish().unwrap_err();
        assert!(matches!(err, Error::EventStream(_)));
    }

    #[test]
    fn test_mismatched_end_fails() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.paragraph_start();
        b.typeface_start(Typeface::Bold);
        b.paragraph_end();
        assert!(b.finish().is_err());
    }

    #[test]
    fn test_wrong_list_kind_fails() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.paragraph_start();
        b.list_numbered_start();
        b.list_bulleted_end();
        assert!(b.is_failed());
    }

    #[test]
    fn test_inline_outside_paragraph_fails() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.on_text("loose");
        assert!(b.is_failed());
    }

    #[test]
    fn test_heading_level_must_match_depth() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.section_start();
        b.heading_start(Level::H3);
        assert!(b.is_failed());
    }

    #[test]
    fn test_unclosed_container_fails() {
        let mut b = DocumentBuilder::new();
        b.document_start();
        b.section_start();
        let err = b.finish().unwrap_err();
        assert!(err.to_string().contains("section"));
    }
}
