//! Token-to-event reconciliation.
//!
//! The [`Visitor`] receives one call per recognized token and turns the flat
//! token stream into a balanced [`WikiEventModel`] event stream. The actual
//! reconciliation rules live in the small trackers of the sibling modules;
//! the visitor decides when to consult which tracker and in what order, so
//! that the events of different structures never cross.
//!
//! Events produced while handling one token are collected first and handed
//! to the consumer when the token is done.

use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::lists::ListTracker;
use super::options::{ErrorMode, ParseOptions};
use super::sections::{strip_closing_marker, SectionTracker};
use super::tables::TableTracker;
use super::text::{is_wiki_word, TextBuffer};
use super::typefaces::TypefaceStack;
use crate::error::{Error, Result};
use crate::model::{Level, ListKind, PropertyKind, Typeface};
use crate::wem::{Event, WikiEventModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fresh,
    Open,
    Ended,
}

/// Check if a link target is an absolute URL with a known scheme.
///
/// Targets like `Help:Start` parse as URLs but name wiki pages.
pub fn is_absolute_url(target: &str) -> bool {
    url::Url::parse(target).is_ok_and(|u| {
        matches!(
            u.scheme(),
            "http" | "https" | "ftp" | "file" | "mailto" | "jar"
        )
    })
}

/// Event synthesizer driven by token callbacks.
///
/// # Example
///
/// ```
/// use wikiutil::model::Level;
/// use wikiutil::parser::Visitor;
/// use wikiutil::wem::{check_balance, EventRecorder};
///
/// let mut visitor = Visitor::new(EventRecorder::new());
/// visitor.on_heading_start(Level::H1);
/// visitor.on_space(" ");
/// visitor.on_word("Intro");
/// visitor.on_space(" ");
/// visitor.on_special_symbol("=");
/// visitor.on_heading_end();
/// visitor.on_word("text");
/// let (recorder, diagnostics) = visitor.finish()?;
///
/// assert!(check_balance(recorder.events()).is_ok());
/// assert!(diagnostics.is_empty());
/// # Ok::<(), wikiutil::Error>(())
/// ```
pub struct Visitor<W: WikiEventModel> {
    wem: W,
    error_mode: ErrorMode,
    wiki_words: bool,
    source: Option<String>,
    line: usize,
    phase: Phase,

    sections: SectionTracker,
    lists: ListTracker,
    tables: TableTracker,
    typefaces: TypefaceStack,
    text: TextBuffer,
    paragraph_open: bool,
    heading_fresh: bool,

    pending: Vec<Event>,
    in_heading: bool,
    heading_title: String,
    titles: Vec<String>,
    content_seen: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<W: WikiEventModel> Visitor<W> {
    /// Create a visitor with default options.
    pub fn new(wem: W) -> Self {
        Self::with_options(wem, &ParseOptions::default())
    }

    /// Create a visitor with the given options.
    pub fn with_options(wem: W, options: &ParseOptions) -> Self {
        Self {
            wem,
            error_mode: options.error_mode,
            wiki_words: options.wiki_words,
            source: options.source_name.clone(),
            line: 0,
            phase: Phase::Fresh,
            sections: SectionTracker::new(),
            lists: ListTracker::new(),
            tables: TableTracker::new(),
            typefaces: TypefaceStack::new(),
            text: TextBuffer::new(),
            paragraph_open: false,
            heading_fresh: false,
            pending: Vec::new(),
            in_heading: false,
            heading_title: String::new(),
            titles: Vec::new(),
            content_seen: false,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Set the current source line for diagnostics.
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Record a diagnostic at the current position.
    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            message: message.into(),
            source: self.source.clone(),
            line: self.line,
            section: self.section_path(),
        };
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// End the document if needed and return the consumer.
    ///
    /// In strict mode the first diagnostic is returned as
    /// [`Error::Malformed`] instead.
    pub fn finish(mut self) -> Result<(W, Vec<Diagnostic>)> {
        if self.phase != Phase::Ended {
            self.document_end();
        }
        if self.error_mode == ErrorMode::Strict {
            if let Some(first) = self.diagnostics.first() {
                return Err(Error::Malformed(first.to_string()));
            }
        }
        Ok((self.wem, self.diagnostics))
    }

    // ---- document ----

    /// Start of the page.
    pub fn document_start(&mut self) {
        if self.phase == Phase::Fresh {
            self.begin();
            self.emit();
        } else {
            self.report(DiagnosticKind::UnexpectedToken, "document started twice");
        }
    }

    /// End of the page. Closes everything still open.
    pub fn document_end(&mut self) {
        if !self.begin() {
            return;
        }
        self.end_block();
        self.sections.close_all(&mut self.pending);
        self.pending.push(Event::DocumentEnd);
        self.phase = Phase::Ended;
        self.emit();
    }

    // ---- text ----

    /// A word. CamelCase words become wiki page links.
    pub fn on_word(&mut self, word: &str) {
        if !self.begin() {
            return;
        }
        if self.wiki_words && is_wiki_word(word) {
            if self.text.pop_escape() {
                self.text.push(word);
            } else {
                self.ensure_block();
                self.flush_text();
                self.push_content(Event::InternalLink {
                    target: word.to_string(),
                    description: None,
                });
            }
        } else {
            self.text.push(word);
        }
        self.emit();
    }

    /// A run of whitespace.
    pub fn on_space(&mut self, space: &str) {
        if self.begin() {
            self.text.push(space);
            self.emit();
        }
    }

    /// Any other literal character sequence.
    pub fn on_special_symbol(&mut self, symbol: &str) {
        if self.begin() {
            self.text.push(symbol);
            self.emit();
        }
    }

    // ---- headings ----

    /// Start of a heading line.
    pub fn on_heading_start(&mut self, level: Level) {
        if !self.begin() {
            return;
        }
        self.close_heading();
        self.close_typefaces();
        self.close_lists();
        self.close_table();
        self.flush_text();
        self.close_paragraph();
        self.sections.open_heading(level, &mut self.pending);
        self.heading_fresh = true;
        self.emit();
    }

    /// End of a heading line, after its closing marker.
    pub fn on_heading_end(&mut self) {
        if !self.begin() {
            return;
        }
        if self.sections.heading().is_some() {
            self.close_heading();
        } else {
            self.report(
                DiagnosticKind::UnexpectedToken,
                "heading end without heading",
            );
        }
        self.emit();
    }

    // ---- lists ----

    /// Start of a list entry. `marker` is the indentation plus marker
    /// character.
    pub fn on_list_entry_start(&mut self, marker: &str, numbered: bool) {
        if !self.begin() {
            return;
        }
        let kind = if numbered {
            ListKind::Numbered
        } else {
            ListKind::Bulleted
        };
        self.close_typefaces();
        self.close_table();
        self.close_heading();
        self.flush_text();
        if !self.lists.is_open() {
            self.ensure_paragraph();
        }
        self.lists.entry(marker, kind, &mut self.pending);
        self.emit();
    }

    /// End of all open lists.
    pub fn on_list_entries_end(&mut self) {
        if self.begin() {
            self.close_lists();
            self.emit();
        }
    }

    // ---- typefaces ----

    /// Typeface marker: closes the kind if it is open, opens it otherwise.
    pub fn on_typeface_toggle(&mut self, kind: Typeface) {
        if !self.begin() {
            return;
        }
        if self.typefaces.contains(kind) {
            self.close_typeface(kind);
        } else {
            self.open_typeface(kind);
        }
        self.emit();
    }

    /// Explicit typeface start.
    pub fn start_typeface(&mut self, kind: Typeface) {
        if !self.begin() {
            return;
        }
        if self.typefaces.contains(kind) {
            self.report(
                DiagnosticKind::TypefaceAlreadyOpen,
                format!("{} is already open", kind.name()),
            );
        } else {
            self.open_typeface(kind);
        }
        self.emit();
    }

    /// Explicit typeface end.
    pub fn end_typeface(&mut self, kind: Typeface) {
        if !self.begin() {
            return;
        }
        if self.typefaces.contains(kind) {
            self.close_typeface(kind);
        } else {
            self.report(
                DiagnosticKind::TypefaceNotOpen,
                format!("{} is not open", kind.name()),
            );
        }
        self.emit();
    }

    // ---- tables ----

    /// Row delimiter at the start of a table line.
    pub fn on_table_row(&mut self) {
        if !self.begin() {
            return;
        }
        self.close_typefaces();
        self.close_lists();
        self.close_heading();
        self.flush_text();
        if !self.tables.is_open() {
            self.ensure_paragraph();
        }
        self.tables.row(&mut self.pending);
        self.emit();
    }

    /// Cell delimiter.
    pub fn on_table_cell(&mut self) {
        if !self.begin() {
            return;
        }
        if !self.tables.is_open() {
            self.on_table_row();
            return;
        }
        self.close_typefaces();
        self.flush_text();
        self.tables.cell(&mut self.pending);
        self.emit();
    }

    // ---- blocks and breaks ----

    /// Horizontal divider.
    pub fn on_divider(&mut self) {
        if self.begin() {
            self.ensure_block();
            self.flush_text();
            self.push_content(Event::Divider);
            self.emit();
        }
    }

    /// End of a source line. Closes an open table, otherwise acts as a
    /// space.
    pub fn on_new_line(&mut self) {
        if !self.begin() {
            return;
        }
        if self.tables.is_open() {
            self.close_table();
        } else {
            self.text.push(" ");
        }
        self.emit();
    }

    /// Explicit line break.
    pub fn on_line_break(&mut self) {
        if self.begin() {
            self.ensure_block();
            self.flush_text();
            self.push_content(Event::NewLine);
            self.emit();
        }
    }

    /// Blank line: ends the current paragraph with everything inside it.
    pub fn on_paragraph_break(&mut self) {
        if self.begin() {
            self.end_block();
            self.emit();
        }
    }

    // ---- preformatted text ----

    /// Preformatted block.
    pub fn on_preformat(&mut self, text: &str) {
        if !self.begin() {
            return;
        }
        self.close_typefaces();
        self.close_heading();
        self.ensure_block();
        self.flush_text();
        self.push_content(Event::Preformat(text.trim().to_string()));
        self.emit();
    }

    /// Inline code.
    pub fn on_preformat_inline(&mut self, text: &str) {
        if !self.begin() {
            return;
        }
        if self.typefaces.contains(Typeface::Code) {
            self.text.push(text);
        } else {
            self.open_typeface(Typeface::Code);
            self.text.push(text);
            self.close_typeface(Typeface::Code);
        }
        self.emit();
    }

    // ---- links and images ----

    /// Bracketed link.
    pub fn on_link(&mut self, target: &str, description: Option<&str>) {
        if !self.begin() {
            return;
        }
        let target = target.trim();
        let description = description.map(str::trim).filter(|d| !d.is_empty());
        if target.is_empty() {
            self.report(DiagnosticKind::UnresolvedLink, "link without target");
            self.text.push(&format!("[{}]", description.unwrap_or_default()));
            self.emit();
            return;
        }
        self.ensure_block();
        self.flush_text();
        let description = description.map(str::to_string);
        let event = if is_absolute_url(target) {
            Event::ExternalLink {
                url: target.to_string(),
                description,
            }
        } else {
            Event::InternalLink {
                target: target.to_string(),
                description,
            }
        };
        self.push_content(event);
        self.emit();
    }

    /// URL appearing in running text.
    pub fn on_bare_link(&mut self, url: &str) {
        if !self.begin() {
            return;
        }
        if is_absolute_url(url) {
            self.ensure_block();
            self.flush_text();
            self.push_content(Event::ExternalLink {
                url: url.to_string(),
                description: None,
            });
        } else {
            self.text.push(url);
        }
        self.emit();
    }

    /// Image URL.
    pub fn on_image(&mut self, url: &str) {
        if !self.begin() {
            return;
        }
        if is_absolute_url(url) {
            self.ensure_block();
            self.flush_text();
            self.push_content(Event::Image(url.to_string()));
        } else {
            self.text.push(url);
        }
        self.emit();
    }

    // ---- other ----

    /// Table of contents directive with its depth as written.
    pub fn on_table_of_contents(&mut self, depth: &str) {
        if !self.begin() {
            return;
        }
        let depth = match depth.trim().parse::<i64>() {
            Ok(d) if (1..=6).contains(&d) => d as u8,
            Ok(d) => {
                self.report(
                    DiagnosticKind::InvalidTocDepth,
                    format!("table of contents depth {} out of range", d),
                );
                d.clamp(1, 6) as u8
            }
            Err(_) => {
                self.report(
                    DiagnosticKind::InvalidTocDepth,
                    format!("table of contents depth {:?} is not a number", depth),
                );
                1
            }
        };
        self.ensure_block();
        self.flush_text();
        self.push_content(Event::TableOfContents(depth));
        self.emit();
    }

    /// Page property.
    pub fn on_property(&mut self, kind: PropertyKind, value: &str) {
        if !self.begin() {
            return;
        }
        if self.content_seen || !self.text.is_blank() {
            self.report(
                DiagnosticKind::LateProperty,
                format!("#{} after page content", kind.keyword()),
            );
        }
        if kind == PropertyKind::Labels {
            for label in value.split(',').map(str::trim).filter(|l| !l.is_empty()) {
                self.pending.push(Event::Property(kind, label.to_string()));
            }
        } else {
            self.pending.push(Event::Property(kind, value.trim().to_string()));
        }
        self.emit();
    }

    // ---- internals ----

    /// Auto-start the document. Returns `false` once it has ended.
    fn begin(&mut self) -> bool {
        match self.phase {
            Phase::Fresh => {
                self.pending.push(Event::DocumentStart);
                self.phase = Phase::Open;
                true
            }
            Phase::Open => true,
            Phase::Ended => {
                self.report(DiagnosticKind::UnexpectedToken, "token after document end");
                false
            }
        }
    }

    fn emit(&mut self) {
        let mut events = std::mem::take(&mut self.pending);
        for event in &events {
            self.observe(event);
            event.dispatch(&mut self.wem);
        }
        events.clear();
        self.pending = events;
    }

    /// Keep track of heading titles and whether content has started.
    fn observe(&mut self, event: &Event) {
        match event {
            Event::DocumentStart | Event::Property(..) => {}
            Event::HeadingStart(_) => {
                self.in_heading = true;
                self.heading_title.clear();
                self.content_seen = true;
            }
            Event::HeadingEnd(level) => {
                self.in_heading = false;
                let parents = level.depth().saturating_sub(1);
                self.titles.truncate(parents);
                self.titles.resize(parents, String::new());
                self.titles.push(self.heading_title.trim().to_string());
            }
            Event::Text(text) if self.in_heading => self.heading_title.push_str(text),
            Event::InternalLink {
                target,
                description,
            } if self.in_heading => self
                .heading_title
                .push_str(description.as_deref().unwrap_or(target)),
            Event::ExternalLink { url, description } if self.in_heading => self
                .heading_title
                .push_str(description.as_deref().unwrap_or(url)),
            _ => self.content_seen = true,
        }
    }

    fn section_path(&self) -> String {
        let depth = self.sections.current().depth().min(self.titles.len());
        self.titles[..depth]
            .iter()
            .filter(|t| !t.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    fn push_content(&mut self, event: Event) {
        self.heading_fresh = false;
        self.pending.push(event);
    }

    fn block_open(&self) -> bool {
        if self.tables.is_open() {
            self.tables.is_cell_open()
        } else {
            self.sections.heading().is_some() || self.lists.is_open() || self.paragraph_open
        }
    }

    /// Make sure content has a container to go into.
    fn ensure_block(&mut self) {
        if self.tables.is_open() {
            self.tables.ensure_cell(&mut self.pending);
        } else if self.sections.heading().is_none() && !self.lists.is_open() {
            self.ensure_paragraph();
        }
    }

    fn ensure_paragraph(&mut self) {
        if !self.paragraph_open {
            self.pending.push(Event::ParagraphStart);
            self.paragraph_open = true;
        }
    }

    fn close_paragraph(&mut self) {
        if self.paragraph_open {
            self.pending.push(Event::ParagraphEnd);
            self.paragraph_open = false;
        }
    }

    /// Emit buffered text into the current block.
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        if self.text.is_blank() && !self.block_open() {
            self.text.clear();
            return;
        }
        self.ensure_block();
        let mut text = self.text.take();
        if self.sections.heading().is_some() && self.heading_fresh {
            text = text.trim_start().to_string();
            if text.is_empty() {
                return;
            }
        }
        self.push_content(Event::Text(text));
    }

    fn open_typeface(&mut self, kind: Typeface) {
        self.flush_text();
        self.ensure_block();
        if self.typefaces.start(kind, &mut self.pending) {
            self.heading_fresh = false;
        }
    }

    fn close_typeface(&mut self, kind: Typeface) {
        self.flush_text();
        if let Some(others) = self.typefaces.close_to(kind, &mut self.pending) {
            if others > 0 {
                self.report(
                    DiagnosticKind::TypefaceMismatch,
                    format!(
                        "{} closed with {} inner typeface(s) open",
                        kind.name(),
                        others
                    ),
                );
            }
        }
    }

    /// Close all typefaces at a block boundary.
    fn close_typefaces(&mut self) {
        if self.typefaces.is_empty() {
            return;
        }
        self.flush_text();
        let closed = self.typefaces.close_all(&mut self.pending);
        self.report(
            DiagnosticKind::UnclosedTypeface,
            format!("{} typeface(s) closed at block boundary", closed),
        );
    }

    fn close_lists(&mut self) {
        if self.lists.is_open() {
            self.close_typefaces();
            self.flush_text();
            self.lists.close_all(&mut self.pending);
        }
    }

    fn close_table(&mut self) {
        if self.tables.is_open() {
            self.close_typefaces();
            self.flush_text();
            self.tables.close(&mut self.pending);
        }
    }

    /// Close the open heading, removing its closing marker from the text.
    fn close_heading(&mut self) {
        let Some(level) = self.sections.heading() else {
            return;
        };
        let (stripped, symmetric) = strip_closing_marker(&self.text.take(), level);
        if !symmetric {
            self.report(
                DiagnosticKind::AsymmetricHeading,
                format!("closing marker does not match level {}", level.depth()),
            );
        }
        self.text.replace(stripped.trim_end().to_string());
        self.close_typefaces();
        self.flush_text();
        self.sections.close_heading(&mut self.pending);
    }

    /// Close typefaces, lists, table, heading and paragraph.
    fn end_block(&mut self) {
        self.close_heading();
        self.close_typefaces();
        self.close_lists();
        self.close_table();
        self.flush_text();
        self.close_paragraph();
    }
}
