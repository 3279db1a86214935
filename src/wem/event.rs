//! Owned wiki events, recording and balance checking.

use super::{forward_as_events, WikiEventModel};
use crate::error::{Error, Result};
use crate::model::{Level, ListKind, PropertyKind, Typeface};
use std::fmt;

/// A single wiki event as an owned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DocumentStart,
    DocumentEnd,
    SectionStart,
    SectionEnd,
    HeadingStart(Level),
    HeadingEnd(Level),
    ParagraphStart,
    ParagraphEnd,
    TableStart,
    TableEnd,
    TableBodyStart,
    TableBodyEnd,
    TableRowStart,
    TableRowEnd,
    TableCellStart,
    TableCellEnd,
    TypefaceStart(Typeface),
    TypefaceEnd(Typeface),
    ListStart(ListKind),
    ListEnd(ListKind),
    ListEntryStart,
    ListEntryEnd,
    Text(String),
    Preformat(String),
    Divider,
    NewLine,
    Image(String),
    InternalLink {
        target: String,
        description: Option<String>,
    },
    ExternalLink {
        url: String,
        description: Option<String>,
    },
    TableOfContents(u8),
    Property(PropertyKind, String),
}

/// A paired structure opened by a start event and closed by an end event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Document,
    Section,
    Heading(Level),
    Paragraph,
    Table,
    TableBody,
    TableRow,
    TableCell,
    Typeface(Typeface),
    List(ListKind),
    ListEntry,
}

impl Event {
    /// Call the matching method on a consumer.
    pub fn dispatch<W: WikiEventModel + ?Sized>(&self, wem: &mut W) {
        match self {
            Event::DocumentStart => wem.document_start(),
            Event::DocumentEnd => wem.document_end(),
            Event::SectionStart => wem.section_start(),
            Event::SectionEnd => wem.section_end(),
            Event::HeadingStart(level) => wem.heading_start(*level),
            Event::HeadingEnd(level) => wem.heading_end(*level),
            Event::ParagraphStart => wem.paragraph_start(),
            Event::ParagraphEnd => wem.paragraph_end(),
            Event::TableStart => wem.table_start(),
            Event::TableEnd => wem.table_end(),
            Event::TableBodyStart => wem.table_body_start(),
            Event::TableBodyEnd => wem.table_body_end(),
            Event::TableRowStart => wem.table_row_start(),
            Event::TableRowEnd => wem.table_row_end(),
            Event::TableCellStart => wem.table_cell_start(),
            Event::TableCellEnd => wem.table_cell_end(),
            Event::TypefaceStart(kind) => wem.typeface_start(*kind),
            Event::TypefaceEnd(kind) => wem.typeface_end(*kind),
            Event::ListStart(ListKind::Bulleted) => wem.list_bulleted_start(),
            Event::ListStart(ListKind::Numbered) => wem.list_numbered_start(),
            Event::ListEnd(ListKind::Bulleted) => wem.list_bulleted_end(),
            Event::ListEnd(ListKind::Numbered) => wem.list_numbered_end(),
            Event::ListEntryStart => wem.list_entry_start(),
            Event::ListEntryEnd => wem.list_entry_end(),
            Event::Text(text) => wem.on_text(text),
            Event::Preformat(text) => wem.on_preformat(text),
            Event::Divider => wem.on_divider(),
            Event::NewLine => wem.on_new_line(),
            Event::Image(url) => wem.on_image(url),
            Event::InternalLink {
                target,
                description,
            } => wem.on_internal_link(target, description.as_deref()),
            Event::ExternalLink { url, description } => {
                wem.on_external_link(url, description.as_deref())
            }
            Event::TableOfContents(depth) => wem.on_table_of_contents(*depth),
            Event::Property(kind, value) => wem.on_property(*kind, value),
        }
    }

    /// The scope this event opens, if it is a start event.
    pub fn opens(&self) -> Option<Scope> {
        Some(match self {
            Event::DocumentStart => Scope::Document,
            Event::SectionStart => Scope::Section,
            Event::HeadingStart(level) => Scope::Heading(*level),
            Event::ParagraphStart => Scope::Paragraph,
            Event::TableStart => Scope::Table,
            Event::TableBodyStart => Scope::TableBody,
            Event::TableRowStart => Scope::TableRow,
            Event::TableCellStart => Scope::TableCell,
            Event::TypefaceStart(kind) => Scope::Typeface(*kind),
            Event::ListStart(kind) => Scope::List(*kind),
            Event::ListEntryStart => Scope::ListEntry,
            _ => return None,
        })
    }

    /// The scope this event closes, if it is an end event.
    pub fn closes(&self) -> Option<Scope> {
        Some(match self {
            Event::DocumentEnd => Scope::Document,
            Event::SectionEnd => Scope::Section,
            Event::HeadingEnd(level) => Scope::Heading(*level),
            Event::ParagraphEnd => Scope::Paragraph,
            Event::TableEnd => Scope::Table,
            Event::TableBodyEnd => Scope::TableBody,
            Event::TableRowEnd => Scope::TableRow,
            Event::TableCellEnd => Scope::TableCell,
            Event::TypefaceEnd(kind) => Scope::Typeface(*kind),
            Event::ListEnd(kind) => Scope::List(*kind),
            Event::ListEntryEnd => Scope::ListEntry,
            _ => return None,
        })
    }

    /// Whether the event carries content rather than structure.
    pub fn is_atomic(&self) -> bool {
        self.opens().is_none() && self.closes().is_none()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::DocumentStart => write!(f, "document start"),
            Event::DocumentEnd => write!(f, "document end"),
            Event::SectionStart => write!(f, "section start"),
            Event::SectionEnd => write!(f, "section end"),
            Event::HeadingStart(level) => write!(f, "heading start {:?}", level),
            Event::HeadingEnd(level) => write!(f, "heading end {:?}", level),
            Event::ParagraphStart => write!(f, "paragraph start"),
            Event::ParagraphEnd => write!(f, "paragraph end"),
            Event::TableStart => write!(f, "table start"),
            Event::TableEnd => write!(f, "table end"),
            Event::TableBodyStart => write!(f, "table body start"),
            Event::TableBodyEnd => write!(f, "table body end"),
            Event::TableRowStart => write!(f, "table row start"),
            Event::TableRowEnd => write!(f, "table row end"),
            Event::TableCellStart => write!(f, "table cell start"),
            Event::TableCellEnd => write!(f, "table cell end"),
            Event::TypefaceStart(kind) => write!(f, "typeface start {}", kind.name()),
            Event::TypefaceEnd(kind) => write!(f, "typeface end {}", kind.name()),
            Event::ListStart(ListKind::Bulleted) => write!(f, "bulleted list start"),
            Event::ListStart(ListKind::Numbered) => write!(f, "numbered list start"),
            Event::ListEnd(ListKind::Bulleted) => write!(f, "bulleted list end"),
            Event::ListEnd(ListKind::Numbered) => write!(f, "numbered list end"),
            Event::ListEntryStart => write!(f, "list entry start"),
            Event::ListEntryEnd => write!(f, "list entry end"),
            Event::Text(text) => write!(f, "text {:?}", text),
            Event::Preformat(text) => write!(f, "preformat {:?}", text),
            Event::Divider => write!(f, "divider"),
            Event::NewLine => write!(f, "new line"),
            Event::Image(url) => write!(f, "image {}", url),
            Event::InternalLink {
                target,
                description,
            } => match description {
                Some(d) => write!(f, "internal link {} {:?}", target, d),
                None => write!(f, "internal link {}", target),
            },
            Event::ExternalLink { url, description } => match description {
                Some(d) => write!(f, "external link {} {:?}", url, d),
                None => write!(f, "external link {}", url),
            },
            Event::TableOfContents(depth) => write!(f, "table of contents {}", depth),
            Event::Property(kind, value) => write!(f, "property {} {:?}", kind.keyword(), value),
        }
    }
}

/// Consumer that records every event it receives.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
}

impl EventRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in arrival order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the recorded events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Replay the recorded events into another consumer.
    pub fn replay<W: WikiEventModel + ?Sized>(&self, wem: &mut W) {
        for event in &self.events {
            event.dispatch(wem);
        }
    }

    fn on_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

impl WikiEventModel for EventRecorder {
    forward_as_events!();
}

/// Verify that an event stream is one well-nested document.
///
/// Every start must be matched by the end of the same scope in reverse
/// order, content must appear inside the document, and nothing may follow
/// the document end.
pub fn check_balance(events: &[Event]) -> Result<()> {
    let mut stack: Vec<Scope> = Vec::new();
    let mut finished = false;

    for (index, event) in events.iter().enumerate() {
        if finished {
            return Err(Error::EventStream(format!(
                "event {} ({}) after document end",
                index, event
            )));
        }

        if let Some(scope) = event.opens() {
            if stack.is_empty() && scope != Scope::Document {
                return Err(Error::EventStream(format!(
                    "event {} ({}) outside of the document",
                    index, event
                )));
            }
            if !stack.is_empty() && scope == Scope::Document {
                return Err(Error::EventStream(format!(
                    "event {} starts a nested document",
                    index
                )));
            }
            stack.push(scope);
        } else if let Some(scope) = event.closes() {
            match stack.pop() {
                Some(open) if open == scope => {
                    if scope == Scope::Document {
                        finished = true;
                    }
                }
                Some(open) => {
                    return Err(Error::EventStream(format!(
                        "event {} ({}) closes {:?} while {:?} is open",
                        index, event, scope, open
                    )));
                }
                None => {
                    return Err(Error::EventStream(format!(
                        "event {} ({}) has no matching start",
                        index, event
                    )));
                }
            }
        } else if stack.is_empty() {
            return Err(Error::EventStream(format!(
                "event {} ({}) outside of the document",
                index, event
            )));
        }
    }

    if !stack.is_empty() {
        return Err(Error::EventStream(format!(
            "{} scopes left open: {:?}",
            stack.len(),
            stack
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Vec<Event> {
        vec![
            Event::ParagraphStart,
            Event::Text(text.to_string()),
            Event::ParagraphEnd,
        ]
    }

    #[test]
    fn test_balanced_stream() {
        let mut events = vec![Event::DocumentStart];
        events.extend(paragraph("a"));
        events.push(Event::DocumentEnd);
        assert!(check_balance(&events).is_ok());
    }

    #[test]
    fn test_crossed_scopes_rejected() {
        let events = vec![
            Event::DocumentStart,
            Event::ParagraphStart,
            Event::TypefaceStart(Typeface::Bold),
            Event::ParagraphEnd,
            Event::TypefaceEnd(Typeface::Bold),
            Event::DocumentEnd,
        ];
        let err = check_balance(&events).unwrap_err();
        assert!(err.to_string().contains("while"));
    }

    #[test]
    fn test_wrong_list_kind_rejected() {
        let events = vec![
            Event::DocumentStart,
            Event::ParagraphStart,
            Event::ListStart(ListKind::Numbered),
            Event::ListEnd(ListKind::Bulleted),
            Event::ParagraphEnd,
            Event::DocumentEnd,
        ];
        assert!(check_balance(&events).is_err());
    }

    #[test]
    fn test_unclosed_and_trailing_rejected() {
        assert!(check_balance(&[Event::DocumentStart, Event::SectionStart]).is_err());
        assert!(check_balance(&[Event::Text("x".into())]).is_err());
        assert!(check_balance(&[
            Event::DocumentStart,
            Event::DocumentEnd,
            Event::Divider
        ])
        .is_err());
    }

    #[test]
    fn test_recorder_replay() {
        let mut recorder = EventRecorder::new();
        recorder.document_start();
        recorder.list_numbered_start();
        recorder.on_internal_link("WikiPage", Some("desc"));
        recorder.list_numbered_end();
        recorder.document_end();

        let mut copy = EventRecorder::new();
        recorder.replay(&mut copy);
        assert_eq!(copy.events(), recorder.events());
        assert_eq!(copy.events()[1], Event::ListStart(ListKind::Numbered));
    }

    #[test]
    fn test_event_display() {
        assert_eq!(Event::Text("a b".into()).to_string(), "text \"a b\"");
        assert_eq!(
            Event::TypefaceStart(Typeface::Code).to_string(),
            "typeface start code"
        );
    }
}
