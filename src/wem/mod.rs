//! Wiki Event Model.
//!
//! The event model is the contract between the markup [`Visitor`] and
//! everything that consumes a parsed page. Structure is reported as paired
//! start/end notifications (document, section, heading, paragraph, table,
//! table body, table row, table cell, lists, list entries, typefaces) and
//! leaf content as atomic notifications (text, links, images, ...).
//!
//! Producers guarantee that every start has exactly one matching end and
//! that ends occur in reverse order of their starts. [`check_balance`]
//! verifies that for a recorded stream.
//!
//! Consumers implement [`WikiEventModel`]; every method has a no-op
//! default, so a consumer only overrides what it cares about. Decorators
//! such as [`DebugWem`] wrap another consumer and forward each event.
//!
//! # Example
//!
//! ```
//! use wikiutil::wem::{Event, EventRecorder, WikiEventModel};
//!
//! let mut recorder = EventRecorder::new();
//! recorder.document_start();
//! recorder.paragraph_start();
//! recorder.on_text("hello");
//! recorder.paragraph_end();
//! recorder.document_end();
//!
//! assert_eq!(recorder.events()[2], Event::Text("hello".to_string()));
//! assert!(wikiutil::wem::check_balance(recorder.events()).is_ok());
//! ```
//!
//! [`Visitor`]: crate::parser::Visitor

mod composite;
mod debug;
mod event;

pub use composite::CompositeWem;
pub use debug::{format_events, DebugWem, EventFormatter};
pub use event::{check_balance, Event, EventRecorder, Scope};

use crate::model::{Level, PropertyKind, Typeface};

/// Consumer of wiki events.
///
/// All methods default to doing nothing.
pub trait WikiEventModel {
    /// Start of the page.
    fn document_start(&mut self) {}

    /// End of the page.
    fn document_end(&mut self) {}

    /// Start of a section. The heading, if any, follows immediately.
    fn section_start(&mut self) {}

    /// End of a section.
    fn section_end(&mut self) {}

    /// Start of the heading of the current section.
    fn heading_start(&mut self, level: Level) {
        let _ = level;
    }

    /// End of the heading of the current section.
    fn heading_end(&mut self, level: Level) {
        let _ = level;
    }

    /// Start of a paragraph.
    fn paragraph_start(&mut self) {}

    /// End of a paragraph.
    fn paragraph_end(&mut self) {}

    /// Start of a table.
    fn table_start(&mut self) {}

    /// End of a table.
    fn table_end(&mut self) {}

    /// Start of the table body.
    fn table_body_start(&mut self) {}

    /// End of the table body.
    fn table_body_end(&mut self) {}

    /// Start of a table row.
    fn table_row_start(&mut self) {}

    /// End of a table row.
    fn table_row_end(&mut self) {}

    /// Start of a table cell.
    fn table_cell_start(&mut self) {}

    /// End of a table cell.
    fn table_cell_end(&mut self) {}

    /// Start of a typeface span.
    fn typeface_start(&mut self, typeface: Typeface) {
        let _ = typeface;
    }

    /// End of a typeface span.
    fn typeface_end(&mut self, typeface: Typeface) {
        let _ = typeface;
    }

    /// Start of a bulleted list.
    fn list_bulleted_start(&mut self) {}

    /// End of a bulleted list.
    fn list_bulleted_end(&mut self) {}

    /// Start of a numbered list.
    fn list_numbered_start(&mut self) {}

    /// End of a numbered list.
    fn list_numbered_end(&mut self) {}

    /// Start of a list entry.
    fn list_entry_start(&mut self) {}

    /// End of a list entry.
    fn list_entry_end(&mut self) {}

    /// A horizontal divider.
    fn on_divider(&mut self) {}

    /// An explicit line break.
    fn on_new_line(&mut self) {}

    /// Preformatted text.
    fn on_preformat(&mut self, text: &str) {
        let _ = text;
    }

    /// Table of contents listing headings down to `depth`.
    fn on_table_of_contents(&mut self, depth: u8) {
        let _ = depth;
    }

    /// An image with an absolute URL.
    fn on_image(&mut self, url: &str) {
        let _ = url;
    }

    /// A run of literal text.
    fn on_text(&mut self, text: &str) {
        let _ = text;
    }

    /// A link to an absolute URL.
    fn on_external_link(&mut self, url: &str, description: Option<&str>) {
        let _ = (url, description);
    }

    /// A link to another wiki page.
    fn on_internal_link(&mut self, target: &str, description: Option<&str>) {
        let _ = (target, description);
    }

    /// A page property.
    fn on_property(&mut self, kind: PropertyKind, value: &str) {
        let _ = (kind, value);
    }
}

/// Implements every [`WikiEventModel`] method by turning the call into an
/// [`Event`] and handing it to `self.on_event`.
macro_rules! forward_as_events {
    () => {
        fn document_start(&mut self) {
            self.on_event($crate::wem::Event::DocumentStart)
        }
        fn document_end(&mut self) {
            self.on_event($crate::wem::Event::DocumentEnd)
        }
        fn section_start(&mut self) {
            self.on_event($crate::wem::Event::SectionStart)
        }
        fn section_end(&mut self) {
            self.on_event($crate::wem::Event::SectionEnd)
        }
        fn heading_start(&mut self, level: $crate::model::Level) {
            self.on_event($crate::wem::Event::HeadingStart(level))
        }
        fn heading_end(&mut self, level: $crate::model::Level) {
            self.on_event($crate::wem::Event::HeadingEnd(level))
        }
        fn paragraph_start(&mut self) {
            self.on_event($crate::wem::Event::ParagraphStart)
        }
        fn paragraph_end(&mut self) {
            self.on_event($crate::wem::Event::ParagraphEnd)
        }
        fn table_start(&mut self) {
            self.on_event($crate::wem::Event::TableStart)
        }
        fn table_end(&mut self) {
            self.on_event($crate::wem::Event::TableEnd)
        }
        fn table_body_start(&mut self) {
            self.on_event($crate::wem::Event::TableBodyStart)
        }
        fn table_body_end(&mut self) {
            self.on_event($crate::wem::Event::TableBodyEnd)
        }
        fn table_row_start(&mut self) {
            self.on_event($crate::wem::Event::TableRowStart)
        }
        fn table_row_end(&mut self) {
            self.on_event($crate::wem::Event::TableRowEnd)
        }
        fn table_cell_start(&mut self) {
            self.on_event($crate::wem::Event::TableCellStart)
        }
        fn table_cell_end(&mut self) {
            self.on_event($crate::wem::Event::TableCellEnd)
        }
        fn typeface_start(&mut self, typeface: $crate::model::Typeface) {
            self.on_event($crate::wem::Event::TypefaceStart(typeface))
        }
        fn typeface_end(&mut self, typeface: $crate::model::Typeface) {
            self.on_event($crate::wem::Event::TypefaceEnd(typeface))
        }
        fn list_bulleted_start(&mut self) {
            self.on_event($crate::wem::Event::ListStart(
                $crate::model::ListKind::Bulleted,
            ))
        }
        fn list_bulleted_end(&mut self) {
            self.on_event($crate::wem::Event::ListEnd(
                $crate::model::ListKind::Bulleted,
            ))
        }
        fn list_numbered_start(&mut self) {
            self.on_event($crate::wem::Event::ListStart(
                $crate::model::ListKind::Numbered,
            ))
        }
        fn list_numbered_end(&mut self) {
            self.on_event($crate::wem::Event::ListEnd(
                $crate::model::ListKind::Numbered,
            ))
        }
        fn list_entry_start(&mut self) {
            self.on_event($crate::wem::Event::ListEntryStart)
        }
        fn list_entry_end(&mut self) {
            self.on_event($crate::wem::Event::ListEntryEnd)
        }
        fn on_divider(&mut self) {
            self.on_event($crate::wem::Event::Divider)
        }
        fn on_new_line(&mut self) {
            self.on_event($crate::wem::Event::NewLine)
        }
        fn on_preformat(&mut self, text: &str) {
            self.on_event($crate::wem::Event::Preformat(text.to_string()))
        }
        fn on_table_of_contents(&mut self, depth: u8) {
            self.on_event($crate::wem::Event::TableOfContents(depth))
        }
        fn on_image(&mut self, url: &str) {
            self.on_event($crate::wem::Event::Image(url.to_string()))
        }
        fn on_text(&mut self, text: &str) {
            self.on_event($crate::wem::Event::Text(text.to_string()))
        }
        fn on_external_link(&mut self, url: &str, description: Option<&str>) {
            self.on_event($crate::wem::Event::ExternalLink {
                url: url.to_string(),
                description: description.map(str::to_string),
            })
        }
        fn on_internal_link(&mut self, target: &str, description: Option<&str>) {
            self.on_event($crate::wem::Event::InternalLink {
                target: target.to_string(),
                description: description.map(str::to_string),
            })
        }
        fn on_property(&mut self, kind: $crate::model::PropertyKind, value: &str) {
            self.on_event($crate::wem::Event::Property(kind, value.to_string()))
        }
    };
}
pub(crate) use forward_as_events;

macro_rules! delegate_methods {
    ($(fn $name:ident(&mut self $(, $arg:ident: $ty:ty)*);)*) => {
        $(
            fn $name(&mut self $(, $arg: $ty)*) {
                (**self).$name($($arg),*)
            }
        )*
    };
}

macro_rules! delegate_impls {
    ($($methods:tt)*) => {
        impl<W: WikiEventModel + ?Sized> WikiEventModel for &mut W {
            delegate_methods! { $($methods)* }
        }

        impl<W: WikiEventModel + ?Sized> WikiEventModel for Box<W> {
            delegate_methods! { $($methods)* }
        }
    };
}

delegate_impls! {
    fn document_start(&mut self);
    fn document_end(&mut self);
    fn section_start(&mut self);
    fn section_end(&mut self);
    fn heading_start(&mut self, level: Level);
    fn heading_end(&mut self, level: Level);
    fn paragraph_start(&mut self);
    fn paragraph_end(&mut self);
    fn table_start(&mut self);
    fn table_end(&mut self);
    fn table_body_start(&mut self);
    fn table_body_end(&mut self);
    fn table_row_start(&mut self);
    fn table_row_end(&mut self);
    fn table_cell_start(&mut self);
    fn table_cell_end(&mut self);
    fn typeface_start(&mut self, typeface: Typeface);
    fn typeface_end(&mut self, typeface: Typeface);
    fn list_bulleted_start(&mut self);
    fn list_bulleted_end(&mut self);
    fn list_numbered_start(&mut self);
    fn list_numbered_end(&mut self);
    fn list_entry_start(&mut self);
    fn list_entry_end(&mut self);
    fn on_divider(&mut self);
    fn on_new_line(&mut self);
    fn on_preformat(&mut self, text: &str);
    fn on_table_of_contents(&mut self, depth: u8);
    fn on_image(&mut self, url: &str);
    fn on_text(&mut self, text: &str);
    fn on_external_link(&mut self, url: &str, description: Option<&str>);
    fn on_internal_link(&mut self, target: &str, description: Option<&str>);
    fn on_property(&mut self, kind: PropertyKind, value: &str);
}
