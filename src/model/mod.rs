//! Wiki Object Model.
//!
//! This module defines the document tree a parsed page is materialized
//! into. A [`Document`] owns its properties and a root [`Section`]; sections
//! nest by heading level and hold paragraphs of inline content, which in
//! turn may contain lists and tables.
//!
//! Trees are built from an event stream by [`DocumentBuilder`] and turned
//! back into one by [`replay`].

mod builder;
mod document;
mod list;
mod paragraph;
mod replay;
mod section;
mod table;

pub use builder::DocumentBuilder;
pub use document::{Document, Property, PropertyKind};
pub use list::{List, ListEntry, ListKind};
pub use paragraph::{inline_text, Inline, Paragraph, Typeface};
pub use replay::replay;
pub use section::{Level, Section};
pub use table::{Table, TableCell, TableRow};
