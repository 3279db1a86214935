//! Wiki markup parsing module.
//!
//! Parsing is split in two layers. The [`lexer`] recognizes tokens in the
//! markup and calls the [`Visitor`], which reconciles them into a balanced
//! event stream. Each reconciliation concern has its own tracker module.

pub mod lexer;
pub mod lists;
pub mod sections;
pub mod tables;
pub mod text;
pub mod typefaces;

mod diagnostic;
mod options;
mod visitor;
mod wiki_parser;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use options::{ErrorMode, ParseOptions};
pub use visitor::{is_absolute_url, Visitor};
pub use wiki_parser::WikiParser;
