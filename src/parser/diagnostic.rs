//! Reports of malformed input that the parser recovered from.

use std::fmt;

/// Kind of recovered problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Heading closing marker does not match the opening marker
    AsymmetricHeading,
    /// A typeface was closed while an inner typeface was still open
    TypefaceMismatch,
    /// Explicit start of a typeface that is already open
    TypefaceAlreadyOpen,
    /// Explicit end of a typeface that is not open
    TypefaceNotOpen,
    /// A block boundary closed open typefaces
    UnclosedTypeface,
    /// A link without target
    UnresolvedLink,
    /// Table of contents depth not a number in 1..=6
    InvalidTocDepth,
    /// Page property after the first content
    LateProperty,
    /// `{{{` without matching `}}}`
    UnterminatedPreformat,
    /// Token after the end of the document
    UnexpectedToken,
}

impl DiagnosticKind {
    /// Short identifier used in log output.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::AsymmetricHeading => "asymmetric-heading",
            DiagnosticKind::TypefaceMismatch => "typeface-mismatch",
            DiagnosticKind::TypefaceAlreadyOpen => "typeface-already-open",
            DiagnosticKind::TypefaceNotOpen => "typeface-not-open",
            DiagnosticKind::UnclosedTypeface => "unclosed-typeface",
            DiagnosticKind::UnresolvedLink => "unresolved-link",
            DiagnosticKind::InvalidTocDepth => "invalid-toc-depth",
            DiagnosticKind::LateProperty => "late-property",
            DiagnosticKind::UnterminatedPreformat => "unterminated-preformat",
            DiagnosticKind::UnexpectedToken => "unexpected-token",
        }
    }
}

/// A recovered problem together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Human readable description
    pub message: String,
    /// Name of the parsed source, if known
    pub source: Option<String>,
    /// 1-based line number, 0 when unknown
    pub line: usize,
    /// Heading path of the section being parsed, empty at page level
    pub section: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{}:", source)?;
        }
        if self.line > 0 {
            write!(f, "{}:", self.line)?;
        }
        if self.source.is_some() || self.line > 0 {
            write!(f, " ")?;
        }
        write!(f, "[{}] {}", self.kind.code(), self.message)?;
        if !self.section.is_empty() {
            write!(f, " (in \"{}\")", self.section)?;
        }
        Ok(())
    }
}
