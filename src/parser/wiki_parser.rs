//! Wiki page parser.

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::{Document, DocumentBuilder};
use crate::wem::WikiEventModel;

use super::diagnostic::Diagnostic;
use super::lexer::tokenize;
use super::options::ParseOptions;
use super::visitor::Visitor;

/// Wiki page parser.
///
/// Holds the page source and drives the lexer, the [`Visitor`] and an event
/// consumer.
#[derive(Debug, Clone)]
pub struct WikiParser {
    source: String,
    options: ParseOptions,
}

impl WikiParser {
    /// Open a wiki file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a wiki file with custom options.
    ///
    /// The file name becomes the source name unless one is set.
    pub fn open_with_options<P: AsRef<Path>>(path: P, mut options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        if options.source_name.is_none() {
            options.source_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }
        Self::from_bytes_with_options(&bytes, options)
    }

    /// Create a parser for wiki text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: text.into(),
            options: ParseOptions::default(),
        }
    }

    /// Create a parser for UTF-8 encoded bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser for UTF-8 encoded bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let source = String::from_utf8(data.to_vec())?;
        Ok(Self { source, options })
    }

    /// Create a parser reading everything from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser reading everything from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Replace the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// The parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// The page source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse the page into a document tree.
    pub fn parse(&self) -> Result<Document> {
        self.parse_with_diagnostics().map(|(doc, _)| doc)
    }

    /// Parse the page into a document tree, also returning the diagnostics
    /// of recovered problems.
    pub fn parse_with_diagnostics(&self) -> Result<(Document, Vec<Diagnostic>)> {
        let (builder, diagnostics) = self.run(DocumentBuilder::new())?;
        let doc = builder.finish()?;
        log::debug!(
            "parsed {}: {} sections, {} diagnostics",
            self.options.source_name.as_deref().unwrap_or("<text>"),
            doc.sections().len(),
            diagnostics.len()
        );
        Ok((doc, diagnostics))
    }

    /// Stream the page's events into a consumer.
    pub fn parse_into<W: WikiEventModel>(&self, wem: W) -> Result<Vec<Diagnostic>> {
        self.run(wem).map(|(_, diagnostics)| diagnostics)
    }

    fn run<W: WikiEventModel>(&self, wem: W) -> Result<(W, Vec<Diagnostic>)> {
        let mut visitor = Visitor::with_options(wem, &self.options);
        tokenize(&self.source, &mut visitor);
        visitor.finish()
    }
}
