//! # wikiutil
//!
//! Google Code wiki markup to a structured document tree, HTML and LaTeX.
//!
//! Parsing runs in one streaming pass: a line lexer feeds tokens to the
//! [`Visitor`](parser::Visitor), which reconciles headings, lists, tables and
//! typefaces into a balanced event stream (the [`wem`] module). Any
//! [`WikiEventModel`](wem::WikiEventModel) can consume that stream; the
//! [`DocumentBuilder`](model::DocumentBuilder) turns it into a [`Document`]
//! tree and the [`HtmlRenderer`](render::HtmlRenderer) writes HTML directly.
//!
//! ## Quick Start
//!
//! ```
//! use wikiutil::{parse_str, render};
//!
//! fn main() -> wikiutil::Result<()> {
//!     let doc = parse_str("= Intro =\nSee *WikiSyntax* for details.")?;
//!
//!     let options = render::RenderOptions::default().with_full_document(false);
//!     let html = render::to_html(&doc, &options);
//!     assert!(html.starts_with("<h1 id=\"intro\">"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Event stream**: balanced start/end events for every construct
//! - **Document tree**: sections nested by heading level, serde support
//! - **Output formats**: HTML, LaTeX, JSON, plain text
//! - **Diagnostics**: malformed markup is recovered and reported
//! - **Books**: index pages drive multi-page LaTeX conversion

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod wem;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, IndexConverter,
    OutputFormat,
};
pub use error::{Error, Result};
pub use model::{
    Document, Inline, Level, List, ListEntry, ListKind, Paragraph, Property, PropertyKind, Section,
    Table, TableCell, TableRow, Typeface,
};
pub use parser::{Diagnostic, DiagnosticKind, ErrorMode, ParseOptions, WikiParser};
pub use render::{JsonFormat, LatexOutput, RenderOptions};
pub use wem::{Event, WikiEventModel};

use std::io::Read;
use std::path::Path;

/// Parse wiki text and return a structured document.
///
/// # Example
///
/// ```
/// let doc = wikiutil::parse_str("= Title =\ntext").unwrap();
/// assert_eq!(doc.sections()[0].title(), "Title");
/// ```
pub fn parse_str(text: &str) -> Result<Document> {
    WikiParser::from_text(text).parse()
}

/// Parse wiki text with custom options.
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<Document> {
    WikiParser::from_text(text).with_options(options).parse()
}

/// Parse a wiki page file.
///
/// # Example
///
/// ```no_run
/// use wikiutil::parse_file;
///
/// let doc = parse_file("Home.wiki").unwrap();
/// println!("Sections: {}", doc.sections().len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = WikiParser::open(path)?;
    parser.parse()
}

/// Parse a wiki page file with custom options.
///
/// # Example
///
/// ```no_run
/// use wikiutil::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict().wiki_words(false);
/// let doc = parse_file_with_options("Home.wiki", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = WikiParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a wiki page from UTF-8 bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = WikiParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a wiki page from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = WikiParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a wiki page from a reader.
///
/// # Example
///
/// ```no_run
/// use wikiutil::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("Home.wiki").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = WikiParser::from_reader(reader)?;
    parser.parse()
}

/// Parse a wiki page from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    let parser = WikiParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Extract plain text from a wiki page file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Convert a wiki page file to HTML.
///
/// # Example
///
/// ```no_run
/// let html = wikiutil::to_html("Home.wiki").unwrap();
/// std::fs::write("Home.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    to_html_with_options(path, &RenderOptions::default())
}

/// Convert a wiki page file to HTML with custom options.
///
/// The page is rendered while it is parsed, without building a tree.
pub fn to_html_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let parser = WikiParser::open(path)?;
    let mut renderer = render::HtmlRenderer::new(options.clone());
    parser.parse_into(&mut renderer)?;
    Ok(renderer.into_html())
}

/// Convert a wiki page file to LaTeX.
///
/// # Example
///
/// ```no_run
/// use wikiutil::{to_latex, RenderOptions};
///
/// let options = RenderOptions::new().with_structure_level(1);
/// let latex = to_latex("Home.wiki", &options).unwrap();
/// for image in &latex.images {
///     println!("{} -> {}", image.url, image.file_name);
/// }
/// ```
pub fn to_latex<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<LatexOutput> {
    let doc = parse_file(path)?;
    Ok(render::to_latex(&doc, options))
}

/// Convert a wiki page file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Convert a wiki page file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_text(&doc))
}

/// Builder for parsing and converting wiki pages.
///
/// # Example
///
/// ```
/// use wikiutil::WikiUtil;
///
/// let html = WikiUtil::new()
///     .fragment()
///     .with_link_suffix(".html")
///     .parse_str("See WikiSyntax.")?
///     .to_html();
/// assert_eq!(html, "<p>See <a href=\"WikiSyntax.html\">WikiSyntax</a>.</p>");
/// # Ok::<(), wikiutil::Error>(())
/// ```
pub struct WikiUtil {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl WikiUtil {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Recover from malformed markup (default).
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Fail on the first malformed construct.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Enable or disable CamelCase wiki-word links.
    pub fn wiki_words(mut self, enabled: bool) -> Self {
        self.parse_options = self.parse_options.wiki_words(enabled);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Render HTML without the `<html><body>` wrapper.
    pub fn fragment(mut self) -> Self {
        self.render_options = self.render_options.with_full_document(false);
        self
    }

    /// Set the internal link prefix.
    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_link_prefix(prefix);
        self
    }

    /// Set the internal link suffix.
    pub fn with_link_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_link_suffix(suffix);
        self
    }

    /// Set the LaTeX structure level of the page title.
    pub fn with_structure_level(mut self, level: usize) -> Self {
        self.render_options = self.render_options.with_structure_level(level);
        self
    }

    /// Set the page title used by LaTeX output.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Parse a wiki page file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<WikiUtilResult> {
        let parser = WikiParser::open_with_options(path, self.parse_options.clone())?;
        self.finish(parser)
    }

    /// Parse wiki text.
    pub fn parse_str(self, text: &str) -> Result<WikiUtilResult> {
        let parser = WikiParser::from_text(text).with_options(self.parse_options.clone());
        self.finish(parser)
    }

    /// Parse a wiki page from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<WikiUtilResult> {
        let parser = WikiParser::from_bytes_with_options(data, self.parse_options.clone())?;
        self.finish(parser)
    }

    fn finish(self, parser: WikiParser) -> Result<WikiUtilResult> {
        let (document, diagnostics) = parser.parse_with_diagnostics()?;
        Ok(WikiUtilResult {
            document,
            diagnostics,
            render_options: self.render_options,
        })
    }
}

impl Default for WikiUtil {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a wiki page.
pub struct WikiUtilResult {
    /// The parsed document
    pub document: Document,
    /// Recovered markup problems
    pub diagnostics: Vec<Diagnostic>,
    /// Render options to use
    render_options: RenderOptions,
}

impl WikiUtilResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to LaTeX.
    pub fn to_latex(&self) -> LatexOutput {
        render::to_latex(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_wikiutil_builder() {
        let builder = WikiUtil::new().strict().fragment().with_link_suffix(".html");

        assert!(matches!(
            builder.parse_options.error_mode,
            parser::ErrorMode::Strict
        ));
        assert!(!builder.render_options.full_document);
        assert_eq!(builder.render_options.link_suffix, ".html");
    }

    #[test]
    fn test_wikiutil_builder_default() {
        let builder = WikiUtil::default();
        assert!(builder.render_options.full_document);
        assert!(builder.parse_options.parallel);
        assert!(!WikiUtil::new().sequential().parse_options.parallel);
    }

    #[test]
    fn test_wiki_words_toggle() {
        let result = WikiUtil::new().wiki_words(false).parse_str("WikiPage").unwrap();
        assert_eq!(result.document.root.paragraphs[0].content, vec![Inline::text("WikiPage")]);
    }

    #[test]
    fn test_result_outputs() {
        let result = WikiUtil::new()
            .fragment()
            .with_title("Manual")
            .parse_str("= Intro =\n*hi*")
            .unwrap();

        assert!(result.diagnostics().is_empty());
        assert!(result.to_html().starts_with("<h1 id=\"intro\">"));
        assert!(result.to_latex().content.starts_with("\\part{Manual}"));
        assert_eq!(result.to_text(), "Intro\n\nhi");
        assert!(result.to_json(JsonFormat::Compact).is_ok());
    }

    #[test]
    fn test_diagnostics_are_kept() {
        let result = WikiUtil::new().parse_str("= Title ==").unwrap();
        assert_eq!(result.diagnostics().len(), 1);
        assert!(WikiUtil::new().strict().parse_str("= Title ==").is_err());
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let result = parse_bytes(&[0xC3, 0x28]);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_parse_bytes_strips_bom() {
        let doc = parse_bytes(b"\xEF\xBB\xBF= Title =").unwrap();
        assert_eq!(doc.sections()[0].title(), "Title");
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file("/nonexistent/Page.wiki");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_file_conversions() {
        let mut file = tempfile::Builder::new().suffix(".wiki").tempfile().unwrap();
        write!(file, "#summary Demo\n= Intro =\ntext").unwrap();

        let html = to_html(file.path()).unwrap();
        assert!(html.contains("<div class=\"summary\">Demo</div>"));

        let latex = to_latex(file.path(), &RenderOptions::default()).unwrap();
        assert!(latex.content.starts_with("\\part{Demo}"));

        assert_eq!(to_text(file.path()).unwrap(), "Intro\n\ntext");
        assert!(to_json(file.path(), JsonFormat::Pretty).unwrap().contains("\"summary\""));
        assert_eq!(extract_text(file.path()).unwrap(), "Intro\n\ntext");
    }

    #[test]
    fn test_parse_str_with_options() {
        let doc =
            parse_str_with_options("WikiPage", ParseOptions::new().wiki_words(false)).unwrap();
        assert_eq!(doc.plain_text(), "WikiPage");
        let doc = parse_reader("= A =".as_bytes()).unwrap();
        assert_eq!(doc.sections().len(), 1);
    }
}
