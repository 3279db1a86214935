//! Wiki page converter implementation.

use crate::error::Result;
use crate::model::{Document, DocumentBuilder};
use crate::parser::WikiParser;
use crate::render::{to_json, to_latex, to_text, DocumentStats, HtmlRenderer, JsonFormat};
use crate::wem::CompositeWem;
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// Wiki page converter.
///
/// Converts wiki pages to HTML, LaTeX, JSON, or plain text.
#[derive(Debug, Clone, Default)]
pub struct WikiConverter {
    _private: (),
}

impl WikiConverter {
    /// Create a new wiki converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_parser(
        &self,
        parser: WikiParser,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let format = options.output_format;
        let (content, doc, assets) = match format {
            OutputFormat::Html => {
                // Build the tree while the HTML streams out.
                let mut builder = DocumentBuilder::new();
                let mut html = HtmlRenderer::new(options.render.clone());
                {
                    let mut both = CompositeWem::new().with(&mut builder).with(&mut html);
                    parser.parse_into(&mut both)?;
                }
                (html.into_html(), builder.finish()?, Vec::new())
            }
            OutputFormat::Latex => {
                let doc = parser.parse()?;
                let latex = to_latex(&doc, &options.render);
                (latex.content, doc, latex.images)
            }
            OutputFormat::Json => {
                let doc = parser.parse()?;
                (to_json(&doc, JsonFormat::Pretty)?, doc, Vec::new())
            }
            OutputFormat::Text => {
                let doc = parser.parse()?;
                (to_text(&doc), doc, Vec::new())
            }
        };

        Ok(self.finish(content, &doc, options)
            .with_mime_type(format.mime_type())
            .with_assets(assets))
    }

    fn finish(&self, content: String, doc: &Document, options: &ConvertOptions) -> ConvertResult {
        let result = ConvertResult::new(content, doc.properties.clone());
        if options.collect_stats || options.render.collect_stats {
            result.with_stats(DocumentStats::from_document(doc))
        } else {
            result
        }
    }
}

impl DocumentConverter for WikiConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["wiki", "gwiki", "txt"]
    }

    fn name(&self) -> &str {
        "wiki"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = WikiParser::open_with_options(path, options.parse.clone())?;
        self.convert_parser(parser, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = WikiParser::from_bytes_with_options(bytes, options.parse.clone())?;
        self.convert_parser(parser, options)
    }
}
