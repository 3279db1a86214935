//! Page converter module providing a plugin architecture for input formats.
//!
//! Converters are registered for file extensions and selected by the
//! extension of the path being converted.
//!
//! # Example
//!
//! ```no_run
//! use wikiutil::convert::{ConverterRegistry, ConvertOptions, OutputFormat, WikiConverter};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! fn main() -> wikiutil::Result<()> {
//!     let mut registry = ConverterRegistry::new();
//!     registry.register(Arc::new(WikiConverter::new()));
//!
//!     let options = ConvertOptions::default().with_format(OutputFormat::Latex);
//!     let result = registry.convert(Path::new("Home.wiki"), &options)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod index;
mod wiki;

pub use index::{
    DirectorySource, IndexConverter, IndexEntry, IndexResult, IndexedPage, MemorySource,
    PageFailure, PageSource,
};
pub use wiki::WikiConverter;

use crate::error::{Error, Result};
use crate::model::Property;
use crate::parser::ParseOptions;
use crate::render::{DocumentStats, ImageAsset, RenderOptions};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for page conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// HTML
    #[default]
    Html,

    /// LaTeX source
    Latex,

    /// JSON structure
    Json,

    /// Plain text
    Text,
}

impl OutputFormat {
    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Latex => "application/x-latex",
            OutputFormat::Json => "application/json",
            OutputFormat::Text => "text/plain",
        }
    }
}

/// Result of page conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Page properties
    pub properties: Vec<Property>,

    /// Page statistics (if collected)
    pub stats: Option<DocumentStats>,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Images the output refers to
    pub assets: Vec<ImageAsset>,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, properties: Vec<Property>) -> Self {
        Self {
            content,
            properties,
            stats: None,
            mime_type: "text/html",
            assets: Vec::new(),
        }
    }

    /// Set page statistics.
    pub fn with_stats(mut self, stats: DocumentStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Set referenced images.
    pub fn with_assets(mut self, assets: Vec<ImageAsset>) -> Self {
        self.assets = assets;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for page converters.
///
/// Implement this trait to add support for a new input format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["wiki"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for page converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting pages.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default converters (wiki).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(WikiConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name.insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.converters.keys().map(|s| s.as_str()).collect()
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
