//! Integration tests for the converter module.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use wikiutil::convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DirectorySource, DocumentConverter,
    IndexConverter, OutputFormat, WikiConverter,
};
use wikiutil::error::{Error, Result};
use wikiutil::render::{DocumentStats, RenderOptions};
use wikiutil::ParseOptions;

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, _path: &Path, _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted by {}", self.name),
            Vec::new(),
        ))
    }

    fn convert_bytes(&self, _bytes: &[u8], _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted bytes by {}", self.name),
            Vec::new(),
        ))
    }
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();

    assert!(!registry.supports("wiki"));
    assert!(!registry.supports("md"));
}

#[test]
fn test_converter_registry_multiple_converters() {
    let mut registry = ConverterRegistry::new();

    registry.register(Arc::new(WikiConverter::new()));
    registry.register(Arc::new(MockConverter::new(vec!["md", "markdown"], "markdown")));

    assert!(registry.supports("wiki"));
    assert!(registry.supports("MD"));
    assert!(registry.supports("markdown"));

    let converter = registry.get_by_name("Markdown");
    assert!(converter.is_some());
    assert!(converter.unwrap().supports_extension("md"));

    let result = registry
        .convert_bytes(b"x", "md", &ConvertOptions::default())
        .unwrap();
    assert_eq!(result.content, "Converted bytes by markdown");
}

#[test]
fn test_supported_extensions() {
    let registry = ConverterRegistry::with_defaults();
    let mut extensions = registry.supported_extensions();
    extensions.sort();

    assert_eq!(extensions, vec!["gwiki", "txt", "wiki"]);
}

#[test]
fn test_convert_result_methods() {
    let stats = DocumentStats {
        page_count: 1,
        paragraph_count: 20,
        ..Default::default()
    };
    let result = ConvertResult::new("<p>Hi</p>".to_string(), Vec::new())
        .with_stats(stats)
        .with_mime_type("text/html");

    assert_eq!(result.content_len(), 9);
    assert_eq!(result.stats.unwrap().paragraph_count, 20);
    assert_eq!(result.mime_type, "text/html");
    assert!(result.assets.is_empty());
}

#[test]
fn test_output_format_default() {
    assert_eq!(OutputFormat::default(), OutputFormat::Html);
    assert_eq!(OutputFormat::Json.mime_type(), "application/json");
}

#[test]
fn test_registry_converts_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Home.wiki");
    fs::write(&path, "#summary Home page\n= Welcome =\nSee UserGuide.").unwrap();

    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new()
        .with_render_options(RenderOptions::new().with_full_document(false))
        .with_stats(true);
    let result = registry.convert(&path, &options).unwrap();

    assert!(result.content.contains("<h1 id=\"welcome\">Welcome</h1>"));
    assert!(result.content.contains("<a href=\"UserGuide\">UserGuide</a>"));
    assert_eq!(result.properties[0].value, "Home page");
    assert_eq!(result.stats.unwrap().link_count, 1);
}

#[test]
fn test_registry_convert_errors() {
    let registry = ConverterRegistry::with_defaults();

    let result = registry.convert(Path::new("noextension"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::Other(_))));

    let result = registry.convert(Path::new("test.xyz"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::Other(_))));

    let result = registry.convert(Path::new("/nonexistent/Page.wiki"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

fn write_book(root: &Path) {
    fs::write(
        root.join("Index.wiki"),
        "#summary Manual\n= Contents =\n  * [Intro Introduction]\n    * [Setup Setting up]\n  * [Missing]\n  * [Reference]\n",
    )
    .unwrap();
    fs::write(root.join("Intro.wiki"), "= Overview =\nWelcome.").unwrap();
    fs::write(root.join("Setup.wiki"), "||a||b||\nhttp://example.org/shot.png").unwrap();
    fs::write(root.join("Reference.wiki"), "#summary API\n== Calls ==\n  # one").unwrap();
}

#[test]
fn test_index_conversion_from_directory() {
    let pages = tempfile::tempdir().unwrap();
    write_book(pages.path());

    let converter = IndexConverter::new(DirectorySource::new(pages.path()));
    let result = converter.convert("Index").unwrap();

    let converted: Vec<(&str, &str, usize)> = result
        .pages
        .iter()
        .map(|p| (p.entry.page.as_str(), p.file_name.as_str(), p.entry.level))
        .collect();
    assert_eq!(
        converted,
        vec![
            ("Intro", "out0.tex", 0),
            ("Setup", "out1.tex", 1),
            ("Reference", "out2.tex", 0),
        ]
    );
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].entry.page, "Missing");
    assert!(matches!(result.failures[0].error, Error::PageNotFound(_)));

    let intro = &result.pages[0].latex.content;
    assert!(intro.starts_with("\\part{Introduction}\n"));
    assert!(intro.contains("\\chapter{Overview}"));

    let setup = &result.pages[1].latex;
    assert!(setup.content.starts_with("\\chapter{Setting up}\n"));
    assert!(setup.content.contains("\\LTXtable{\\textwidth}{out1_texTABLE0}"));
    assert_eq!(setup.images[0].file_name, "out1_texIMAGE0.png");

    // Without a link description the page summary is the title.
    let reference = &result.pages[2].latex.content;
    assert!(reference.starts_with("\\part{API}\n"));
    assert!(reference.contains("\\section{Calls}"));

    let out = tempfile::tempdir().unwrap();
    result.write_to(out.path()).unwrap();
    assert_eq!(
        fs::read_to_string(out.path().join("content.tex")).unwrap(),
        "\\input{out0}\n\\input{out1}\n\\input{out2}\n"
    );
    assert!(out.path().join("out2.tex").is_file());
    assert!(!out.path().join("out3.tex").exists());
}

#[test]
fn test_index_conversion_sequential_matches_parallel() {
    let pages = tempfile::tempdir().unwrap();
    write_book(pages.path());

    let parallel = IndexConverter::new(DirectorySource::new(pages.path()))
        .convert("Index")
        .unwrap();
    let sequential = IndexConverter::new(DirectorySource::new(pages.path()))
        .with_options(ConvertOptions::new().with_parse_options(ParseOptions::new().sequential()))
        .convert("Index")
        .unwrap();

    let contents = |r: &wikiutil::convert::IndexResult| {
        r.pages
            .iter()
            .map(|p| p.latex.content.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(contents(&parallel), contents(&sequential));
}

#[test]
fn test_missing_index_page() {
    let pages = tempfile::tempdir().unwrap();
    let converter = IndexConverter::new(DirectorySource::new(pages.path()));

    assert!(matches!(
        converter.convert("Index"),
        Err(Error::PageNotFound(_))
    ));
}

#[test]
fn test_index_without_list() {
    let pages = tempfile::tempdir().unwrap();
    fs::write(pages.path().join("Index.wiki"), "Just text.").unwrap();
    let converter = IndexConverter::new(DirectorySource::new(pages.path()));

    assert!(matches!(
        converter.convert("Index"),
        Err(Error::InvalidIndex(_))
    ));
}
