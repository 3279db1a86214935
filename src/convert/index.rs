//! Index-driven conversion of several pages into LaTeX.
//!
//! An index page lists the pages of a book as a (possibly nested) list of
//! internal links. Every linked page is converted to its own `outN.tex` file
//! with its sectioning shifted by the nesting depth of its entry, and a
//! `content.tex` file includes them in order.

use crate::error::{Error, Result};
use crate::model::{Inline, List, ListEntry};
use crate::parser::{Diagnostic, WikiParser};
use crate::render::{to_latex, LatexOutput};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::ConvertOptions;

/// Name prefix of the converted page files.
const OUT_FILENAME: &str = "out";

/// Where wiki pages are read from.
pub trait PageSource: Send + Sync {
    /// Raw content of a page.
    ///
    /// Returns [`Error::PageNotFound`] if there is no such page.
    fn read_page(&self, name: &str) -> Result<Vec<u8>>;
}

/// Pages stored as files in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Pages under `root` with the `.wiki` extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "wiki".to_string(),
        }
    }

    /// Set the page file extension, without the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Path of a page file.
    pub fn page_path(&self, name: &str) -> PathBuf {
        if self.extension.is_empty() {
            self.root.join(name)
        } else {
            self.root.join(format!("{}.{}", name, self.extension))
        }
    }
}

impl PageSource for DirectorySource {
    fn read_page(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.page_path(name);
        if !path.is_file() {
            return Err(Error::PageNotFound(path.display().to_string()));
        }
        Ok(fs::read(path)?)
    }
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn with_page(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Add or replace a page.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.pages.insert(name.into(), text.into());
    }
}

impl PageSource for MemorySource {
    fn read_page(&self, name: &str) -> Result<Vec<u8>> {
        self.pages
            .get(name)
            .map(|text| text.as_bytes().to_vec())
            .ok_or_else(|| Error::PageNotFound(name.to_string()))
    }
}

/// A page named by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Page name
    pub page: String,
    /// Title given by the link description
    pub title: Option<String>,
    /// Nesting depth of the entry, 0 for top-level entries
    pub level: usize,
}

/// A successfully converted page.
#[derive(Debug, Clone)]
pub struct IndexedPage {
    /// Index entry of the page
    pub entry: IndexEntry,
    /// Output file name (`outN.tex`)
    pub file_name: String,
    /// LaTeX output
    pub latex: LatexOutput,
    /// Recovered markup problems
    pub diagnostics: Vec<Diagnostic>,
}

/// A page whose conversion failed.
#[derive(Debug)]
pub struct PageFailure {
    /// Index entry of the page
    pub entry: IndexEntry,
    /// Why it failed
    pub error: Error,
}

/// Outcome of an index conversion.
#[derive(Debug, Default)]
pub struct IndexResult {
    /// Converted pages in index order
    pub pages: Vec<IndexedPage>,
    /// Pages that could not be converted
    pub failures: Vec<PageFailure>,
}

impl IndexResult {
    /// Check if every page was converted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// LaTeX file including all converted pages.
    pub fn content_tex(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let stem = page.file_name.trim_end_matches(".tex");
                format!("\\input{{{}}}\n", stem)
            })
            .collect()
    }

    /// Write all page files and `content.tex` into a directory.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        for page in &self.pages {
            fs::write(dir.join(&page.file_name), &page.latex.content)?;
        }
        fs::write(dir.join("content.tex"), self.content_tex())?;
        Ok(())
    }
}

/// Converts the pages listed by an index page to LaTeX.
pub struct IndexConverter {
    source: Box<dyn PageSource>,
    options: ConvertOptions,
}

impl IndexConverter {
    /// Create a converter reading pages from `source`.
    pub fn new(source: impl PageSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            options: ConvertOptions::default(),
        }
    }

    /// Set conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the index page and list the pages it names.
    pub fn entries(&self, index: &str) -> Result<Vec<IndexEntry>> {
        let doc = self.parser(index)?.parse()?;

        let list = doc
            .root
            .walk()
            .into_iter()
            .flat_map(|section| &section.paragraphs)
            .flat_map(|p| &p.content)
            .find_map(|inline| match inline {
                Inline::List(list) => Some(list),
                _ => None,
            })
            .ok_or_else(|| Error::InvalidIndex(format!("{} contains no list", index)))?;

        let mut entries = Vec::new();
        collect_entries(list, 0, &mut entries);
        log::debug!("index {} names {} pages", index, entries.len());
        Ok(entries)
    }

    /// Convert all pages named by the index page.
    ///
    /// Failing pages are reported in [`IndexResult::failures`] and do not
    /// affect their siblings.
    pub fn convert(&self, index: &str) -> Result<IndexResult> {
        let entries = self.entries(index)?;
        self.convert_entries(entries, |_| {})
    }

    /// Convert the given entries, calling `progress` after each page.
    ///
    /// Pages are parsed in parallel unless parsing is set to sequential;
    /// output files are numbered afterwards over the successful pages.
    pub fn convert_entries<F>(&self, entries: Vec<IndexEntry>, progress: F) -> Result<IndexResult>
    where
        F: Fn(&IndexEntry) + Send + Sync,
    {
        let parse = |entry: IndexEntry| {
            log::debug!("parsing {} at level {}", entry.page, entry.level);
            let outcome = self
                .parser(&entry.page)
                .and_then(|parser| parser.parse_with_diagnostics());
            progress(&entry);
            (entry, outcome)
        };
        let outcomes: Vec<_> = if self.options.parse.parallel {
            entries.into_par_iter().map(parse).collect()
        } else {
            entries.into_iter().map(parse).collect()
        };

        let mut result = IndexResult::default();
        for (entry, outcome) in outcomes {
            match outcome {
                Ok((doc, diagnostics)) => {
                    let file_name = format!("{}{}.tex", OUT_FILENAME, result.pages.len());
                    let mut render = self
                        .options
                        .render
                        .clone()
                        .with_structure_level(entry.level)
                        .with_output_name(file_name.clone());
                    render.title = entry.title.clone();
                    result.pages.push(IndexedPage {
                        latex: to_latex(&doc, &render),
                        entry,
                        file_name,
                        diagnostics,
                    });
                }
                Err(error) => {
                    log::warn!("skipping page {}: {}", entry.page, error);
                    result.failures.push(PageFailure { entry, error });
                }
            }
        }
        Ok(result)
    }

    fn parser(&self, page: &str) -> Result<WikiParser> {
        let bytes = self.source.read_page(page)?;
        let options = self.options.parse.clone().with_source_name(page);
        WikiParser::from_bytes_with_options(&bytes, options)
    }
}

fn collect_entries(list: &List, level: usize, out: &mut Vec<IndexEntry>) {
    for entry in &list.entries {
        match first_internal_link(entry) {
            Some((page, title)) => out.push(IndexEntry { page, title, level }),
            None => log::warn!("index entry without page link at level {}", level),
        }
        for sublist in entry.nested_lists() {
            collect_entries(sublist, level + 1, out);
        }
    }
}

fn first_internal_link(entry: &ListEntry) -> Option<(String, Option<String>)> {
    fn find(content: &[Inline]) -> Option<(String, Option<String>)> {
        content.iter().find_map(|inline| match inline {
            Inline::InternalLink {
                target,
                description,
            } => Some((target.clone(), description.clone())),
            Inline::Typeface { content, .. } => find(content),
            _ => None,
        })
    }
    entry.paragraphs.iter().find_map(|p| find(&p.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseOptions;

    fn book() -> MemorySource {
        MemorySource::new()
            .with_page(
                "Index",
                "#summary Book\n  * [Intro Introduction]\n    * [Details]\n  * [Missing]\n  * UsagePage\n",
            )
            .with_page("Intro", "= Start =\ntext")
            .with_page("Details", "||a||b||\nhttp://x.org/p.png")
            .with_page("UsagePage", "= Usage =")
    }

    #[test]
    fn test_entries() {
        let entries = IndexConverter::new(book()).entries("Index").unwrap();
        assert_eq!(
            entries,
            vec![
                IndexEntry {
                    page: "Intro".into(),
                    title: Some("Introduction".into()),
                    level: 0
                },
                IndexEntry {
                    page: "Details".into(),
                    title: None,
                    level: 1
                },
                IndexEntry {
                    page: "Missing".into(),
                    title: None,
                    level: 0
                },
                IndexEntry {
                    page: "UsagePage".into(),
                    title: None,
                    level: 0
                },
            ]
        );
    }

    #[test]
    fn test_missing_page_fails_alone() {
        let result = IndexConverter::new(book()).convert("Index").unwrap();

        assert_eq!(result.pages.len(), 3);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].entry.page, "Missing");
        assert!(matches!(result.failures[0].error, Error::PageNotFound(_)));
        assert!(!result.is_complete());

        let names: Vec<&str> = result.pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["out0.tex", "out1.tex", "out2.tex"]);
        assert_eq!(
            result.content_tex(),
            "\\input{out0}\n\\input{out1}\n\\input{out2}\n"
        );
    }

    #[test]
    fn test_pages_follow_index_level() {
        let options = ConvertOptions::new().with_parse_options(ParseOptions::new().sequential());
        let result = IndexConverter::new(book())
            .with_options(options)
            .convert("Index")
            .unwrap();

        let intro = &result.pages[0].latex.content;
        assert!(intro.starts_with("\\part{Introduction}\n"));
        assert!(intro.contains("\\chapter{Start}"));

        let details = &result.pages[1].latex;
        assert!(details.content.contains("out1_texTABLE0"));
        assert_eq!(details.images[0].file_name, "out1_texIMAGE0.png");

        assert!(result.pages[2].latex.content.contains("\\chapter{Usage}"));
    }

    #[test]
    fn test_missing_index() {
        let err = IndexConverter::new(book()).convert("Nope").unwrap_err();
        assert!(matches!(err, Error::PageNotFound(_)));
    }

    #[test]
    fn test_index_without_list() {
        let source = MemorySource::new().with_page("Index", "= Contents =\nnothing here");
        let err = IndexConverter::new(source).entries("Index").unwrap_err();
        assert!(matches!(err, Error::InvalidIndex(_)));
    }

    #[test]
    fn test_directory_source_paths() {
        let source = DirectorySource::new("/wiki").with_extension(".gwiki");
        assert_eq!(source.page_path("Home"), PathBuf::from("/wiki/Home.gwiki"));
        assert!(matches!(
            source.read_page("Home").unwrap_err(),
            Error::PageNotFound(_)
        ));
    }
}
