//! LaTeX rendering.
//!
//! Sections map onto the LaTeX sectioning commands, starting at a
//! configurable structure level so a page can be included as a chapter of a
//! larger document. Tables are written into `filecontents*` side files and
//! typeset with `longtable`; images are referenced by local file names that
//! the caller is expected to provide.

use super::RenderOptions;
use crate::model::{Document, Inline, List, ListKind, Paragraph, Section, Table, Typeface};
use serde::{Deserialize, Serialize};

/// LaTeX sectioning commands, outermost first.
pub const STRUCTURE: [&str; 7] = [
    "\\part",
    "\\chapter",
    "\\section",
    "\\subsection",
    "\\subsubsection",
    "\\paragraph",
    "\\subparagraph",
];

/// An image referenced by the LaTeX output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Where the image comes from
    pub url: String,
    /// Local file name used in `\includegraphics`
    pub file_name: String,
}

/// LaTeX source of a page with the images it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatexOutput {
    /// LaTeX source
    pub content: String,
    /// Referenced images, in order of appearance
    pub images: Vec<ImageAsset>,
}

/// Escape text for LaTeX.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash "),
            '_' | '%' | '&' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '^' => out.push_str("\\^{}"),
            '~' => out.push_str("\\~{}"),
            '€' => out.push_str("\\euro"),
            '\u{2212}' | '\u{2011}' => out.push('-'),
            _ => out.push(c),
        }
    }
    out
}

/// Renders one document to LaTeX.
#[derive(Debug)]
pub struct LatexRenderer {
    options: RenderOptions,
    stem: String,
    out: String,
    table_count: usize,
    image_count: usize,
    images: Vec<ImageAsset>,
}

impl LatexRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        let stem = options.output_name.replace('.', "_");
        Self {
            options,
            stem,
            out: String::new(),
            table_count: 0,
            image_count: 0,
            images: Vec::new(),
        }
    }

    /// Render the document.
    pub fn render(mut self, doc: &Document) -> LatexOutput {
        let title = self
            .options
            .title
            .clone()
            .or_else(|| doc.summary().map(str::to_string));
        if let Some(title) = title {
            let command = self.structure(0);
            self.out.push_str(&format!("{}{{{}}}\n", command, escape_latex(&title)));
        }

        for paragraph in &doc.root.paragraphs {
            self.paragraph(paragraph);
        }
        for section in &doc.root.sections {
            self.section(section, 1);
        }

        LatexOutput {
            content: self.out,
            images: self.images,
        }
    }

    fn structure(&self, depth: usize) -> &'static str {
        let index = self.options.structure_level + depth;
        match STRUCTURE.get(index) {
            Some(command) => command,
            None => {
                log::warn!(
                    "structure level {} too deep, using {}",
                    index,
                    STRUCTURE[STRUCTURE.len() - 1]
                );
                STRUCTURE[STRUCTURE.len() - 1]
            }
        }
    }

    fn section(&mut self, section: &Section, depth: usize) {
        if let Some(heading) = &section.heading {
            let command = self.structure(depth);
            self.out.push_str(command);
            self.out.push('{');
            self.inlines(heading);
            self.out.push_str("}\n");
        }
        for paragraph in &section.paragraphs {
            self.paragraph(paragraph);
        }
        for child in &section.sections {
            self.section(child, depth + 1);
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        self.out.push_str("\n\n");
        self.inlines(&paragraph.content);
    }

    fn inlines(&mut self, content: &[Inline]) {
        for inline in content {
            self.inline(inline);
        }
    }

    fn inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text { text } => self.out.push_str(&escape_latex(text)),
            Inline::Typeface { kind, content } => {
                let (open, close) = match kind {
                    Typeface::Bold => ("{\\bfseries ", "}"),
                    Typeface::Italic => ("{\\itshape ", "}"),
                    Typeface::Code => ("{\\ttfamily ", "}"),
                    Typeface::Strikeout => ("\\sout{", "}"),
                    Typeface::Super => ("\\textsuperscript{", "}"),
                    Typeface::Sub => ("\\textsubscript{", "}"),
                };
                self.out.push_str(open);
                self.inlines(content);
                self.out.push_str(close);
            }
            Inline::ExternalLink { url, description } => match description {
                Some(description) => self.out.push_str(&format!(
                    "\\href{{{}}}{{{}}}",
                    url,
                    escape_latex(description)
                )),
                None => self.out.push_str(&format!("\\url{{{}}}", url)),
            },
            Inline::InternalLink {
                target,
                description,
            } => self
                .out
                .push_str(&escape_latex(description.as_deref().unwrap_or(target))),
            Inline::Image { url } => {
                let file_name = self.image_file(url);
                self.out.push_str(&format!(
                    " \\includegraphics[width=\\textwidth]{{{}}} ",
                    file_name
                ));
            }
            Inline::Divider => self.out.push_str("\n\n\\hrulefill\n\n"),
            Inline::NewLine => self.out.push_str(" \\newline "),
            Inline::Preformat { text } => self.out.push_str(&format!(
                "\n\\begin{{lstlisting}}\n{}\n\\end{{lstlisting}}\n",
                text
            )),
            Inline::TableOfContents { .. } => self.out.push_str("\n\\tableofcontents\n"),
            Inline::Table(table) => self.table(table),
            Inline::List(list) => self.list(list),
        }
    }

    fn list(&mut self, list: &List) {
        let environment = match list.kind {
            ListKind::Bulleted => "itemize",
            ListKind::Numbered => "enumerate",
        };
        self.out.push_str(&format!("\\begin{{{}}}\n", environment));
        for entry in &list.entries {
            self.out.push_str("\\item {");
            for paragraph in &entry.paragraphs {
                self.paragraph(paragraph);
            }
            self.out.push_str("}\n");
        }
        self.out.push_str(&format!("\\end{{{}}}\n", environment));
    }

    fn table(&mut self, table: &Table) {
        let name = format!("{}TABLE{}", self.stem, self.table_count);
        self.table_count += 1;

        self.out.push_str(&format!(
            "\n\\begin{{filecontents*}}{{{}.tex}}\n\\begin{{longtable}}{{|{}}}\n",
            name,
            "X|".repeat(table.column_count())
        ));
        self.out.push_str("\\hline\n\\endhead\n\\hline\n\\endfoot\n");
        for row in &table.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(" & ");
                }
                for paragraph in &cell.paragraphs {
                    self.paragraph(paragraph);
                }
            }
            self.out.push_str(" \\\\\n\\hline\n");
        }
        self.out.push_str("\\end{longtable}\n\\end{filecontents*}\n");
        self.out.push_str(&format!("\\LTXtable{{\\textwidth}}{{{}}}\n", name));
    }

    fn image_file(&mut self, url: &str) -> String {
        let path = url::Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.to_string());
        let file = path.rsplit('/').next().unwrap_or_default();
        let extension = file.rfind('.').map(|pos| &file[pos..]).unwrap_or_default();

        let file_name = format!("{}IMAGE{}{}", self.stem, self.image_count, extension);
        self.image_count += 1;
        self.images.push(ImageAsset {
            url: url.to_string(),
            file_name: file_name.clone(),
        });
        file_name
    }
}

/// Render a document to LaTeX.
pub fn to_latex(doc: &Document, options: &RenderOptions) -> LatexOutput {
    LatexRenderer::new(options.clone()).render(doc)
}
