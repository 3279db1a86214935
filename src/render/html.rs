//! Streaming HTML rendering.
//!
//! [`HtmlRenderer`] is an event consumer: it writes HTML while the page is
//! being parsed, without building a tree first. Headings get anchors so a
//! table of contents can link to them; the table of contents itself can
//! only be written once all headings are known, so its position is
//! remembered and the list is inserted when the document ends.
//!
//! A `<p>` is only written once a paragraph has inline content, and it is
//! closed before any block element (list, table, preformat, divider, table
//! of contents) inside the paragraph.

use std::collections::HashSet;

use super::RenderOptions;
use crate::model::{Document, Level, PropertyKind, Typeface};
use crate::wem::WikiEventModel;

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn typeface_style(typeface: Typeface) -> &'static str {
    match typeface {
        Typeface::Bold => "font-weight:bold;",
        Typeface::Italic => "font-style:italic;",
        Typeface::Code => "font-family:monospace;",
        Typeface::Strikeout => "text-decoration:line-through;",
        Typeface::Sub => "vertical-align:sub;",
        Typeface::Super => "vertical-align:super;",
    }
}

#[derive(Debug, Clone)]
struct TocEntry {
    level: Level,
    anchor: String,
    title: String,
}

#[derive(Debug)]
struct OpenHeading {
    level: Level,
    html: String,
    text: String,
}

/// Event consumer writing HTML.
#[derive(Debug)]
pub struct HtmlRenderer {
    options: RenderOptions,
    out: String,
    heading: Option<OpenHeading>,
    toc: Vec<TocEntry>,
    toc_slots: Vec<(usize, u8)>,
    anchors: HashSet<String>,
    /// One entry per open paragraph, true while its `<p>` is written.
    paragraphs: Vec<bool>,
}

impl HtmlRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            out: String::new(),
            heading: None,
            toc: Vec::new(),
            toc_slots: Vec::new(),
            anchors: HashSet::new(),
            paragraphs: Vec::new(),
        }
    }

    /// HTML written so far.
    pub fn html(&self) -> &str {
        &self.out
    }

    /// Take the HTML.
    pub fn into_html(self) -> String {
        self.out
    }

    /// Render a finished document.
    pub fn render(&mut self, doc: &Document) {
        crate::model::replay(doc, self);
    }

    fn write(&mut self, html: &str) {
        match &mut self.heading {
            Some(heading) => heading.html.push_str(html),
            None => self.out.push_str(html),
        }
    }

    /// Write inline markup, opening the paragraph tag if needed.
    fn inline(&mut self, html: &str) {
        if self.heading.is_none() {
            if let Some(open) = self.paragraphs.last_mut() {
                if !*open {
                    *open = true;
                    self.out.push_str("<p>");
                }
            }
        }
        self.write(html);
    }

    /// Write block markup, closing the paragraph tag first.
    fn block(&mut self, html: &str) {
        self.close_paragraph_tag();
        self.write(html);
    }

    fn close_paragraph_tag(&mut self) {
        if self.heading.is_none() {
            if let Some(open) = self.paragraphs.last_mut() {
                if *open {
                    *open = false;
                    self.out.push_str("</p>");
                }
            }
        }
    }

    fn unique_anchor(&mut self, title: &str) -> String {
        let mut slug = String::new();
        for c in title.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        let base = if slug.is_empty() { "section" } else { slug }.to_string();

        let mut anchor = base.clone();
        let mut n = 2;
        while self.anchors.contains(&anchor) {
            anchor = format!("{}-{}", base, n);
            n += 1;
        }
        self.anchors.insert(anchor.clone());
        anchor
    }

    fn toc_html(&self, depth: u8) -> String {
        let mut html = String::from("<div class=\"toc\">");
        // One entry per open `<ul>`, true while its last `<li>` is open.
        let mut lists: Vec<bool> = Vec::new();
        for entry in self.toc.iter().filter(|e| e.level.depth() <= depth as usize) {
            let d = entry.level.depth();
            while lists.len() > d {
                close_toc_list(&mut html, &mut lists);
            }
            while lists.len() < d {
                if let Some(item_open) = lists.last_mut() {
                    if !*item_open {
                        html.push_str("<li>");
                        *item_open = true;
                    }
                }
                html.push_str("<ul>");
                lists.push(false);
            }
            if let Some(item_open) = lists.last_mut() {
                if *item_open {
                    html.push_str("</li>");
                }
                *item_open = true;
            }
            html.push_str(&format!(
                "<li><a href=\"#{}\">{}</a>",
                entry.anchor, entry.title
            ));
        }
        while !lists.is_empty() {
            close_toc_list(&mut html, &mut lists);
        }
        html.push_str("</div>");
        html
    }
}

fn close_toc_list(html: &mut String, lists: &mut Vec<bool>) {
    if lists.pop() == Some(true) {
        html.push_str("</li>");
    }
    html.push_str("</ul>");
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl WikiEventModel for HtmlRenderer {
    fn document_start(&mut self) {
        self.out.clear();
        self.toc.clear();
        self.toc_slots.clear();
        self.anchors.clear();
        self.paragraphs.clear();
        if self.options.full_document {
            self.out.push_str("<html><body>");
        }
    }

    fn document_end(&mut self) {
        // Insert from the back so earlier offsets stay valid.
        for (offset, depth) in std::mem::take(&mut self.toc_slots).into_iter().rev() {
            let toc = self.toc_html(depth);
            self.out.insert_str(offset, &toc);
        }
        if self.options.full_document {
            self.out.push_str("</body></html>");
        }
    }

    fn heading_start(&mut self, level: Level) {
        self.heading = Some(OpenHeading {
            level,
            html: String::new(),
            text: String::new(),
        });
    }

    fn heading_end(&mut self, _level: Level) {
        let Some(heading) = self.heading.take() else {
            return;
        };
        let anchor = self.unique_anchor(heading.text.trim());
        let n = heading.level.depth();
        self.out.push_str(&format!(
            "<h{n} id=\"{anchor}\">{}</h{n}>",
            heading.html
        ));
        self.toc.push(TocEntry {
            level: heading.level,
            anchor,
            title: escape_html(heading.text.trim()),
        });
    }

    fn paragraph_start(&mut self) {
        self.paragraphs.push(false);
    }

    fn paragraph_end(&mut self) {
        self.close_paragraph_tag();
        self.paragraphs.pop();
    }

    fn table_start(&mut self) {
        self.block("<table>");
    }

    fn table_end(&mut self) {
        self.write("</table>");
    }

    fn table_body_start(&mut self) {
        self.write("<tbody>");
    }

    fn table_body_end(&mut self) {
        self.write("</tbody>");
    }

    fn table_row_start(&mut self) {
        self.write("<tr>");
    }

    fn table_row_end(&mut self) {
        self.write("</tr>");
    }

    fn table_cell_start(&mut self) {
        self.write("<td>");
    }

    fn table_cell_end(&mut self) {
        self.write("</td>");
    }

    fn typeface_start(&mut self, typeface: Typeface) {
        self.inline(&format!("<span style=\"{}\">", typeface_style(typeface)));
    }

    fn typeface_end(&mut self, _typeface: Typeface) {
        self.write("</span>");
    }

    fn list_bulleted_start(&mut self) {
        self.block("<ul>");
    }

    fn list_bulleted_end(&mut self) {
        self.write("</ul>");
    }

    fn list_numbered_start(&mut self) {
        self.block("<ol>");
    }

    fn list_numbered_end(&mut self) {
        self.write("</ol>");
    }

    fn list_entry_start(&mut self) {
        self.write("<li>");
    }

    fn list_entry_end(&mut self) {
        self.write("</li>");
    }

    fn on_divider(&mut self) {
        self.block("<hr/>");
    }

    fn on_new_line(&mut self) {
        self.inline("<br/>");
    }

    fn on_preformat(&mut self, text: &str) {
        self.block(&format!("<pre>{}</pre>", escape_html(text)));
    }

    fn on_table_of_contents(&mut self, depth: u8) {
        if self.heading.is_none() {
            self.close_paragraph_tag();
            self.toc_slots.push((self.out.len(), depth));
        }
    }

    fn on_image(&mut self, url: &str) {
        self.inline(&format!("<img src=\"{}\"/>", escape_html(url)));
    }

    fn on_text(&mut self, text: &str) {
        if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
        }
        self.inline(&escape_html(text));
    }

    fn on_external_link(&mut self, url: &str, description: Option<&str>) {
        let label = description.unwrap_or(url);
        if let Some(heading) = &mut self.heading {
            heading.text.push_str(label);
        }
        self.inline(&format!(
            "<a href=\"{}\">{}</a>",
            escape_html(url),
            escape_html(label)
        ));
    }

    fn on_internal_link(&mut self, target: &str, description: Option<&str>) {
        let label = description.unwrap_or(target);
        if let Some(heading) = &mut self.heading {
            heading.text.push_str(label);
        }
        let href = self.options.internal_href(target);
        self.inline(&format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&href),
            escape_html(label)
        ));
    }

    fn on_property(&mut self, kind: PropertyKind, value: &str) {
        if kind == PropertyKind::Summary {
            self.block(&format!(
                "<div class=\"summary\">{}</div>",
                escape_html(value)
            ));
        }
    }
}

/// Render a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    let mut renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc);
    renderer.into_html()
}
