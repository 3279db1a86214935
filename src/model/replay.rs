//! Turning a finished document back into wiki events.

use super::{Document, Inline, ListKind, Paragraph, Section, Table};
use crate::wem::WikiEventModel;

/// Emit the events describing `doc` into a consumer.
///
/// For a document built from a parse, the emitted stream is the one the
/// parse produced.
pub fn replay<W: WikiEventModel + ?Sized>(doc: &Document, wem: &mut W) {
    wem.document_start();
    for property in &doc.properties {
        wem.on_property(property.kind, &property.value);
    }
    section_content(&doc.root, wem);
    wem.document_end();
}

fn section_content<W: WikiEventModel + ?Sized>(section: &Section, wem: &mut W) {
    for paragraph in &section.paragraphs {
        replay_paragraph(paragraph, wem);
    }
    for child in &section.sections {
        wem.section_start();
        if let Some(heading) = &child.heading {
            let level = child.level();
            wem.heading_start(level);
            replay_inlines(heading, wem);
            wem.heading_end(level);
        }
        section_content(child, wem);
        wem.section_end();
    }
}

fn replay_paragraph<W: WikiEventModel + ?Sized>(paragraph: &Paragraph, wem: &mut W) {
    wem.paragraph_start();
    replay_inlines(&paragraph.content, wem);
    wem.paragraph_end();
}

fn replay_inlines<W: WikiEventModel + ?Sized>(content: &[Inline], wem: &mut W) {
    for inline in content {
        match inline {
            Inline::Text { text } => wem.on_text(text),
            Inline::Typeface { kind, content } => {
                wem.typeface_start(*kind);
                replay_inlines(content, wem);
                wem.typeface_end(*kind);
            }
            Inline::InternalLink {
                target,
                description,
            } => wem.on_internal_link(target, description.as_deref()),
            Inline::ExternalLink { url, description } => {
                wem.on_external_link(url, description.as_deref())
            }
            Inline::Image { url } => wem.on_image(url),
            Inline::Divider => wem.on_divider(),
            Inline::NewLine => wem.on_new_line(),
            Inline::Preformat { text } => wem.on_preformat(text),
            Inline::TableOfContents { depth } => wem.on_table_of_contents(*depth),
            Inline::Table(table) => replay_table(table, wem),
            Inline::List(list) => {
                match list.kind {
                    ListKind::Bulleted => wem.list_bulleted_start(),
                    ListKind::Numbered => wem.list_numbered_start(),
                }
                for entry in &list.entries {
                    wem.list_entry_start();
                    for paragraph in &entry.paragraphs {
                        replay_paragraph(paragraph, wem);
                    }
                    wem.list_entry_end();
                }
                match list.kind {
                    ListKind::Bulleted => wem.list_bulleted_end(),
                    ListKind::Numbered => wem.list_numbered_end(),
                }
            }
        }
    }
}

fn replay_table<W: WikiEventModel + ?Sized>(table: &Table, wem: &mut W) {
    wem.table_start();
    wem.table_body_start();
    for row in &table.rows {
        wem.table_row_start();
        for cell in &row.cells {
            wem.table_cell_start();
            for paragraph in &cell.paragraphs {
                replay_paragraph(paragraph, wem);
            }
            wem.table_cell_end();
        }
        wem.table_row_end();
    }
    wem.table_body_end();
    wem.table_end();
}
