//! Line-oriented tokenizer for Google Code wiki markup.
//!
//! The lexer recognizes block constructs per line and inline constructs
//! within a line, and reports every token to a [`Visitor`]. It never keeps
//! structural state of its own beyond the kind of the previous line.

use once_cell::sync::Lazy;
use regex::Regex;

use super::diagnostic::DiagnosticKind;
use super::visitor::Visitor;
use crate::model::{Level, PropertyKind, Typeface};
use crate::wem::WikiEventModel;

static PRAGMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(summary|sidebar|labels)(?:\s+(.*))?$").expect("valid regex"));
static DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{4,}$").expect("valid regex"));
static TOC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<wiki:toc(?:\s+max_depth="([^"]*)")?\s*/?>$"#).expect("valid regex")
});
static LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s+)([*#])(\s+|$)").expect("valid regex"));
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?|ftp)://[^\s\]]+").expect("valid regex"));

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".gif", ".jpg", ".jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Start,
    Blank,
    Text,
    List,
    Table,
    Block,
}

/// Tokenize `source` into the visitor. Does not end the document.
pub fn tokenize<W: WikiEventModel>(source: &str, visitor: &mut Visitor<W>) {
    let lines: Vec<&str> = source.lines().collect();
    let mut preamble = true;
    let mut previous = LineKind::Start;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index].trim_end();
        let trimmed = line.trim_start();
        visitor.set_line(index + 1);
        index += 1;

        if preamble {
            if trimmed.is_empty() {
                continue;
            }
            if let Some(caps) = PRAGMA.captures(line) {
                let kind = caps
                    .get(1)
                    .and_then(|m| PropertyKind::from_keyword(m.as_str()));
                if let Some(kind) = kind {
                    let value = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                    visitor.on_property(kind, value);
                    continue;
                }
            }
            preamble = false;
        }

        let list = LIST.captures(line);
        let table = trimmed.starts_with("||");
        if previous == LineKind::List && list.is_none() {
            visitor.on_list_entries_end();
        }
        if previous == LineKind::Table && !table {
            visitor.on_new_line();
        }

        if trimmed.is_empty() {
            visitor.on_paragraph_break();
            previous = LineKind::Blank;
        } else if let Some((level, body)) = heading(trimmed) {
            visitor.on_heading_start(level);
            inline(body, visitor);
            visitor.on_heading_end();
            previous = LineKind::Block;
        } else if DIVIDER.is_match(trimmed) {
            visitor.on_divider();
            previous = LineKind::Block;
        } else if let Some(caps) = TOC.captures(trimmed) {
            let depth = caps.get(1).map(|m| m.as_str()).unwrap_or("6");
            visitor.on_table_of_contents(depth);
            previous = LineKind::Block;
        } else if let Some(caps) = list {
            let marker = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let numbered = caps.get(2).map(|m| m.as_str()) == Some("#");
            visitor.on_list_entry_start(marker, numbered);
            inline(&line[marker.len()..], visitor);
            previous = LineKind::List;
        } else if table {
            visitor.on_table_row();
            let cells: Vec<&str> = trimmed[2..].split("||").collect();
            for (i, cell) in cells.iter().enumerate() {
                inline(cell.trim(), visitor);
                if i + 1 < cells.len() {
                    visitor.on_table_cell();
                }
            }
            previous = LineKind::Table;
        } else if trimmed == "{{{" {
            let start = index;
            let end = lines[start..]
                .iter()
                .position(|l| l.trim() == "}}}")
                .map(|offset| start + offset);
            let body_end = end.unwrap_or(lines.len());
            if end.is_none() {
                visitor.report(
                    DiagnosticKind::UnterminatedPreformat,
                    "preformatted block is not closed",
                );
            }
            visitor.on_preformat(&lines[start..body_end].join("\n"));
            index = end.map(|e| e + 1).unwrap_or(lines.len());
            previous = LineKind::Block;
        } else {
            if previous == LineKind::Text {
                visitor.on_new_line();
            }
            inline(line, visitor);
            previous = LineKind::Text;
        }
    }

    if previous == LineKind::List {
        visitor.on_list_entries_end();
    }
}

/// Split a heading line into its level and body, including the closing
/// marker.
fn heading(line: &str) -> Option<(Level, &str)> {
    if !line.starts_with('=') || !line.ends_with('=') {
        return None;
    }
    let markers = line.len() - line.trim_start_matches('=').len();
    let depth = markers.min(6);
    let body = &line[depth..];
    if body.trim_matches('=').trim().is_empty() {
        return None;
    }
    Level::from_depth(depth).map(|level| (level, body))
}

/// Tokenize the inline content of one line.
fn inline<W: WikiEventModel>(text: &str, visitor: &mut Visitor<W>) {
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_whitespace() {
            let len = run_length(rest, char::is_whitespace);
            visitor.on_space(&rest[..len]);
            i += len;
            continue;
        }

        if let Some(after) = rest.strip_prefix("{{{") {
            if let Some(end) = after.find("}}}") {
                visitor.on_preformat_inline(&after[..end]);
                i += end + 6;
                continue;
            }
        }

        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                visitor.on_preformat_inline(&after[..end]);
                i += end + 2;
                continue;
            }
        }

        if let Some(after) = rest.strip_prefix('[') {
            if let Some(end) = after.find(']') {
                let inner = after[..end].trim();
                match inner.split_once(char::is_whitespace) {
                    Some((target, description)) => visitor.on_link(target, Some(description)),
                    None => visitor.on_link(inner, None),
                }
                i += end + 2;
                continue;
            }
        }

        if c.is_ascii_alphabetic() {
            if let Some(m) = URL.find(rest) {
                let url = m
                    .as_str()
                    .trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
                let lower = url.to_ascii_lowercase();
                if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                    visitor.on_image(url);
                } else {
                    visitor.on_bare_link(url);
                }
                i += url.len();
                continue;
            }
        }

        if rest.starts_with("<br>") || rest.starts_with("<br/>") || rest.starts_with("<br />") {
            visitor.on_line_break();
            i += rest.find('>').map(|p| p + 1).unwrap_or(1);
            continue;
        }

        if rest.starts_with("~~") || rest.starts_with(",,") {
            let kind = if c == '~' {
                Typeface::Strikeout
            } else {
                Typeface::Sub
            };
            visitor.on_typeface_toggle(kind);
            i += 2;
            continue;
        }

        if c == '^' {
            visitor.on_typeface_toggle(Typeface::Super);
            i += 1;
            continue;
        }

        if c == '*' || c == '_' {
            let before = text[..i].chars().next_back();
            let after = rest[1..].chars().next();
            let inside_word = before.is_some_and(char::is_alphanumeric)
                && after.is_some_and(char::is_alphanumeric);
            if inside_word {
                visitor.on_special_symbol(&rest[..1]);
            } else if c == '*' {
                visitor.on_typeface_toggle(Typeface::Bold);
            } else {
                visitor.on_typeface_toggle(Typeface::Italic);
            }
            i += 1;
            continue;
        }

        if c.is_alphanumeric() {
            let len = run_length(rest, char::is_alphanumeric);
            visitor.on_word(&rest[..len]);
            i += len;
            continue;
        }

        let len = c.len_utf8();
        visitor.on_special_symbol(&rest[..len]);
        i += len;
    }
}

fn run_length(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|(_, c)| !pred(*c))
        .map(|(pos, _)| pos)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wem::{check_balance, Event, EventRecorder};

    fn events(source: &str) -> Vec<Event> {
        let mut visitor = Visitor::new(EventRecorder::new());
        tokenize(source, &mut visitor);
        let (recorder, _) = visitor.finish().unwrap();
        let events = recorder.into_events();
        check_balance(&events).unwrap();
        events
    }

    #[test]
    fn test_heading_detection() {
        assert_eq!(heading("= Title ="), Some((Level::H1, " Title =")));
        assert_eq!(heading("=== Deep ==="), Some((Level::H3, " Deep ===")));
        assert_eq!(heading("= not a heading"), None);
        assert_eq!(heading("===="), None);
    }

    #[test]
    fn test_pragmas() {
        let events = events("#summary A page\n\n#labels a,b\nText");
        assert_eq!(
            &events[1..4],
            &[
                Event::Property(PropertyKind::Summary, "A page".into()),
                Event::Property(PropertyKind::Labels, "a".into()),
                Event::Property(PropertyKind::Labels, "b".into()),
            ]
        );
    }

    #[test]
    fn test_text_lines_joined_with_space() {
        let events = events("one\ntwo");
        assert!(events.contains(&Event::Text("one two".into())));
    }

    #[test]
    fn test_inline_markup() {
        let events = events("*bold* _it_ `code` ~~s~~ ^up^ ,,dn,, snake_case 2*3");
        let starts: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::TypefaceStart(t) => Some(*t),
                _ => None,
            })
            .collect();
        assert_eq!(
            starts,
            vec![
                Typeface::Bold,
                Typeface::Italic,
                Typeface::Code,
                Typeface::Strikeout,
                Typeface::Super,
                Typeface::Sub
            ]
        );
        assert!(events.contains(&Event::Text(" snake_case 2*3".into())));
    }

    #[test]
    fn test_links_and_images() {
        let events =
            events("[http://example.org Example] see http://x.org/a.png and ftp://f.org/x.");
        assert_eq!(
            events[2],
            Event::ExternalLink {
                url: "http://example.org".into(),
                description: Some("Example".into())
            }
        );
        assert!(events.contains(&Event::Image("http://x.org/a.png".into())));
        assert!(events.contains(&Event::ExternalLink {
            url: "ftp://f.org/x".into(),
            description: None
        }));
    }

    #[test]
    fn test_table_lines() {
        let events = events("||a||b||\n||c||\nafter");
        let cells = events
            .iter()
            .filter(|e| **e == Event::TableCellStart)
            .count();
        assert_eq!(cells, 3);
        assert!(events.contains(&Event::Text("after".into())));
    }

    #[test]
    fn test_preformat_block() {
        let events = events("{{{\nlet x = *1*;\n}}}\ntext");
        assert!(events.contains(&Event::Preformat("let x = *1*;".into())));
        assert!(!events.iter().any(|e| matches!(e, Event::TypefaceStart(_))));
    }

    #[test]
    fn test_unterminated_preformat() {
        let mut visitor = Visitor::new(EventRecorder::new());
        tokenize("{{{\ncode", &mut visitor);
        assert_eq!(
            visitor.diagnostics()[0].kind,
            DiagnosticKind::UnterminatedPreformat
        );
        let (recorder, _) = visitor.finish().unwrap();
        assert!(recorder.events().contains(&Event::Preformat("code".into())));
    }

    #[test]
    fn test_toc_default_depth() {
        let events = events("<wiki:toc/>\n<wiki:toc max_depth=\"2\" />");
        assert!(events.contains(&Event::TableOfContents(6)));
        assert!(events.contains(&Event::TableOfContents(2)));
    }

    #[test]
    fn test_line_break() {
        let events = events("a<br/>b");
        assert!(events.contains(&Event::NewLine));
    }
}
