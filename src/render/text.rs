//! Plain text rendering.

use crate::model::Document;

/// Convert a document to plain text.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::WikiParser;

    #[test]
    fn test_to_text() {
        let doc = WikiParser::from_text("= Hello =\nHello, *world*!\n\nSecond paragraph.")
            .parse()
            .unwrap();
        let result = to_text(&doc);

        assert!(result.contains("Hello, world!"));
        assert!(result.contains("Second paragraph."));
        assert!(!result.contains('*'));
    }
}
