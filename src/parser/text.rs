//! Text buffering and wiki-word detection.

use once_cell::sync::Lazy;
use regex::Regex;

static WIKI_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z0-9]+([A-Z][a-z0-9]+)+$").expect("valid regex"));

/// Check if a word is a CamelCase page name.
pub fn is_wiki_word(word: &str) -> bool {
    WIKI_WORD.is_match(word)
}

/// Literal text collected between structural tokens.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text.
    pub fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Check if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the buffer holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Remove a trailing `!` escape. Returns whether there was one.
    pub fn pop_escape(&mut self) -> bool {
        if self.text.ends_with('!') {
            self.text.pop();
            true
        } else {
            false
        }
    }

    /// Take the buffered text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Replace the buffered text.
    pub fn replace(&mut self, text: String) {
        self.text = text;
    }

    /// Discard the buffered text.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_words() {
        assert!(is_wiki_word("AutoLink"));
        assert!(is_wiki_word("WikiPage2Tex"));
        assert!(!is_wiki_word("Autolink"));
        assert!(!is_wiki_word("aAutoLink"));
        assert!(!is_wiki_word("HTML"));
        assert!(!is_wiki_word("ABc"));
    }

    #[test]
    fn test_escape() {
        let mut b = TextBuffer::new();
        b.push("see !");
        assert!(b.pop_escape());
        assert_eq!(b.take(), "see ");
        assert!(b.is_empty());
        assert!(!b.pop_escape());
    }

    #[test]
    fn test_blank() {
        let mut b = TextBuffer::new();
        b.push(" \t");
        assert!(b.is_blank());
        b.push("x");
        assert!(!b.is_blank());
    }
}
