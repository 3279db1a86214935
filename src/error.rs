//! Error types for wikiutil library.

use std::io;
use thiserror::Error;

/// Result type alias for wikiutil operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing or converting wiki pages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Malformed markup reported in strict mode.
    #[error("Malformed markup: {0}")]
    Malformed(String),

    /// The event stream reaching the document builder is not balanced.
    #[error("Unbalanced event stream: {0}")]
    EventStream(String),

    /// A wiki page could not be found.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The index page has no usable structure.
    #[error("Invalid index page: {0}")]
    InvalidIndex(String),

    /// Error during rendering (HTML, LaTeX, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotFound("Index".to_string());
        assert_eq!(err.to_string(), "Page not found: Index");

        let err = Error::EventStream("paragraph end without start".to_string());
        assert_eq!(
            err.to_string(),
            "Unbalanced event stream: paragraph end without start"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bytes = vec![0x66, 0x6f, 0xff];
        let err: Error = String::from_utf8(bytes).unwrap_err().into();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
