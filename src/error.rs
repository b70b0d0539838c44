//! Error types for docspan library.

use std::io;
use thiserror::Error;

/// Result type alias for docspan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline inference and target resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading page or schema files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in page or schema input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A heading text was empty after trimming.
    #[error("Title text is empty")]
    EmptyTitle,

    /// The document contains no pages to analyze.
    #[error("Document has no pages")]
    EmptyDocument,

    /// No font size in the document qualified as a heading size.
    ///
    /// This is a per-document heuristic miss, not a configuration problem;
    /// batch callers are expected to skip the document and continue.
    #[error("No suitable heading size found")]
    NoHeadingSize,

    /// The target schema failed validation at load time.
    #[error("Invalid target schema: {0}")]
    InvalidSchema(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoHeadingSize;
        assert_eq!(err.to_string(), "No suitable heading size found");

        let err = Error::InvalidSchema("node with empty name".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid target schema: node with empty name"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
