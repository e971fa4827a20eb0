//! Error types for the figure extractor.
//!
//! Layout and input failures are fatal for the document being processed and
//! are returned as [`Error`]. Ambiguous matches are not errors: they surface
//! as orphan figures and orphan captions on the page.

/// Result type alias for figure extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting figures from a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document layout cannot be handled (more than two columns, or no
    /// content region could be derived)
    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    /// The input is empty or inconsistent (no pages, no usable text boxes,
    /// invalid image dimensions)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page image could not be decoded
    #[error("Image error: {0}")]
    Image(String),
}

impl Error {
    /// True for errors that mean the document itself cannot be processed, as
    /// opposed to environment failures such as a missing file.
    pub fn is_document_failure(&self) -> bool {
        matches!(self, Error::UnsupportedLayout(_) | Error::MalformedInput(_))
    }
}
