//! Error types for page sources.
//!
//! Uses [`thiserror`] for error derivation. A [`SourceError`] on one page
//! never aborts a document; the page is reported as failed instead.

use thiserror::Error;

/// Error obtaining a page's text layer.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Error reading input data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid JSON, or not shaped like a text-layer dump.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested page does not exist.
    #[error("page index {index} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested 0-based index.
        index: usize,
        /// Number of pages in the source.
        count: usize,
    },

    /// A page entry exists but cannot be read as a text layer.
    #[error("malformed page {index}: {reason}")]
    MalformedPage {
        /// 0-based page index.
        index: usize,
        /// What was wrong with the entry.
        reason: String,
    },
}
