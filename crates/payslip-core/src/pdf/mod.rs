//! PDF processing module.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::DocumentError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Text recovered from a document, pages concatenated in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    page_count: u32,
}

impl ExtractedText {
    /// Wrap already-extracted text.
    pub fn new(text: impl Into<String>, page_count: u32) -> Self {
        Self {
            text: text.into(),
            page_count,
        }
    }

    /// The full text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of pages the text was taken from.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }
}

/// Converts raw document bytes into a single linear text buffer.
///
/// Implementations must not keep a reference to `data` after returning.
pub trait TextExtractor: Send + Sync {
    /// Extract the page-ordered text of the document.
    fn extract(&self, data: &[u8]) -> Result<ExtractedText>;
}
