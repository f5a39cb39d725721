//! PDF text extraction using lopdf, with pdf-extract as a fallback.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{ExtractedText, Result, TextExtractor};
use crate::error::DocumentError;

/// PDF text extractor.
///
/// Pages are read one at a time with lopdf in page-number order. When lopdf
/// fails on any page or produces only whitespace, the whole buffer is handed
/// to pdf-extract instead, which also emits pages in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new PDF text extractor.
    pub fn new() -> Self {
        Self
    }

    /// Parse the document, decrypting it when it uses an empty password.
    /// The flag reports whether decryption happened.
    fn load(data: &[u8]) -> Result<(Document, bool)> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        if !doc.is_encrypted() {
            return Ok((doc, false));
        }

        if doc.decrypt("").is_err() {
            return Err(DocumentError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        Ok((doc, true))
    }

    /// Per-page lopdf extraction. `None` when some page could not be read.
    fn extract_pages(doc: &Document) -> Option<String> {
        let pages = doc.get_pages();
        let mut text = String::new();

        for (&number, _) in pages.iter() {
            let page_text = match doc.extract_text(&[number]) {
                Ok(t) => t,
                Err(e) => {
                    debug!("lopdf failed on page {}: {}", number, e);
                    return None;
                }
            };

            trace!("Page {}: {} chars", number, page_text.len());

            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&page_text);
        }

        Some(text)
    }

    fn extract_fallback(doc: &mut Document, data: &[u8], decrypted: bool) -> Option<String> {
        // pdf-extract re-parses the bytes, so decrypted documents are re-serialized first
        let mut owned = Vec::new();
        let bytes = if decrypted {
            if let Err(e) = doc.save_to(&mut owned) {
                debug!("Failed to save decrypted PDF for fallback: {}", e);
                return None;
            }
            owned.as_slice()
        } else {
            data
        };

        match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                debug!("pdf-extract failed: {}", e);
                None
            }
            Err(_) => {
                warn!("pdf-extract panicked while reading document");
                None
            }
        }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<ExtractedText> {
        let (mut doc, decrypted) = Self::load(data)?;

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        let text = match Self::extract_pages(&doc) {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                debug!("Falling back to pdf-extract");
                Self::extract_fallback(&mut doc, data, decrypted).unwrap_or_default()
            }
        };

        if text.trim().is_empty() {
            return Err(DocumentError::NoText);
        }

        debug!("Extracted {} chars of text from {} pages", text.len(), page_count);

        Ok(ExtractedText::new(text, page_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_extract_single_page() {
        let pdf = fixtures::text_pdf(&[&["Net Pay: $1,234.56", "Employment Type: Full-Time"]]);

        let text = PdfTextExtractor::new().extract(&pdf).unwrap();

        assert_eq!(text.page_count(), 1);
        assert!(text.as_str().contains("Net Pay: $1,234.56"));
        assert!(text.as_str().contains("Employment Type: Full-Time"));
    }

    #[test]
    fn test_page_order_preserved() {
        let pdf = fixtures::text_pdf(&[&["Page one marker"], &["Page two marker"], &["Page three marker"]]);

        let text = PdfTextExtractor::new().extract(&pdf).unwrap();
        let text = text.as_str();

        assert_eq!(text.matches("marker").count(), 3);
        let one = text.find("Page one").unwrap();
        let two = text.find("Page two").unwrap();
        let three = text.find("Page three").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn test_plain_text_is_rejected() {
        let err = PdfTextExtractor::new()
            .extract(b"Net Pay: $1,234.56\n")
            .unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let err = PdfTextExtractor::new().extract(&[]).unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_truncated_pdf_is_rejected() {
        let pdf = fixtures::text_pdf(&[&["Net Pay: $1,234.56"]]);
        let truncated = &pdf[..pdf.len() / 3];

        assert!(PdfTextExtractor::new().extract(truncated).is_err());
    }

    #[test]
    fn test_label_and_value_objects_become_separate_lines() {
        let pdf = fixtures::two_column_pdf(&[("Net Pay:", "$2,500.00"), ("Employment Type:", "Contractor")]);

        let text = PdfTextExtractor::new().extract(&pdf).unwrap();

        assert_eq!(text.as_str(), "Net Pay:\n$2,500.00\nEmployment Type:\nContractor\n");
    }

    #[test]
    fn test_empty_password_is_decrypted() {
        let pdf = fixtures::empty_password_pdf(&["Net Pay: $1,234.56", "Employment Type: Full-Time"]);

        let text = PdfTextExtractor::new().extract(&pdf).unwrap();

        assert_eq!(text.page_count(), 1);
        assert!(text.as_str().contains("Net Pay: $1,234.56"));
        assert!(text.as_str().contains("Employment Type: Full-Time"));
    }

    #[test]
    fn test_password_protected_is_rejected() {
        let pdf = fixtures::password_protected_pdf(&["Net Pay: $1,234.56"]);

        let err = PdfTextExtractor::new().extract(&pdf).unwrap_err();
        assert!(matches!(err, DocumentError::Encrypted));
    }

    #[test]
    fn test_unreadable_page_falls_back_to_pdf_extract() {
        let pdf = fixtures::untyped_font_pdf(&["Net Pay: $2,500.00", "Employment Type: Contractor"]);

        let doc = Document::load_mem(&pdf).unwrap();
        assert!(doc.extract_text(&[1]).is_err());

        let text = PdfTextExtractor::new().extract(&pdf).unwrap();
        assert_eq!(text.page_count(), 1);
        assert!(text.as_str().contains("Net Pay"));
        assert!(text.as_str().contains("2,500.00"));
        assert!(text.as_str().contains("Contractor"));
    }

    #[test]
    fn test_fallback_reads_decrypted_document() {
        let pdf = fixtures::empty_password_untyped_font_pdf(&["Employment Type: Contractor"]);

        let text = PdfTextExtractor::new().extract(&pdf).unwrap();
        assert!(text.as_str().contains("Contractor"));
    }

    #[test]
    fn test_pdf_without_text_is_rejected() {
        let pdf = fixtures::text_pdf(&[&[]]);

        let err = PdfTextExtractor::new().extract(&pdf).unwrap_err();
        assert!(matches!(err, DocumentError::NoText));
    }
}
