//! PDF text extraction module.

mod extractor;
mod layout;
#[cfg(test)]
pub(crate) mod testing;

pub use extractor::PdfExtractor;
pub use layout::GridText;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains only images (scanned document).
    Image,
    /// Contains both text and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

impl PdfType {
    /// Whether the document has a text layer statements can be read from.
    pub fn has_text(self) -> bool {
        matches!(self, PdfType::Text | PdfType::Hybrid)
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Classify the document from its extracted lines.
    fn analyze(&self, lines: &[String]) -> PdfType;

    /// Extract text lines, pages in order. Columns follow glyph positions, so
    /// fixed-width layouts keep their offsets.
    fn extract_lines(&self) -> Result<Vec<String>>;

    /// Extract the text of the entire PDF.
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_lines()?.join("\n"))
    }
}
