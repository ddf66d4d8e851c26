//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{GridText, PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// Minimum extracted characters for a document to count as text.
const MIN_TEXT_LEN: usize = 50;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Count image XObjects in the document without decoding them.
    fn count_images(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        let count = doc
            .objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|subtype| subtype.as_name())
                    .is_ok_and(|name| name == b"Image"),
                _ => false,
            })
            .count();

        trace!("Found {} image objects", count);
        count
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Bank statements are often encrypted with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract reads the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self, lines: &[String]) -> PdfType {
        let text_len: usize = lines.iter().map(|line| line.trim().len()).sum();
        let has_text = text_len > MIN_TEXT_LEN;
        let has_images = self.count_images() > 0;

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!("PDF analysis: has_text={}, has_images={} -> {:?}", has_text, has_images, pdf_type);
        pdf_type
    }

    fn extract_lines(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        // pdf_extract parses with its own lopdf, from the decrypted bytes
        let doc = pdf_extract::Document::load_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        let mut grid = GridText::new();
        pdf_extract::output_doc(&doc, &mut grid)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let lines = grid.into_lines();
        trace!("Extracted {} lines", lines.len());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::pdf_from_lines;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert_eq!(extractor.count_images(), 0);
    }

    #[test]
    fn test_invalid_bytes_fail_to_load() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_extract_without_document_fails() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_lines(), Err(PdfError::Parse(_))));
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_analyze_uses_extracted_lines() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.analyze(&[]), PdfType::Empty);
        assert_eq!(extractor.analyze(&["   ".to_string()]), PdfType::Empty);

        let lines = vec!["DETALLE DE MOVIMIENTOS DEL PERIODO CON TODOS LOS CONSUMOS".to_string()];
        assert_eq!(extractor.analyze(&lines), PdfType::Text);
    }

    #[test]
    fn test_text_layer_pdf() {
        let lines: Vec<String> = [
            "BANCO PATAGONIA S.A.",
            "       02.12.24     003456*    SUPERMERCADO DIA      12.345,67",
            "SALDO ACTUAL 93.845,17",
        ]
        .iter()
        .map(|l| l.to_string())
        .collect();

        let mut extractor = PdfExtractor::new();
        extractor.load(&pdf_from_lines(&lines)).unwrap();
        assert_eq!(extractor.page_count(), 1);

        let extracted = extractor.extract_lines().unwrap();
        assert_eq!(extracted, lines);
        assert_eq!(extractor.analyze(&extracted), PdfType::Text);
    }
}
