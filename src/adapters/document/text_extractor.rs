//! PDF/Word text extraction.
//!
//! Attachments often arrive with missing or wrong MIME metadata, so the
//! format is decided by sniffing the leading bytes: a `%PDF` signature
//! selects PDF parsing, anything else is attempted as a Word document.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use tracing::{debug, warn};

use crate::ports::{TextExtractionError, TextExtractor};

/// How far into the buffer to look for the PDF signature. Some producers
/// prepend a BOM or junk before the header.
const PDF_SNIFF_WINDOW: usize = 1024;

/// Text extractor over `pdf-extract` and `docx-rs`.
pub struct DocumentTextExtractor {
    /// Extracted text beyond this many characters is dropped before any
    /// LLM call to bound prompt cost. Lossy and silent by design of the
    /// original pipeline; logged here at `warn`.
    max_chars: usize,
}

impl DocumentTextExtractor {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| TextExtractionError::ParseFailure(format!("pdf: {}", e)))
    }

    fn extract_word(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
        let docx = read_docx(bytes)
            .map_err(|e| TextExtractionError::UnsupportedFormat(format!("not PDF or Word: {}", e)))?;

        let mut paragraphs: Vec<String> = Vec::new();
        for child in docx.document.children.iter() {
            if let DocumentChild::Paragraph(para) = child {
                let text: String = para
                    .children
                    .iter()
                    .filter_map(|pc| match pc {
                        ParagraphChild::Run(run) => Some(
                            run.children
                                .iter()
                                .filter_map(|rc| match rc {
                                    RunChild::Text(t) => Some(t.text.as_str()),
                                    _ => None,
                                })
                                .collect::<Vec<_>>()
                                .join(""),
                        ),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("");
                if !text.is_empty() {
                    paragraphs.push(text);
                }
            }
        }
        Ok(paragraphs.join("\n"))
    }

    fn truncate(&self, filename: &str, text: String) -> String {
        if text.chars().count() <= self.max_chars {
            return text;
        }
        warn!(
            filename,
            limit = self.max_chars,
            original_chars = text.chars().count(),
            "truncating extracted text before LLM call"
        );
        text.chars().take(self.max_chars).collect()
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, bytes: &[u8], filename: &str) -> Result<String, TextExtractionError> {
        if bytes.is_empty() {
            return Err(TextExtractionError::EmptyResult);
        }

        let window = &bytes[..bytes.len().min(PDF_SNIFF_WINDOW)];
        let is_pdf = window.windows(4).any(|w| w == b"%PDF");

        let text = if is_pdf {
            debug!(filename, "PDF signature found, parsing as PDF");
            self.extract_pdf(bytes)?
        } else {
            debug!(filename, "no PDF signature, attempting Word parse");
            self.extract_word(bytes)?
        };

        if text.trim().is_empty() {
            return Err(TextExtractionError::EmptyResult);
        }

        Ok(self.truncate(filename, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DocumentTextExtractor {
        DocumentTextExtractor::new(10_000)
    }

    #[test]
    fn empty_buffer_is_empty_result() {
        let err = extractor().extract(&[], "empty.pdf").unwrap_err();
        assert!(matches!(err, TextExtractionError::EmptyResult));
    }

    #[test]
    fn garbage_bytes_are_unsupported() {
        let err = extractor()
            .extract(b"hello, not a document", "junk.bin")
            .unwrap_err();
        assert!(matches!(err, TextExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn corrupt_pdf_is_a_parse_failure() {
        // Signature says PDF, body is garbage.
        let mut bytes = b"%PDF-1.7\n".to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        let err = extractor().extract(&bytes, "broken.pdf").unwrap_err();
        assert!(matches!(err, TextExtractionError::ParseFailure(_)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let e = DocumentTextExtractor::new(3);
        let truncated = e.truncate("t.pdf", "héllo wörld".to_string());
        assert_eq!(truncated, "hél");
    }
}
