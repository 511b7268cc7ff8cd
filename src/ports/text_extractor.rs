//! Text extraction port - raw document bytes to plain text.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for extracting plain text from PDF or Word document bytes.
///
/// Implementations sniff the content to pick a parser; callers must not
/// send empty text downstream, so whitespace-only output is a failure
/// here rather than at the prompt builder.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], filename: &str) -> Result<String, TextExtractionError>;
}

/// Typed extraction failures.
#[derive(Debug, thiserror::Error)]
pub enum TextExtractionError {
    /// Bytes are neither a parseable PDF nor a Word document.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The parser rejected the document.
    #[error("failed to parse document: {0}")]
    ParseFailure(String),

    /// Parsing succeeded but produced no usable text.
    #[error("document contained no extractable text")]
    EmptyResult,
}

impl From<TextExtractionError> for DomainError {
    fn from(err: TextExtractionError) -> Self {
        let code = match &err {
            TextExtractionError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            TextExtractionError::ParseFailure(_) => ErrorCode::ParseFailure,
            TextExtractionError::EmptyResult => ErrorCode::EmptyDocument,
        };
        DomainError::new(code, err.to_string())
    }
}
