//! ExtractDocumentHandler - text extraction plus LLM call #1 for one
//! attachment.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::applicant::{PersonRecord, Provenance};
use crate::domain::extraction::{
    build_extraction_prompt, classify, parse_person_array, DocumentExtractionUnit,
    EXTRACTION_SYSTEM_PROMPT,
};
use crate::domain::foundation::DomainError;
use crate::ports::{
    CompletionError, CompletionRequest, CompletionService, DocumentRepository, ExtractionStatus,
    StoredDocument, TextExtractor,
};

/// Command to extract one attachment.
#[derive(Debug, Clone)]
pub struct ExtractDocumentCommand {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub provenance: Provenance,
}

/// Handler for per-document extraction.
///
/// Failure policy, preserved from the original pipeline: when the model
/// response cannot be parsed or the provider fails terminally, a sentinel
/// placeholder record is substituted so the batch always yields
/// something, and the unit is marked `placeholder`. Rate limits and
/// timeouts are NOT masked - they propagate so the batch loop can back
/// off and retry.
///
/// The attachment and its extraction status are recorded in the document
/// repository as a side channel; persistence failures are logged and do
/// not fail the extraction.
pub struct ExtractDocumentHandler {
    text_extractor: Arc<dyn TextExtractor>,
    completion: Arc<dyn CompletionService>,
    documents: Arc<dyn DocumentRepository>,
}

impl ExtractDocumentHandler {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        completion: Arc<dyn CompletionService>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            text_extractor,
            completion,
            documents,
        }
    }

    pub async fn handle(
        &self,
        cmd: ExtractDocumentCommand,
    ) -> Result<DocumentExtractionUnit, DomainError> {
        let stored = StoredDocument::new(cmd.filename.clone(), BASE64.encode(&cmd.bytes));
        if let Err(err) = self.documents.save(&stored).await {
            warn!(filename = %cmd.filename, %err, "failed to persist source document");
        }

        let text = match self.text_extractor.extract(&cmd.bytes, &cmd.filename) {
            Ok(text) => text,
            Err(err) => {
                self.record_status(&stored, "", ExtractionStatus::Failed).await;
                return Err(err.into());
            }
        };
        self.record_status(&stored, &text, ExtractionStatus::Completed)
            .await;

        let kind = classify(&cmd.filename, &text);
        info!(filename = %cmd.filename, ?kind, chars = text.len(), "document classified");

        let prompt = build_extraction_prompt(kind, &text);
        let request = CompletionRequest::new(EXTRACTION_SYSTEM_PROMPT, prompt);

        let mut unit = DocumentExtractionUnit::new(cmd.filename.clone(), text, kind);
        match self.completion.complete(request).await {
            Ok(response) => match parse_person_array(&response.content) {
                Ok(values) => {
                    unit.records = values.iter().map(PersonRecord::from_llm_value).collect();
                }
                Err(err) => {
                    warn!(filename = %cmd.filename, %err, "unparseable extraction response, substituting placeholder");
                    unit.records = vec![PersonRecord::placeholder()];
                    unit.placeholder = true;
                }
            },
            Err(err @ CompletionError::RateLimited { .. })
            | Err(err @ CompletionError::Timeout { .. }) => {
                // Surfaced distinctly so the batch loop can apply backoff.
                return Err(err.into());
            }
            Err(err) => {
                warn!(filename = %cmd.filename, %err, "completion failed, substituting placeholder");
                unit.records = vec![PersonRecord::placeholder()];
                unit.placeholder = true;
            }
        }

        Ok(unit.with_provenance(cmd.provenance))
    }

    async fn record_status(&self, stored: &StoredDocument, text: &str, status: ExtractionStatus) {
        if let Err(err) = self.documents.mark_processed(&stored.id, text, status).await {
            warn!(filename = %stored.filename, %err, "failed to record extraction status");
        }
    }
}
