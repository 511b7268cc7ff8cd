//! HTTP handlers for document endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::application::handlers::{
    ExtractDocumentCommand, ExtractDocumentHandler, MergeDocumentsHandler,
};
use crate::domain::extraction::DocumentExtractionUnit;
use crate::domain::foundation::DomainError;
use crate::ports::{CompletionService, DocumentRepository, TextExtractor};

use super::dto::{
    ExtractDocumentRequest, ExtractDocumentResponse, MergeRequest, MergeResponse,
};
use crate::adapters::http::response::ApiError;

/// Shared state for document endpoints. Cloned per request; dependencies
/// are Arc-wrapped ports.
#[derive(Clone)]
pub struct DocumentsAppState {
    pub text_extractor: Arc<dyn TextExtractor>,
    /// Completion service for per-document extraction (cheap model).
    pub extraction_completion: Arc<dyn CompletionService>,
    /// Completion service for the merge call (stronger model).
    pub merge_completion: Arc<dyn CompletionService>,
    /// Stores attachments and their extraction status.
    pub documents: Arc<dyn DocumentRepository>,
}

impl DocumentsAppState {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        extraction_completion: Arc<dyn CompletionService>,
        merge_completion: Arc<dyn CompletionService>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            text_extractor,
            extraction_completion,
            merge_completion,
            documents,
        }
    }

    fn extract_handler(&self) -> ExtractDocumentHandler {
        ExtractDocumentHandler::new(
            self.text_extractor.clone(),
            self.extraction_completion.clone(),
            self.documents.clone(),
        )
    }

    fn merge_handler(&self) -> MergeDocumentsHandler {
        MergeDocumentsHandler::new(self.merge_completion.clone())
    }
}

/// POST /api/documents/extract
pub async fn extract_document(
    State(state): State<DocumentsAppState>,
    Json(request): Json<ExtractDocumentRequest>,
) -> Result<Json<ExtractDocumentResponse>, ApiError> {
    if request.filename.trim().is_empty() {
        return Err(DomainError::validation("filename", "Missing filename").into());
    }
    let bytes = BASE64
        .decode(&request.data)
        .map_err(|e| DomainError::validation("data", format!("Invalid base64 data: {}", e)))?;

    let unit = state
        .extract_handler()
        .handle(ExtractDocumentCommand {
            filename: request.filename.clone(),
            bytes,
            provenance: request.provenance(),
        })
        .await?;

    Ok(Json(unit.into()))
}

/// POST /api/documents/merge
pub async fn merge_documents(
    State(state): State<DocumentsAppState>,
    Json(request): Json<MergeRequest>,
) -> Result<Json<MergeResponse>, ApiError> {
    let units: Vec<DocumentExtractionUnit> = request
        .documents
        .into_iter()
        .map(|dto| dto.into_unit())
        .collect();

    let output = state.merge_handler().handle(&units).await?;

    Ok(Json(MergeResponse {
        success: true,
        merged_data: output.records,
        notes: output.notes,
    }))
}
