//! Route configuration for document endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{extract_document, merge_documents, DocumentsAppState};

/// Creates the documents router.
///
/// Routes:
/// - `POST /api/documents/extract` - extract text and fields from one attachment
/// - `POST /api/documents/merge` - merge a batch of extracted documents
pub fn documents_router() -> Router<DocumentsAppState> {
    Router::new()
        .route("/api/documents/extract", post(extract_document))
        .route("/api/documents/merge", post(merge_documents))
}
