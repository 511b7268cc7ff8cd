//! HTTP adapters - REST API implementations.
//!
//! Each feature area has its own router, DTOs, and handlers. Responses
//! share one envelope: `{"success": bool, ...}` with `error` and a
//! machine-readable `code` on failure.

pub mod artists;
pub mod documents;
pub mod drafts;
mod response;

pub use artists::{artists_router, ArtistsAppState};
pub use documents::{documents_router, DocumentsAppState};
pub use drafts::{drafts_router, DraftsAppState};
pub use response::{ApiError, AuthenticatedUser};

use axum::routing::get;
use axum::Router;

/// Assembles the full application router.
pub fn build_router(
    documents: DocumentsAppState,
    artists: ArtistsAppState,
    drafts: DraftsAppState,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(documents_router().with_state(documents))
        .merge(artists_router().with_state(artists))
        .merge(drafts_router().with_state(drafts))
}

async fn health() -> &'static str {
    "ok"
}
