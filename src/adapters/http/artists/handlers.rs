//! HTTP handlers for tracked-artist endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};

use crate::application::handlers::{
    DeleteArtistHandler, ListArtistsHandler, ReconcileTrackerHandler, UpdateArtistStatusHandler,
    UploadDocumentCommand, UploadDocumentHandler,
};
use crate::domain::foundation::ArtistId;
use crate::ports::{ApplicantRepository, FileStorage};

use super::dto::{
    ArtistListResponse, ArtistResponse, DeletedResponse, ReconcileRequest, ReconcileResponse,
    UpdateStatusRequest, UploadDocumentRequest,
};
use crate::adapters::http::response::{ApiError, AuthenticatedUser};

/// Shared state for artist endpoints.
#[derive(Clone)]
pub struct ArtistsAppState {
    pub applicants: Arc<dyn ApplicantRepository>,
    pub storage: Arc<dyn FileStorage>,
}

impl ArtistsAppState {
    pub fn new(applicants: Arc<dyn ApplicantRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            applicants,
            storage,
        }
    }
}

/// GET /api/artists
pub async fn list_artists(
    State(state): State<ArtistsAppState>,
    user: AuthenticatedUser,
) -> Result<Json<ArtistListResponse>, ApiError> {
    let artists = ListArtistsHandler::new(state.applicants.clone())
        .handle(&user.email)
        .await?;
    Ok(Json(ArtistListResponse {
        success: true,
        artists,
    }))
}

/// POST /api/artists/reconcile
pub async fn reconcile_artists(
    State(state): State<ArtistsAppState>,
    user: AuthenticatedUser,
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let result = ReconcileTrackerHandler::new(state.applicants.clone())
        .handle(&user.email, request.artists)
        .await?;
    Ok(Json(ReconcileResponse {
        success: true,
        artists: result.artists,
        outcome: result.outcome,
    }))
}

/// PUT /api/artists/:id/status
pub async fn update_status(
    State(state): State<ArtistsAppState>,
    Path(id): Path<ArtistId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ArtistResponse>, ApiError> {
    let artist = UpdateArtistStatusHandler::new(state.applicants.clone())
        .handle(&id, request.action)
        .await?;
    Ok(Json(ArtistResponse {
        success: true,
        artist,
    }))
}

/// POST /api/artists/:id/documents
pub async fn upload_document(
    State(state): State<ArtistsAppState>,
    Path(id): Path<ArtistId>,
    Json(request): Json<UploadDocumentRequest>,
) -> Result<Json<ArtistResponse>, ApiError> {
    let artist = UploadDocumentHandler::new(state.applicants.clone(), state.storage.clone())
        .handle(UploadDocumentCommand {
            artist_id: id,
            filename: request.filename,
            mime_type: request.mime_type,
            data: request.data,
        })
        .await?;
    Ok(Json(ArtistResponse {
        success: true,
        artist,
    }))
}

/// DELETE /api/artists/:id
pub async fn delete_artist(
    State(state): State<ArtistsAppState>,
    Path(id): Path<ArtistId>,
) -> Result<Json<DeletedResponse>, ApiError> {
    DeleteArtistHandler::new(state.applicants.clone())
        .handle(&id)
        .await?;
    Ok(Json(DeletedResponse { success: true }))
}
