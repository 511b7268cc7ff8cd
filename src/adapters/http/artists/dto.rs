//! HTTP DTOs for tracked-artist endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::applicant::PersonRecord;
use crate::domain::tracker::{ReconcileOutcome, StatusAction, TrackedArtist};

/// Response listing a user's tracked artists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistListResponse {
    pub success: bool,
    pub artists: Vec<TrackedArtist>,
}

/// Request to reconcile newly extracted records into the tracker.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    pub artists: Vec<PersonRecord>,
}

/// Response for a reconciliation pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    pub success: bool,
    pub artists: Vec<TrackedArtist>,
    #[serde(flatten)]
    pub outcome: ReconcileOutcome,
}

/// Request to advance an artist's workflow status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub action: StatusAction,
}

/// Response carrying one artist.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResponse {
    pub success: bool,
    pub artist: TrackedArtist,
}

/// Request to upload a supporting document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentRequest {
    pub filename: String,
    pub mime_type: String,
    /// File bytes, base64-encoded.
    pub data: String,
}

/// Bare success envelope (deletion).
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}
