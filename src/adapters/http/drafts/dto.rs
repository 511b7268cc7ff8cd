//! HTTP DTOs for draft endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::applicant::PersonRecord;
use crate::ports::DraftAttachment;

/// Request to create a reply draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    /// Delegated OAuth access token.
    pub access_token: String,
    /// The applicant the reply concerns.
    pub artist: PersonRecord,
    pub recipient: Option<String>,
    pub body_text: String,
    pub in_reply_to: Option<String>,
    pub thread_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<DraftAttachment>,
}

/// Response for a created draft.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftResponse {
    pub success: bool,
    pub draft_id: String,
}
