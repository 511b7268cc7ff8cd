//! HTTP handlers for draft endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};

use crate::application::handlers::{CreateDraftCommand, CreateReplyDraftHandler};
use crate::ports::MailGateway;

use super::dto::{CreateDraftRequest, CreateDraftResponse};
use crate::adapters::http::response::ApiError;

/// Shared state for draft endpoints.
#[derive(Clone)]
pub struct DraftsAppState {
    pub mail: Arc<dyn MailGateway>,
}

impl DraftsAppState {
    pub fn new(mail: Arc<dyn MailGateway>) -> Self {
        Self { mail }
    }
}

/// POST /api/drafts
pub async fn create_draft(
    State(state): State<DraftsAppState>,
    Json(request): Json<CreateDraftRequest>,
) -> Result<Json<CreateDraftResponse>, ApiError> {
    let handle = CreateReplyDraftHandler::new(state.mail.clone())
        .handle(CreateDraftCommand {
            access_token: request.access_token,
            record: request.artist,
            recipient: request.recipient,
            body_text: request.body_text,
            in_reply_to: request.in_reply_to,
            thread_id: request.thread_id,
            attachments: request.attachments,
        })
        .await?;

    Ok(Json(CreateDraftResponse {
        success: true,
        draft_id: handle.draft_id,
    }))
}
