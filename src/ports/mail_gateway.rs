//! Mail gateway port - reply-draft creation via the user's mail provider.
//!
//! The portal never sends mail itself; it creates drafts in the user's
//! account using a delegated OAuth access token supplied per request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// An attachment for a draft, bytes already base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftAttachment {
    pub filename: String,
    pub mime_type: String,
    pub data: String,
}

/// A reply draft to create.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub to: String,
    pub subject: String,
    pub body_text: String,
    /// Message-ID being replied to, for In-Reply-To/References headers.
    pub in_reply_to: Option<String>,
    /// Provider thread to attach the draft to.
    pub thread_id: Option<String>,
    pub attachments: Vec<DraftAttachment>,
}

/// Handle of a created draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftHandle {
    pub draft_id: String,
}

/// Port for creating drafts in the user's mailbox.
#[async_trait]
pub trait MailGateway: Send + Sync {
    async fn create_draft(
        &self,
        access_token: &str,
        request: &DraftRequest,
    ) -> Result<DraftHandle, MailError>;
}

/// Mail provider failures. Token expiry is distinct so clients can prompt
/// re-authentication instead of showing a generic error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("access token expired or revoked")]
    AuthExpired,

    #[error("insufficient permission for drafts scope")]
    PermissionDenied,

    #[error("mail provider error: {0}")]
    Upstream(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        let code = match &err {
            MailError::AuthExpired => ErrorCode::AuthExpired,
            MailError::PermissionDenied => ErrorCode::PermissionRequired,
            _ => ErrorCode::UpstreamError,
        };
        DomainError::new(code, err.to_string())
    }
}
