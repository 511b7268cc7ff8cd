//! CreateReplyDraftHandler - drafts a reply to the agent who sent the
//! documents, with the artist's supporting files attached.

use std::sync::Arc;
use tracing::info;

use crate::domain::applicant::PersonRecord;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{DraftAttachment, DraftHandle, DraftRequest, MailGateway};

/// Command to create a reply draft.
#[derive(Debug, Clone)]
pub struct CreateDraftCommand {
    /// Delegated OAuth access token, passed through opaquely.
    pub access_token: String,
    /// The applicant the reply concerns; provenance supplies the default
    /// recipient and subject.
    pub record: PersonRecord,
    /// Explicit recipient override.
    pub recipient: Option<String>,
    pub body_text: String,
    /// Message-ID being replied to.
    pub in_reply_to: Option<String>,
    /// Mail-provider thread to attach the draft to.
    pub thread_id: Option<String>,
    pub attachments: Vec<DraftAttachment>,
}

/// Handler for reply-draft creation.
pub struct CreateReplyDraftHandler {
    mail: Arc<dyn MailGateway>,
}

impl CreateReplyDraftHandler {
    pub fn new(mail: Arc<dyn MailGateway>) -> Self {
        Self { mail }
    }

    pub async fn handle(&self, cmd: CreateDraftCommand) -> Result<DraftHandle, DomainError> {
        if cmd.access_token.trim().is_empty() {
            return Err(DomainError::validation("accessToken", "Missing access token"));
        }

        let to = cmd
            .recipient
            .clone()
            .filter(|r| !r.trim().is_empty())
            .or_else(|| {
                cmd.record
                    .provenance
                    .email_from
                    .as_deref()
                    .map(address_part)
            })
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ValidationFailed,
                    "No recipient given and the record carries no source email",
                )
            })?;

        let subject = match cmd.record.provenance.email_subject.as_deref() {
            Some(original) if !original.is_empty() => reply_subject(original),
            _ => format!("Re: CoS documents for {}", cmd.record.display_name()),
        };

        let request = DraftRequest {
            to,
            subject,
            body_text: cmd.body_text,
            in_reply_to: cmd.in_reply_to,
            thread_id: cmd.thread_id,
            attachments: cmd.attachments,
        };

        let handle = self.mail.create_draft(&cmd.access_token, &request).await?;
        info!(draft_id = %handle.draft_id, to = %request.to, "reply draft created");
        Ok(handle)
    }
}

/// Extracts the address from a "Display Name <addr@host>" sender.
fn address_part(from: &str) -> String {
    match (from.find('<'), from.rfind('>')) {
        (Some(start), Some(end)) if end > start => from[start + 1..end].trim().to_string(),
        _ => from.trim().to_string(),
    }
}

/// Prefixes "Re: " unless the subject already carries it.
fn reply_subject(original: &str) -> String {
    if original.to_lowercase().starts_with("re:") {
        original.to_string()
    } else {
        format!("Re: {}", original)
    }
}
