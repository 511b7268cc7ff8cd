//! Gmail draft gateway.
//!
//! Builds the RFC 2822 raw message (multipart/mixed when attachments are
//! present), base64url-encodes it, and creates the draft through the
//! Gmail REST API with the caller's delegated access token.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::GmailConfig;
use crate::ports::{DraftHandle, DraftRequest, MailError, MailGateway};

const ATTACHMENT_BOUNDARY: &str = "cos_portal_attachment_boundary";

/// Mail gateway backed by the Gmail API.
pub struct GmailDraftGateway {
    base_url: String,
    client: Client,
}

impl GmailDraftGateway {
    pub fn new(config: &GmailConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn drafts_url(&self) -> String {
        format!("{}/gmail/v1/users/me/drafts", self.base_url)
    }
}

#[async_trait]
impl MailGateway for GmailDraftGateway {
    async fn create_draft(
        &self,
        access_token: &str,
        request: &DraftRequest,
    ) -> Result<DraftHandle, MailError> {
        let raw = URL_SAFE_NO_PAD.encode(build_raw_message(request));

        let mut message = json!({ "raw": raw });
        if let Some(thread_id) = &request.thread_id {
            message["threadId"] = json!(thread_id);
        }

        let response = self
            .client
            .post(self.drafts_url())
            .bearer_auth(access_token)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            200 | 201 => {}
            401 => return Err(MailError::AuthExpired),
            403 => return Err(MailError::PermissionDenied),
            _ => {
                let body = response.text().await.unwrap_or_default();
                return Err(MailError::Upstream(format!("{}: {}", status, body)));
            }
        }

        let body: DraftResponse = response
            .json()
            .await
            .map_err(|e| MailError::Upstream(format!("unreadable draft response: {}", e)))?;

        info!(draft_id = %body.id, "Gmail draft created");
        Ok(DraftHandle { draft_id: body.id })
    }
}

#[derive(Debug, Deserialize)]
struct DraftResponse {
    id: String,
}

/// Assembles the RFC 2822 message. Plain text only when there are no
/// attachments, multipart/mixed otherwise.
fn build_raw_message(request: &DraftRequest) -> String {
    let mut email = String::new();
    email.push_str(&format!("To: {}\r\n", request.to));
    email.push_str(&format!("Subject: {}\r\n", request.subject));
    if let Some(in_reply_to) = &request.in_reply_to {
        email.push_str(&format!("In-Reply-To: {}\r\n", in_reply_to));
        email.push_str(&format!("References: {}\r\n", in_reply_to));
    }
    email.push_str("MIME-Version: 1.0\r\n");

    if request.attachments.is_empty() {
        email.push_str("Content-Type: text/plain; charset=\"UTF-8\"\r\n\r\n");
        email.push_str(&request.body_text);
        return email;
    }

    email.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{}\"\r\n\r\n",
        ATTACHMENT_BOUNDARY
    ));

    email.push_str(&format!("--{}\r\n", ATTACHMENT_BOUNDARY));
    email.push_str("Content-Type: text/plain; charset=\"UTF-8\"\r\n\r\n");
    email.push_str(&request.body_text);
    email.push_str("\r\n");

    for attachment in &request.attachments {
        email.push_str(&format!("--{}\r\n", ATTACHMENT_BOUNDARY));
        email.push_str(&format!(
            "Content-Type: {}; name=\"{}\"\r\n",
            attachment.mime_type, attachment.filename
        ));
        email.push_str("Content-Transfer-Encoding: base64\r\n");
        email.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
            attachment.filename
        ));
        email.push_str(&attachment.data);
        email.push_str("\r\n");
    }
    email.push_str(&format!("--{}--", ATTACHMENT_BOUNDARY));
    email
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::DraftAttachment;

    fn request() -> DraftRequest {
        DraftRequest {
            to: "agent@example.com".to_string(),
            subject: "Re: CoS request".to_string(),
            body_text: "Documents attached.".to_string(),
            in_reply_to: Some("<original@mail.example>".to_string()),
            thread_id: Some("thread-1".to_string()),
            attachments: vec![],
        }
    }

    #[test]
    fn plain_reply_has_text_content_type() {
        let raw = build_raw_message(&request());
        assert!(raw.starts_with("To: agent@example.com\r\n"));
        assert!(raw.contains("Subject: Re: CoS request\r\n"));
        assert!(raw.contains("In-Reply-To: <original@mail.example>\r\n"));
        assert!(raw.contains("References: <original@mail.example>\r\n"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.ends_with("Documents attached."));
        assert!(!raw.contains("multipart/mixed"));
    }

    #[test]
    fn attachments_switch_to_multipart() {
        let mut req = request();
        req.attachments.push(DraftAttachment {
            filename: "visa.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            data: "QUJD".to_string(),
        });
        let raw = build_raw_message(&req);

        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("Content-Disposition: attachment; filename=\"visa.pdf\""));
        assert!(raw.contains("QUJD"));
        assert!(raw.ends_with(&format!("--{}--", ATTACHMENT_BOUNDARY)));
        // Body part plus one attachment plus the closing marker.
        assert_eq!(raw.matches(ATTACHMENT_BOUNDARY).count(), 4);
    }

    #[test]
    fn raw_encoding_is_url_safe() {
        let encoded = URL_SAFE_NO_PAD.encode(build_raw_message(&request()));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
    }
}
