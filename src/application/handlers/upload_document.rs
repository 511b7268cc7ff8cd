//! UploadDocumentHandler - supporting-document upload for one artist.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ArtistId, DomainError, ErrorCode};
use crate::domain::tracker::{TrackedArtist, VisaDocument};
use crate::ports::{ApplicantRepository, FileStorage};

/// MIME types accepted for supporting documents.
const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

/// Upload size cap.
const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Command to upload a supporting document.
#[derive(Debug, Clone)]
pub struct UploadDocumentCommand {
    pub artist_id: ArtistId,
    pub filename: String,
    pub mime_type: String,
    /// File bytes, base64-encoded.
    pub data: String,
}

/// Handler for supporting-document uploads. Validation happens before any
/// external call; a successful upload advances the artist to approved.
pub struct UploadDocumentHandler {
    applicants: Arc<dyn ApplicantRepository>,
    storage: Arc<dyn FileStorage>,
}

impl UploadDocumentHandler {
    pub fn new(applicants: Arc<dyn ApplicantRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            applicants,
            storage,
        }
    }

    pub async fn handle(&self, cmd: UploadDocumentCommand) -> Result<TrackedArtist, DomainError> {
        let bytes = self.validate(&cmd)?;

        let mut artist = self
            .applicants
            .find_by_id(&cmd.artist_id)
            .await?
            .ok_or_else(|| DomainError::artist_not_found(cmd.artist_id))?;

        let key = format!(
            "{}/{}-{}",
            cmd.artist_id,
            Utc::now().timestamp_millis(),
            sanitize_filename(&cmd.filename)
        );
        let url = self
            .storage
            .upload(&key, &bytes, &cmd.mime_type)
            .await
            .map_err(DomainError::from)?;

        artist.attach_document(VisaDocument {
            url,
            filename: cmd.filename,
            mime_type: cmd.mime_type,
        });
        self.applicants.update(&artist).await?;

        info!(
            artist = %artist.record.display_name(),
            documents = artist.visa_documents.len(),
            "supporting document uploaded"
        );
        Ok(artist)
    }

    fn validate(&self, cmd: &UploadDocumentCommand) -> Result<Vec<u8>, DomainError> {
        if cmd.filename.trim().is_empty() {
            return Err(DomainError::validation("filename", "Missing filename"));
        }
        if !ALLOWED_MIME_TYPES.contains(&cmd.mime_type.as_str()) {
            return Err(DomainError::validation(
                "mimeType",
                format!("Unsupported file type: {}", cmd.mime_type),
            ));
        }
        let bytes = BASE64
            .decode(&cmd.data)
            .map_err(|e| DomainError::validation("data", format!("Invalid base64 data: {}", e)))?;
        if bytes.is_empty() {
            return Err(DomainError::validation("data", "Empty file"));
        }
        if bytes.len() > MAX_FILE_BYTES {
            return Err(DomainError::validation(
                "data",
                format!("File exceeds {} byte limit", MAX_FILE_BYTES),
            ));
        }
        Ok(bytes)
    }
}

/// Keeps storage keys to a safe character set.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryApplicantRepository, InMemoryFileStorage};
    use crate::domain::applicant::PersonRecord;
    use crate::domain::tracker::ArtistStatus;

    async fn seeded() -> (
        UploadDocumentHandler,
        Arc<InMemoryApplicantRepository>,
        Arc<InMemoryFileStorage>,
        ArtistId,
    ) {
        let repo = Arc::new(InMemoryApplicantRepository::new());
        let storage = Arc::new(InMemoryFileStorage::new());
        let artist = TrackedArtist::new(PersonRecord::placeholder());
        let id = artist.id;
        repo.save("ops@example.com", &artist).await.unwrap();
        (
            UploadDocumentHandler::new(repo.clone(), storage.clone()),
            repo,
            storage,
            id,
        )
    }

    fn command(id: ArtistId) -> UploadDocumentCommand {
        UploadDocumentCommand {
            artist_id: id,
            filename: "visa scan (1).pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            data: BASE64.encode(b"%PDF-fake"),
        }
    }

    #[tokio::test]
    async fn upload_attaches_document_and_approves() {
        let (handler, repo, storage, id) = seeded().await;

        let artist = handler.handle(command(id)).await.unwrap();
        assert_eq!(artist.status, ArtistStatus::Approved);
        assert_eq!(artist.visa_documents.len(), 1);
        assert!(artist.visa_documents[0].url.starts_with("memory://"));

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, ArtistStatus::Approved);

        let uploads = storage.uploads().await;
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].0.contains("visa_scan__1_.pdf"));
    }

    #[tokio::test]
    async fn disallowed_mime_is_rejected_before_any_call() {
        let (handler, _, storage, id) = seeded().await;
        let mut cmd = command(id);
        cmd.mime_type = "application/zip".to_string();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(storage.uploads().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_base64_is_rejected() {
        let (handler, _, _, id) = seeded().await;
        let mut cmd = command(id);
        cmd.data = "!!! not base64 !!!".to_string();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_artist_is_not_found() {
        let (handler, _, _, _) = seeded().await;
        let err = handler.handle(command(ArtistId::new())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ArtistNotFound);
    }
}
