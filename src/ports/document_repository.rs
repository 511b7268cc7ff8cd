//! Source-document repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DocumentId, DomainError};

/// Extraction status of a stored attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionStatus {
    Pending,
    Completed,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Pending => "PENDING",
            ExtractionStatus::Completed => "COMPLETED",
            ExtractionStatus::Failed => "FAILED",
        }
    }
}

/// One stored source attachment: raw bytes (base64) plus extraction state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub filename: String,
    /// Raw file bytes, base64-encoded as received from the mail provider.
    pub file_data: String,
    pub extracted_text: Option<String>,
    pub status: ExtractionStatus,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl StoredDocument {
    pub fn new(filename: impl Into<String>, file_data: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            filename: filename.into(),
            file_data: file_data.into(),
            extracted_text: None,
            status: ExtractionStatus::Pending,
            processed_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Persistence for source attachments and their extraction results.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn save(&self, document: &StoredDocument) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<StoredDocument>, DomainError>;

    /// Records the outcome of text extraction for a stored document.
    async fn mark_processed(
        &self,
        id: &DocumentId,
        extracted_text: &str,
        status: ExtractionStatus,
    ) -> Result<(), DomainError>;
}
