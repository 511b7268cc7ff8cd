//! A PersonRecord augmented with dashboard workflow state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::applicant::PersonRecord;
use crate::domain::foundation::{ArtistId, DomainError, ErrorCode};

/// Workflow status of a tracked artist.
///
/// pending -> processing (JSON copied) -> approved (document uploaded).
/// Approved is terminal; there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtistStatus {
    Pending,
    Processing,
    Approved,
}

impl ArtistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistStatus::Pending => "pending",
            ArtistStatus::Processing => "processing",
            ArtistStatus::Approved => "approved",
        }
    }
}

impl std::str::FromStr for ArtistStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ArtistStatus::Pending),
            "processing" => Ok(ArtistStatus::Processing),
            "approved" => Ok(ArtistStatus::Approved),
            other => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Unknown artist status: {}", other),
            )),
        }
    }
}

/// User actions that advance the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    /// The record's JSON was copied to the clipboard.
    CopiedJson,
    /// A supporting document upload succeeded.
    DocumentUploaded,
}

/// One uploaded supporting document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDocument {
    pub url: String,
    pub filename: String,
    pub mime_type: String,
}

/// A PersonRecord plus workflow state. The id is process-local and not a
/// stable external identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedArtist {
    pub id: ArtistId,
    #[serde(flatten)]
    pub record: PersonRecord,
    pub status: ArtistStatus,
    pub visa_documents: Vec<VisaDocument>,
    pub email_id: String,
    pub recipient_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedArtist {
    /// Creates a new pending entry from an extracted record.
    pub fn new(record: PersonRecord) -> Self {
        let now = Utc::now();
        Self {
            id: ArtistId::new(),
            record,
            status: ArtistStatus::Pending,
            visa_documents: Vec::new(),
            email_id: String::new(),
            recipient_email: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a workflow action.
    ///
    /// Copying JSON never regresses an approved entry; uploads always land
    /// on approved. Returns whether the status changed.
    pub fn apply(&mut self, action: StatusAction) -> bool {
        let next = match (self.status, action) {
            (ArtistStatus::Pending, StatusAction::CopiedJson) => ArtistStatus::Processing,
            (_, StatusAction::DocumentUploaded) => ArtistStatus::Approved,
            (current, StatusAction::CopiedJson) => current,
        };
        let changed = next != self.status;
        if changed {
            self.status = next;
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Sets an explicit status, rejecting regressions from approved.
    pub fn set_status(&mut self, status: ArtistStatus) -> Result<(), DomainError> {
        if self.status == ArtistStatus::Approved && status != ArtistStatus::Approved {
            return Err(DomainError::new(
                ErrorCode::InvalidStatusTransition,
                format!(
                    "Cannot move {} from approved to {}",
                    self.record.display_name(),
                    status.as_str()
                ),
            ));
        }
        if status != self.status {
            self.status = status;
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    /// Records an uploaded supporting document and advances to approved.
    pub fn attach_document(&mut self, document: VisaDocument) {
        self.visa_documents.push(document);
        self.apply(StatusAction::DocumentUploaded);
    }
}
