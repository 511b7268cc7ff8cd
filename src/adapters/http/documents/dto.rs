//! HTTP DTOs for document extraction and merge endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::applicant::{PersonRecord, Provenance};
use crate::domain::extraction::{DocumentExtractionUnit, DocumentKind};

/// Request to extract one attachment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractDocumentRequest {
    pub filename: String,
    /// Raw file bytes, base64-encoded.
    pub data: String,
    pub email_id: Option<String>,
    pub email_subject: Option<String>,
    pub email_from: Option<String>,
}

impl ExtractDocumentRequest {
    pub fn provenance(&self) -> Provenance {
        Provenance {
            email_id: self.email_id.clone(),
            email_subject: self.email_subject.clone(),
            email_from: self.email_from.clone(),
        }
    }
}

/// Response for one extracted attachment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractDocumentResponse {
    pub success: bool,
    pub filename: String,
    pub document_type: DocumentKind,
    pub extracted_text: String,
    pub text_length: usize,
    pub extracted_data: Vec<PersonRecord>,
    pub people_found: usize,
    /// True when the records are the failure-masking placeholder.
    pub placeholder: bool,
    pub notes: String,
}

impl From<DocumentExtractionUnit> for ExtractDocumentResponse {
    fn from(unit: DocumentExtractionUnit) -> Self {
        let people_found = unit.records.len();
        let notes = format!(
            "Extracted {} person(s) from {}",
            people_found, unit.filename
        );
        Self {
            success: true,
            filename: unit.filename,
            document_type: unit.kind,
            text_length: unit.text.len(),
            extracted_text: unit.text,
            extracted_data: unit.records,
            people_found,
            placeholder: unit.placeholder,
            notes,
        }
    }
}

/// One document of a merge batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeUnitDto {
    pub filename: String,
    pub extracted_text: String,
    /// Classification from the extract step; re-derived when absent.
    pub document_type: Option<DocumentKind>,
    #[serde(default)]
    pub extracted_data: Vec<PersonRecord>,
    pub email_id: Option<String>,
    pub email_subject: Option<String>,
    pub email_from: Option<String>,
}

impl MergeUnitDto {
    pub fn into_unit(self) -> DocumentExtractionUnit {
        let kind = self
            .document_type
            .unwrap_or_else(|| crate::domain::extraction::classify(&self.filename, &self.extracted_text));
        let provenance = Provenance {
            email_id: self.email_id,
            email_subject: self.email_subject,
            email_from: self.email_from,
        };
        let mut unit = DocumentExtractionUnit::new(self.filename, self.extracted_text, kind);
        unit.records = self.extracted_data;
        unit.with_provenance(provenance)
    }
}

/// Request to merge a batch of extracted documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub documents: Vec<MergeUnitDto>,
}

/// Response for a completed merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResponse {
    pub success: bool,
    pub merged_data: Vec<PersonRecord>,
    pub notes: String,
}
