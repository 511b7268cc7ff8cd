//! One attachment's extraction result, held for the duration of a single
//! extract-and-merge operation.

use serde::{Deserialize, Serialize};

use crate::domain::applicant::{PersonRecord, Provenance};
use crate::domain::extraction::DocumentKind;

/// The per-document output of LLM call #1, plus the raw text the merge
/// step will re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExtractionUnit {
    /// Original attachment filename.
    pub filename: String,
    /// Extracted (and possibly truncated) plain text.
    pub text: String,
    /// Heuristic classification used to pick the prompt variant.
    pub kind: DocumentKind,
    /// Partial records guessed from this document alone.
    pub records: Vec<PersonRecord>,
    /// Email the attachment came from.
    #[serde(default)]
    pub provenance: Provenance,
    /// True when `records` is the sentinel placeholder substituted after
    /// an extraction failure, not real document data.
    #[serde(default)]
    pub placeholder: bool,
}

impl DocumentExtractionUnit {
    pub fn new(filename: impl Into<String>, text: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            kind,
            records: Vec::new(),
            provenance: Provenance::default(),
            placeholder: false,
        }
    }

    /// Attaches email provenance to the unit and to every record in it.
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        for record in &mut self.records {
            record.provenance = provenance.clone();
        }
        self.provenance = provenance;
        self
    }
}
