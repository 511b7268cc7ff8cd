//! MergeDocumentsHandler - LLM call #2 plus deterministic post-processing.

use std::sync::Arc;
use tracing::info;

use crate::domain::extraction::{
    build_merge_prompt, combined_document_text, finalize_merge, parse_merge_response,
    DocumentExtractionUnit, MergeOutput, MERGE_SYSTEM_PROMPT,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CompletionRequest, CompletionService};

/// Handler for merging a batch of extraction units into one record per
/// person. Unlike per-document extraction, a parse failure here is a hard
/// failure - the caller retries the whole merge.
pub struct MergeDocumentsHandler {
    completion: Arc<dyn CompletionService>,
}

impl MergeDocumentsHandler {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn handle(
        &self,
        units: &[DocumentExtractionUnit],
    ) -> Result<MergeOutput, DomainError> {
        if units.is_empty() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "No documents provided for merging",
            ));
        }

        let combined = combined_document_text(units);
        if combined.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "No extracted text available to merge",
            ));
        }

        let request = CompletionRequest::new(MERGE_SYSTEM_PROMPT, build_merge_prompt(&combined));
        let response = self.completion.complete(request).await?;

        let (raw_people, notes) = parse_merge_response(&response.content)?;
        let output = finalize_merge(raw_people, units, notes);

        info!(
            documents = units.len(),
            people = output.records.len(),
            "merge completed"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionService;
    use crate::domain::applicant::Provenance;
    use crate::domain::extraction::DocumentKind;
    use crate::ports::CompletionError;

    fn units() -> Vec<DocumentExtractionUnit> {
        vec![
            DocumentExtractionUnit::new(
                "tour-itinerary.pdf",
                "O2 Arena, 1-5 Aug 2025, Alice Smith and Bob Jones",
                DocumentKind::Itinerary,
            ),
            DocumentExtractionUnit::new(
                "alice-details.pdf",
                "Alice Smith, passport X1234567",
                DocumentKind::Details,
            )
            .with_provenance(Provenance {
                email_id: Some("msg-7".to_string()),
                email_subject: Some("Visa".to_string()),
                email_from: Some("agent@example.com".to_string()),
            }),
        ]
    }

    #[tokio::test]
    async fn merge_canonicalizes_and_repairs() {
        let mock = Arc::new(MockCompletionService::new());
        mock.push_response(
            r#"[
                {"familyName": "Smith", "givenName": "Alice", "passportNumber": "X1234567",
                 "showDateStartDay": "01", "showDateStartMonth": "7", "showDateStartYear": "2025",
                 "showDateEndDay": "05", "showDateEndMonth": "7", "showDateEndYear": "2025",
                 "venueAddress": "O2 Arena, London"},
                {"familyName": "Jones", "givenName": "Bob"}
            ]
            ---NOTES---
            Missing: Bob Jones passportNumber"#,
        );
        let handler = MergeDocumentsHandler::new(mock.clone());

        let output = handler.handle(&units()).await.unwrap();
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.notes, "Missing: Bob Jones passportNumber");

        // Cross-person repair: Bob shares Alice's itinerary.
        assert_eq!(output.records[1].venue_address, "O2 Arena, London");
        assert_eq!(output.records[1].show_date_start_month, "7");
        // Provenance repair from the details unit.
        assert_eq!(
            output.records[0].provenance.email_from.as_deref(),
            Some("agent@example.com")
        );

        // The merge prompt embedded both documents' text.
        let prompt = &mock.requests()[0].prompt;
        assert!(prompt.contains("tour-itinerary.pdf"));
        assert!(prompt.contains("alice-details.pdf"));
    }

    #[tokio::test]
    async fn malformed_response_is_a_hard_failure() {
        let mock = Arc::new(MockCompletionService::new());
        mock.push_response("I found two people but cannot produce JSON.");
        let handler = MergeDocumentsHandler::new(mock);

        let err = handler.handle(&units()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LlmParseFailed);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let mock = Arc::new(MockCompletionService::new());
        mock.push_error(CompletionError::Unavailable("down".to_string()));
        let handler = MergeDocumentsHandler::new(mock);

        let err = handler.handle(&units()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamError);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let handler = MergeDocumentsHandler::new(Arc::new(MockCompletionService::new()));
        let err = handler.handle(&[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn textless_batch_is_rejected_before_the_llm_call() {
        let mock = Arc::new(MockCompletionService::new());
        let handler = MergeDocumentsHandler::new(mock.clone());
        let textless = vec![DocumentExtractionUnit::new("a.pdf", "  ", DocumentKind::Unknown)];

        let err = handler.handle(&textless).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(mock.calls(), 0);
    }
}
