//! Integration tests for the extract-and-merge pipeline.
//!
//! These drive the full flow against in-memory adapters and a scripted
//! completion service: batch extraction, merge post-processing, and
//! tracker reconciliation.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use cos_portal::adapters::ai::MockCompletionService;
use cos_portal::adapters::storage::{InMemoryApplicantRepository, InMemoryDocumentRepository};
use cos_portal::application::handlers::{
    BatchInput, BatchPhase, BatchRunner, ExtractDocumentHandler, MergeDocumentsHandler,
    ReconcileTrackerHandler, UpdateArtistStatusHandler,
};
use cos_portal::config::ExtractionConfig;
use cos_portal::domain::applicant::{PersonRecord, Provenance, FIELD_ORDER};
use cos_portal::domain::foundation::ErrorCode;
use cos_portal::domain::tracker::{ArtistStatus, StatusAction};
use cos_portal::ports::{TextExtractionError, TextExtractor};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Treats the input bytes as UTF-8 text; the real PDF/Word parsing is
/// covered by the adapter's own tests.
struct TextPassthrough;

impl TextExtractor for TextPassthrough {
    fn extract(&self, bytes: &[u8], _filename: &str) -> Result<String, TextExtractionError> {
        let text = String::from_utf8_lossy(bytes).to_string();
        if text.trim().is_empty() {
            Err(TextExtractionError::EmptyResult)
        } else {
            Ok(text)
        }
    }
}

fn runner(mock: Arc<MockCompletionService>) -> BatchRunner {
    BatchRunner::new(
        ExtractDocumentHandler::new(
            Arc::new(TextPassthrough),
            mock.clone(),
            Arc::new(InMemoryDocumentRepository::new()),
        ),
        MergeDocumentsHandler::new(mock),
        ExtractionConfig::immediate(),
    )
}

fn input(filename: &str, text: &str, from: Option<&str>) -> BatchInput {
    BatchInput {
        filename: filename.to_string(),
        bytes: text.as_bytes().to_vec(),
        provenance: Provenance {
            email_id: from.map(|_| "msg-1".to_string()),
            email_subject: from.map(|_| "CoS documents".to_string()),
            email_from: from.map(str::to_string),
        },
    }
}

const ITINERARY_TEXT: &str =
    "Tour itinerary: Alice Smith (DJ) and Bob Jones (DJ). Venue: O2 Arena, London. \
     Show dates 1st-5th August 2025. Artist fee AF 8000.";
const DETAILS_TEXT: &str =
    "Artist details. Name: Alice Smith. Passport number X1234567. Date of birth 02/03/1990.";

// =============================================================================
// The two-document scenario from the original workflow
// =============================================================================

#[tokio::test]
async fn itinerary_plus_details_merge_into_consistent_records() {
    let mock = Arc::new(MockCompletionService::new());
    // LLM call #1 for the itinerary document.
    mock.push_response(
        r#"[
            {"givenName": "Alice", "familyName": "Smith", "artistRole": "DJ",
             "showDateStartDay": "01", "showDateStartMonth": "7", "showDateStartYear": "2025",
             "showDateEndDay": "05", "showDateEndMonth": "7", "showDateEndYear": "2025",
             "grossSalary": "8000", "venueAddress": "O2 Arena, London"},
            {"givenName": "Bob", "familyName": "Jones", "artistRole": "DJ"}
        ]"#,
    );
    // LLM call #1 for the details document.
    mock.push_response(
        r#"[{"givenName": "Alice", "familyName": "Smith", "passportNumber": "X1234567",
             "birthDay": "02", "birthMonth": "2", "birthYear": "1990"}]"#,
    );
    // LLM call #2: the merge. Bob comes back without dates or venue.
    mock.push_response(
        r#"[
            {"givenName": "Alice", "familyName": "Smith", "passportNumber": "X1234567",
             "countryOfBirth": "United Kingdom",
             "showDateStartDay": "01", "showDateStartMonth": "7", "showDateStartYear": "2025",
             "showDateEndDay": "05", "showDateEndMonth": "7", "showDateEndYear": "2025",
             "grossSalary": 8000, "venueAddress": "O2 Arena, London"},
            {"givenName": "Bob", "familyName": "Jones"}
        ]
        ---NOTES---
        Missing: Bob Jones passportNumber"#,
    );

    let report = runner(mock)
        .run(
            vec![
                input("summer-tour-itinerary.pdf", ITINERARY_TEXT, Some("agent@example.com")),
                input("alice-artist-details.docx", DETAILS_TEXT, None),
            ],
            CancellationToken::new(),
        )
        .await;

    assert_eq!(report.phase, BatchPhase::Done);
    assert!(report.failures.is_empty());
    let merge = report.merge.expect("merge output");
    assert_eq!(merge.records.len(), 2);

    let alice = &merge.records[0];
    let bob = &merge.records[1];

    // Field completeness: every canonical field present on every record.
    for record in [alice, bob] {
        let value = serde_json::to_value(record).unwrap();
        for key in FIELD_ORDER {
            assert!(value.get(key).is_some(), "missing field {}", key);
        }
    }

    // Cross-person consistency: Bob shares Alice's itinerary.
    assert_eq!(alice.venue_address, "O2 Arena, London");
    assert_eq!(bob.venue_address, "O2 Arena, London");
    assert_eq!(bob.show_date_start_day, "01");
    assert_eq!(bob.show_date_start_month, "7");
    assert_eq!(bob.show_date_end_day, "05");
    assert_eq!(bob.gross_salary, "8000");

    // Alice keeps her passport from the details document.
    assert_eq!(alice.passport_number, "X1234567");

    // Constant-field invariance.
    for record in [alice, bob] {
        assert_eq!(record.job_title, "Touring DJ");
        assert_eq!(record.job_type, "X3145");
        assert_eq!(record.for_each, "PERF");
        assert_eq!(record.certify_maintenance, "Y");
        assert_eq!(record.total_weekly_hours, "2");
        assert_eq!(record.does_migrant_need_to_leave_and_reenter, "Y");
        assert_eq!(
            record.creative_code_compliance,
            "Creative Sector - Live Music - No Code of Conduct"
        );
    }
    assert!(alice
        .summary_of_job_description
        .contains("from United Kingdom"));

    // Provenance preservation: the itinerary email survives onto both.
    for record in [alice, bob] {
        assert_eq!(record.provenance.email_from.as_deref(), Some("agent@example.com"));
        assert_eq!(record.provenance.email_id.as_deref(), Some("msg-1"));
    }

    assert_eq!(merge.notes, "Missing: Bob Jones passportNumber");
}

#[tokio::test]
async fn malformed_merge_response_fails_hard_with_units_intact() {
    let mock = Arc::new(MockCompletionService::new());
    mock.push_response(r#"[{"givenName": "Alice", "familyName": "Smith"}]"#);
    mock.push_response("The documents describe one artist named Alice.");

    let report = runner(mock)
        .run(
            vec![input("details.pdf", DETAILS_TEXT, None)],
            CancellationToken::new(),
        )
        .await;

    assert_eq!(report.phase, BatchPhase::Failed);
    assert_eq!(report.error.unwrap().code, ErrorCode::LlmParseFailed);
    // Zero records emitted, but the extracted unit is kept for a retry.
    assert!(report.merge.is_none());
    assert_eq!(report.units.len(), 1);
    assert_eq!(report.units[0].records[0].given_name, "Alice");
}

// =============================================================================
// Tracker reconciliation properties
// =============================================================================

fn record(given: &str, family: &str, passport: &str) -> PersonRecord {
    let mut r = PersonRecord::empty();
    r.given_name = given.to_string();
    r.family_name = family.to_string();
    r.passport_number = passport.to_string();
    r
}

#[tokio::test]
async fn dedup_is_idempotent_and_status_is_monotonic() {
    let repo = Arc::new(InMemoryApplicantRepository::new());
    let reconcile = ReconcileTrackerHandler::new(repo.clone());
    let status = UpdateArtistStatusHandler::new(repo.clone());

    let result = reconcile
        .handle("ops@example.com", vec![record("Alice", "Smith", "X1234567")])
        .await
        .unwrap();
    assert_eq!(result.outcome.added, 1);
    let id = result.artists[0].id;

    // Copy JSON, then upload: pending -> processing -> approved.
    status.handle(&id, StatusAction::CopiedJson).await.unwrap();
    let artist = status
        .handle(&id, StatusAction::DocumentUploaded)
        .await
        .unwrap();
    assert_eq!(artist.status, ArtistStatus::Approved);

    // Same passport again: no new entry, status preserved.
    let result = reconcile
        .handle("ops@example.com", vec![record("Alice", "Smith", "X1234567")])
        .await
        .unwrap();
    assert_eq!(result.outcome.added, 0);
    assert_eq!(result.artists.len(), 1);
    assert_eq!(result.artists[0].status, ArtistStatus::Approved);

    // A later copy action must not regress the approved entry.
    let artist = status.handle(&id, StatusAction::CopiedJson).await.unwrap();
    assert_eq!(artist.status, ArtistStatus::Approved);
}

#[tokio::test]
async fn placeholder_records_flow_through_but_stay_marked() {
    let mock = Arc::new(MockCompletionService::new());
    // Per-document call returns prose, so the placeholder policy kicks in.
    mock.push_response("no structured data here");
    mock.push_response(r#"[{"givenName": "Artist", "familyName": "Unknown"}]---NOTES---"#);

    let report = runner(mock)
        .run(
            vec![input("scan.pdf", "passport number something", None)],
            CancellationToken::new(),
        )
        .await;

    assert_eq!(report.phase, BatchPhase::Done);
    assert!(report.units[0].placeholder);
    assert_eq!(report.units[0].records[0].passport_number, "UNKNOWN123");
}
