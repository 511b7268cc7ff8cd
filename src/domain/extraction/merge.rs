//! Deterministic merge post-processing.
//!
//! Everything after the merge LLM call is deterministic: canonical field
//! ordering, policy-constant overwrite, provenance repair, and the
//! cross-person itinerary join. Co-listed artists share a tour leg, so
//! the one record with a complete date range and venue is more
//! trustworthy than the LLM's per-field guesses for the others.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::applicant::{PersonRecord, Provenance};
use crate::domain::extraction::DocumentExtractionUnit;

/// Result of a completed merge: one canonical record per person plus the
/// notes the model produced about missing critical fields.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub records: Vec<PersonRecord>,
    pub notes: String,
}

/// Canonicalizes and repairs the merge call's raw output.
pub fn finalize_merge(
    raw_people: Vec<Value>,
    units: &[DocumentExtractionUnit],
    notes: String,
) -> MergeOutput {
    let mut records: Vec<PersonRecord> = raw_people
        .iter()
        .map(|value| {
            let mut record = PersonRecord::from_llm_value(value);
            record.apply_policy_constants();
            record
        })
        .collect();

    repair_provenance(&mut records, units);
    repair_itinerary_consistency(&mut records);

    MergeOutput { records, notes }
}

/// The merge must not lose provenance just because the LLM omitted it from
/// its JSON output. When the first record came back without an email
/// origin, copy the first unit's provenance onto every record.
fn repair_provenance(records: &mut [PersonRecord], units: &[DocumentExtractionUnit]) {
    let missing = records
        .first()
        .map(|r| r.provenance.email_from.is_none())
        .unwrap_or(false);
    if !missing {
        return;
    }

    let source = units
        .iter()
        .map(|u| &u.provenance)
        .find(|p| !p.is_empty())
        .cloned();
    let Some(source) = source else {
        debug!("no unit carries email provenance; nothing to repair");
        return;
    };

    info!(from = ?source.email_from, "repairing provenance from source documents");
    for record in records.iter_mut() {
        if source.email_id.is_some() {
            record.provenance.email_id = source.email_id.clone();
        }
        if source.email_subject.is_some() {
            record.provenance.email_subject = source.email_subject.clone();
        }
        if source.email_from.is_some() {
            record.provenance.email_from = source.email_from.clone();
        }
    }
}

/// When multiple people were detected, the record with a fully populated
/// date range and venue is the itinerary authority; its dates, venue, and
/// (when present) salary overwrite every other record's.
fn repair_itinerary_consistency(records: &mut [PersonRecord]) {
    if records.len() < 2 {
        return;
    }

    let authority = match records.iter().find(|r| r.has_complete_itinerary()) {
        Some(found) => found.clone(),
        None => {
            warn!("no complete itinerary record found; keeping individual dates and venues");
            return;
        }
    };

    info!(
        venue = %authority.venue_address,
        start = %format!(
            "{}/{}/{}",
            authority.show_date_start_day,
            authority.show_date_start_month,
            authority.show_date_start_year
        ),
        "propagating itinerary dates and venue across {} records",
        records.len()
    );
    for record in records.iter_mut() {
        record.adopt_itinerary(&authority);
    }
}
