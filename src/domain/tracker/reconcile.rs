//! Deduplication of newly extracted records against the tracked list.
//!
//! Passport number is the primary natural key; a (givenName, familyName)
//! pair is the fallback. A duplicate keeps the existing entry exactly as
//! it is - status, uploaded documents, and fields all survive, and the
//! incoming record is dropped.

use serde::{Deserialize, Serialize};

use crate::domain::applicant::PersonRecord;
use crate::domain::tracker::TrackedArtist;

/// Which key matched an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKey {
    Passport,
    Name,
}

/// An incoming record that matched an existing entry and was dropped.
/// Name-only matches are worth surfacing to the user: two different
/// people can share a name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDuplicate {
    pub name: String,
    pub matched_by: DuplicateKey,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub added: usize,
    pub skipped: Vec<SkippedDuplicate>,
}

/// Folds incoming records into the tracked list, deduplicating as it goes.
/// Records that duplicate each other within one batch collapse too.
pub fn reconcile(tracked: &mut Vec<TrackedArtist>, incoming: Vec<PersonRecord>) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();
    for record in incoming {
        match find_duplicate(tracked, &record) {
            Some(matched_by) => outcome.skipped.push(SkippedDuplicate {
                name: record.display_name(),
                matched_by,
            }),
            None => {
                tracked.push(TrackedArtist::new(record));
                outcome.added += 1;
            }
        }
    }
    outcome
}

fn find_duplicate(tracked: &[TrackedArtist], candidate: &PersonRecord) -> Option<DuplicateKey> {
    for existing in tracked {
        let existing = &existing.record;
        if !candidate.passport_number.is_empty()
            && !existing.passport_number.is_empty()
            && candidate.passport_number == existing.passport_number
        {
            return Some(DuplicateKey::Passport);
        }
        if !candidate.given_name.is_empty()
            && !candidate.family_name.is_empty()
            && candidate.given_name == existing.given_name
            && candidate.family_name == existing.family_name
        {
            return Some(DuplicateKey::Name);
        }
    }
    None
}
