//! Document-type classification.
//!
//! A best-effort keyword heuristic over the filename and extracted text.
//! There is no authoritative signal; `Unknown` is a first-class outcome
//! handled by its own prompt variant rather than silently defaulting.

use serde::{Deserialize, Serialize};

/// What kind of source document this appears to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Tour schedules, event dates, venue addresses, performance details.
    Itinerary,
    /// Personal information, passport details, birth information.
    Details,
    /// Neither keyword family matched.
    Unknown,
}

const ITINERARY_FILENAME_KEYWORDS: [&str; 6] =
    ["itinerary", "schedule", "event", "tour", "gig", "performance"];
const ITINERARY_TEXT_KEYWORDS: [&str; 4] = ["venue", "performance", "show date", "event date"];

const DETAILS_FILENAME_KEYWORDS: [&str; 6] =
    ["artist", "details", "cos", "sponsorship", "passport", "personal"];
const DETAILS_TEXT_KEYWORDS: [&str; 3] = ["passport number", "date of birth", "place of birth"];

/// Classifies a document from its filename and extracted text.
///
/// Itinerary wins when both keyword families match, since venue and date
/// evidence dominates the downstream prompt choice.
pub fn classify(filename: &str, text: &str) -> DocumentKind {
    let filename = filename.to_lowercase();
    let text = text.to_lowercase();

    let matches_any = |haystack: &str, keywords: &[&str]| {
        keywords.iter().any(|k| haystack.contains(k))
    };

    if matches_any(&filename, &ITINERARY_FILENAME_KEYWORDS)
        || matches_any(&text, &ITINERARY_TEXT_KEYWORDS)
    {
        return DocumentKind::Itinerary;
    }
    if matches_any(&filename, &DETAILS_FILENAME_KEYWORDS)
        || matches_any(&text, &DETAILS_TEXT_KEYWORDS)
    {
        return DocumentKind::Details;
    }
    DocumentKind::Unknown
}
