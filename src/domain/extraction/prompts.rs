//! Prompt construction for the two LLM calls.
//!
//! Call #1 extracts fields from a single document, with a variant per
//! document kind. Call #2 merges every document of a batch into one record
//! per person. Prompt text encodes the CoS form rules: zero-indexed
//! months, DD day format, currency symbols stripped from salaries, blanks
//! for anything not present in the documents.

use crate::domain::applicant::FIELD_ORDER;
use crate::domain::extraction::{DocumentExtractionUnit, DocumentKind};

/// System prompt for per-document extraction.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are a visa form data extraction specialist. Extract only the information explicitly provided in the document. Return ONLY valid JSON, no other text.";

/// System prompt for the merge call.
pub const MERGE_SYSTEM_PROMPT: &str =
    "You are a professional document extraction specialist. Return only valid JSON arrays.";

/// Separator between the JSON array and the free-text notes in the merge
/// response.
pub const NOTES_SEPARATOR: &str = "---NOTES---";

/// Concatenates all raw texts with filename separators into one combined
/// document for the merge prompt. Units without text are skipped.
pub fn combined_document_text(units: &[DocumentExtractionUnit]) -> String {
    let mut combined = String::new();
    for unit in units {
        if unit.text.trim().is_empty() {
            continue;
        }
        combined.push_str("\n---\n");
        combined.push_str(&unit.filename);
        combined.push_str(":\n");
        combined.push_str(&unit.text);
    }
    combined
}

/// Builds the per-document extraction prompt for the given classification.
pub fn build_extraction_prompt(kind: DocumentKind, text: &str) -> String {
    match kind {
        DocumentKind::Itinerary => itinerary_prompt(text),
        DocumentKind::Details => details_prompt(text, None),
        DocumentKind::Unknown => details_prompt(
            text,
            Some(
                "NOTE: The document type could not be determined from the filename or content. \
                 Extract BOTH personal details and engagement details (dates, venue, salary) \
                 wherever they appear.",
            ),
        ),
    }
}

fn itinerary_prompt(text: &str) -> String {
    format!(
        r#"Extract key information from this artist itinerary document. Return ONLY a JSON array with this structure:

[{{
  "familyName": "",
  "givenName": "",
  "nationality": "",
  "countryOfBirth": "",
  "artistRole": "",
  "showDateStartDay": "",
  "showDateStartMonth": "",
  "showDateStartYear": "",
  "showDateEndDay": "",
  "showDateEndMonth": "",
  "showDateEndYear": "",
  "grossSalary": "",
  "venueAddress": ""
}}]

Rules:
- Extract artist name, role, event dates, salary, and venue address
- Look for artist roles: "DJ", "Musician", "Band Member", "Tour Manager", "Sound Engineer", "Lighting Technician"
- Use DD format for days, MM format for months (January=0, February=1, etc.)
- Extract salary amount only (no currency symbols)
- Venue address should be the full venue address where the event will take place
- Event dates should be the same for all artists mentioned in this itinerary
- If multiple artists are mentioned in the same itinerary, they all work the same dates
- Leave fields blank if not found

Document: {text}"#
    )
}

fn details_prompt(text: &str, preamble: Option<&str>) -> String {
    let preamble = preamble.map(|p| format!("{}\n\n", p)).unwrap_or_default();
    format!(
        r#"{preamble}You are a visa form data extraction specialist. Extract information from this Certificate of Sponsorship document and return ONLY valid JSON.

CRITICAL RULES:
1. ONLY extract information explicitly provided in the document
2. NEVER make assumptions or fill in missing information
3. Leave fields BLANK ("") if information is not provided
4. Return ONLY a JSON array, no other text

REQUIRED JSON FORMAT:
{schema}

EXTRACTION RULES:
- PRIORITY: Extract PERSONAL DETAILS (name, nationality, passport, birth details)
- Extract artist role if mentioned (DJ, Musician, Band Member, Tour Manager, etc.)
- DO NOT extract venue address from artist details - this should come from itinerary
- Use DD format for days (01, 02, etc.), MM format for months (00-11) where January=0, February=1, etc.
- Extract passport number and details
- For missing event details, leave blank - these will be merged from itinerary PDF

DOCUMENT TEXT:
{text}

Return ONLY the JSON array, no other text."#,
        preamble = preamble,
        schema = person_schema_skeleton(),
        text = text,
    )
}

/// Builds the merge prompt over the combined document text.
pub fn build_merge_prompt(combined_text: &str) -> String {
    format!(
        r#"You are a visa form data extraction specialist. Extract and MERGE information from ALL provided documents to create ONE SINGLE JSON output for a UK Certificate of Sponsorship form.

CRITICAL MERGING RULES:
1. Read ALL documents provided in the input
2. Extract information from EVERY document
3. If multiple people are found, create SEPARATE JSON objects for each person
4. Output an ARRAY of JSON objects, one per person
5. GROUP RELATED ARTISTS who work the same gigs together

CRITICAL RULES:
1. ONLY extract information explicitly provided in the documents
2. NEVER make assumptions or fill in missing information
3. Leave fields BLANK ("") if information is not provided in ANY document

DOCUMENT TYPE DETECTION:
- ITINERARY documents contain: tour schedules, event dates, venue addresses, performance details
- ARTIST DETAILS documents contain: personal information, passport details, birth information, home addresses

VENUE ADDRESS PRIORITY:
- VENUE ADDRESS is ALWAYS found in ITINERARY documents, NEVER in artist details
- When merging, ALWAYS use venue address from itinerary document
- If venue address is in artist details, IGNORE it and use itinerary venue address
- ALL ARTISTS working the same gigs must have IDENTICAL venue addresses

EXTRACTION RULES:
- Extract REAL names (NOT stage names) for familyName, givenName and otherNames (if applicable)
- Use DD format for days (01, 02, etc.), MM format for months (00-11)
- Convert date formats to form standard: "25th Nov 2024" means day=25, month=10, year=2024
- Handle American date formats (MM/DD/YYYY) and convert to form format
- Handle written months: January=0, February=1, March=2, April=3, May=4, June=5, July=6, August=7, September=8, October=9, November=10, December=11
- Handle numeric months: 1=00, 2=01, 3=02, 4=03, 5=04, 6=05, 7=06, 8=07, 9=08, 10=09, 11=10, 12=11
- For single-day performances: use same date for both start and end dates
- For multiple performance dates: use first date for start, last date for end
- Extract fee amount ONLY (ignore currency symbols/codes like GBP, AF, USD, etc.)
- The grossSalary needs to be an integer
- If the year is not mentioned, assume 2025
- Keep all text fields on single lines - replace line breaks with spaces

ARTIST GROUPING LOGIC:
- If multiple artists are mentioned in the same itinerary/tour schedule, they work together
- All artists in the same group must have identical venue addresses, event dates, and gross salary (if applicable)
- If only ONE itinerary document is provided, ALL artists share its dates and venue address

REQUIRED OUTPUT FORMAT (ARRAY OF OBJECTS):
{schema}

NOTES REQUIREMENTS:
Only report missing information for these CRITICAL fields:
- familyName, givenName, nationality, placeOfBirth, countryOfBirth
- birthDay, birthMonth, birthYear, sex, countryOfResidence
- passportNumber, passportIssueDay/Month/Year, passportExpiryDay/Month/Year, placeOfIssueOfPassport
- address, city, postcode, country
- showDateStartDay/Month/Year, showDateEndDay/Month/Year
- grossSalary
- venueAddress (from itinerary document)

IGNORE missing: otherNames, addressLine2/3, county, ukIdCardNumber, ukNationalInsuranceNumber, nationalIdCardNumber, employeeNumber, addPWSAddress, addWSAddress, grossAllowances, allowanceDetails

OUTPUT REQUIREMENTS:
1. Return the JSON array first (no code block markers)
2. Add clear separator: "{separator}"
3. ONLY list missing CRITICAL information - be extremely concise
4. If all critical fields present, output "No critical information missing"
5. All text fields must be single lines (no line breaks within strings)

DOCUMENT TEXT:
{text}

REMEMBER: Report only missing critical fields in notes. Aim for minimal or no notes when possible. ALWAYS output valid JSON (if there are issues in the text with spaces and concatenation then please resolve so the JSON is valid)."#,
        schema = merge_schema_skeleton(),
        separator = NOTES_SEPARATOR,
        text = combined_text,
    )
}

/// One-object JSON array skeleton covering the full canonical schema plus
/// the per-document `artistRole` hint, with blank values.
fn person_schema_skeleton() -> String {
    schema_skeleton(true)
}

/// Merge-output skeleton: the canonical schema only.
fn merge_schema_skeleton() -> String {
    schema_skeleton(false)
}

fn schema_skeleton(include_artist_role: bool) -> String {
    let mut out = String::from("[\n  {\n");
    for key in FIELD_ORDER {
        out.push_str(&format!("    \"{}\": \"\",\n", key));
        if include_artist_role && key == "employeeNumber" {
            out.push_str("    \"artistRole\": \"\",\n");
        }
    }
    // Trailing comma would make the skeleton invalid JSON.
    out.truncate(out.trim_end_matches(",\n").len());
    out.push_str("\n  }\n]");
    out
}
