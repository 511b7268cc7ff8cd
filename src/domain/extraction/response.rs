//! Parsing of LLM completion text into record arrays.
//!
//! Per-document responses are parsed leniently (the caller masks failures
//! with a placeholder); the merge response is parsed strictly and a
//! failure there aborts the whole merge.

use serde_json::Value;

use crate::domain::extraction::NOTES_SEPARATOR;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Locates the outermost JSON array in free-form completion text.
///
/// Models occasionally wrap the array in prose or code fences; everything
/// outside the first `[` and last `]` is discarded.
fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parses a per-document extraction response into raw JSON objects.
pub fn parse_person_array(raw: &str) -> Result<Vec<Value>, DomainError> {
    let candidate = extract_json_array(raw).unwrap_or(raw.trim());
    let parsed: Value = serde_json::from_str(candidate).map_err(|e| {
        DomainError::new(
            ErrorCode::LlmParseFailed,
            format!("Completion was not a JSON array: {}", e),
        )
    })?;
    match parsed {
        Value::Array(items) => Ok(items),
        other => Err(DomainError::new(
            ErrorCode::LlmParseFailed,
            format!("Expected array but got {}", json_type_name(&other)),
        )),
    }
}

/// Parses a merge response: the JSON array before [`NOTES_SEPARATOR`] and
/// the free-text notes after it. Parse failure here is a hard failure.
pub fn parse_merge_response(raw: &str) -> Result<(Vec<Value>, String), DomainError> {
    let (json_part, notes_part) = match raw.split_once(NOTES_SEPARATOR) {
        Some((json, notes)) => (json, notes.trim().to_string()),
        None => (raw, String::new()),
    };
    let people = parse_person_array(json_part)?;
    Ok((people, notes_part))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let items = parse_person_array(r#"[{"familyName": "Smith"}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["familyName"], "Smith");
    }

    #[test]
    fn parses_array_wrapped_in_prose_and_fences() {
        let raw = "Here is the data:\n```json\n[{\"givenName\": \"Alice\"}]\n```\nDone.";
        let items = parse_person_array(raw).unwrap();
        assert_eq!(items[0]["givenName"], "Alice");
    }

    #[test]
    fn rejects_non_array_json() {
        let err = parse_person_array(r#"{"familyName": "Smith"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::LlmParseFailed);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_person_array("[{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::LlmParseFailed);
    }

    #[test]
    fn merge_response_splits_on_separator() {
        let raw = "[{\"familyName\": \"Smith\"}]\n---NOTES---\nMissing: passportNumber";
        let (people, notes) = parse_merge_response(raw).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(notes, "Missing: passportNumber");
    }

    #[test]
    fn merge_response_without_separator_has_empty_notes() {
        let (people, notes) = parse_merge_response("[{}]").unwrap();
        assert_eq!(people.len(), 1);
        assert!(notes.is_empty());
    }

    #[test]
    fn malformed_merge_response_is_a_hard_failure() {
        let err = parse_merge_response("I could not find any people.").unwrap_err();
        assert_eq!(err.code, ErrorCode::LlmParseFailed);
    }
}
