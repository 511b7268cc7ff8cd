//! Extraction pipeline domain logic.
//!
//! Pure pieces of the extract-and-merge flow: document-type
//! classification, prompt construction, LLM response parsing, and the
//! deterministic merge post-processing. The LLM call itself lives behind
//! the completion port.

mod document_kind;
mod merge;
mod prompts;
mod response;
mod unit;

pub use document_kind::{classify, DocumentKind};
pub use merge::{finalize_merge, MergeOutput};
pub use prompts::{
    build_extraction_prompt, build_merge_prompt, combined_document_text,
    EXTRACTION_SYSTEM_PROMPT, MERGE_SYSTEM_PROMPT, NOTES_SEPARATOR,
};
pub use response::{parse_merge_response, parse_person_array};
pub use unit::DocumentExtractionUnit;
