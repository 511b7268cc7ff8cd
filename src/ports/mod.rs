//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports. The
//! LLM, the document parsers, the database, the object store, and the
//! mail provider are all injected collaborators - trivially mockable in
//! tests.

mod applicant_repository;
mod completion;
mod document_repository;
mod file_storage;
mod mail_gateway;
mod text_extractor;

pub use applicant_repository::ApplicantRepository;
pub use completion::{CompletionError, CompletionRequest, CompletionResponse, CompletionService};
pub use document_repository::{DocumentRepository, ExtractionStatus, StoredDocument};
pub use file_storage::{FileStorage, StorageError};
pub use mail_gateway::{DraftAttachment, DraftHandle, DraftRequest, MailError, MailGateway};
pub use text_extractor::{TextExtractionError, TextExtractor};
