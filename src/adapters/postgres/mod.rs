//! PostgreSQL repository adapters.

mod applicant_repository;
mod document_repository;

pub use applicant_repository::PostgresApplicantRepository;
pub use document_repository::PostgresDocumentRepository;
