//! Command handlers orchestrating the ports.

mod create_draft;
mod extract_document;
mod merge_documents;
mod run_batch;
mod tracker;
mod upload_document;

pub use create_draft::{CreateDraftCommand, CreateReplyDraftHandler};
pub use extract_document::{ExtractDocumentCommand, ExtractDocumentHandler};
pub use merge_documents::MergeDocumentsHandler;
pub use run_batch::{BatchInput, BatchPhase, BatchReport, BatchRunner, UnitFailure};
pub use tracker::{
    DeleteArtistHandler, ListArtistsHandler, ReconcileTrackerHandler, TrackerReconcileResult,
    UpdateArtistStatusHandler,
};
pub use upload_document::{UploadDocumentCommand, UploadDocumentHandler};
