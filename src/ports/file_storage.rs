//! Object-storage port for uploaded supporting documents.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for storing supporting-document files and obtaining a public URL.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL.
    async fn upload(&self, key: &str, bytes: &[u8], mime_type: &str) -> Result<String, StorageError>;
}

/// Storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage rejected upload: {0}")]
    Rejected(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}
