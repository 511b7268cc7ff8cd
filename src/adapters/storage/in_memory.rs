//! In-memory repository adapters.
//!
//! Test doubles for the persistence ports. The original tool held these
//! lists in ad hoc arrays that vanished on redeploy; here that behavior
//! is confined to tests and development, never the production path.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ArtistId, DocumentId, DomainError};
use crate::domain::tracker::TrackedArtist;
use crate::ports::{
    ApplicantRepository, DocumentRepository, ExtractionStatus, FileStorage, StorageError,
    StoredDocument,
};

/// In-memory tracked-artist store, keyed by user email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicantRepository {
    by_user: Arc<RwLock<HashMap<String, Vec<TrackedArtist>>>>,
}

impl InMemoryApplicantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored data (useful for tests).
    pub async fn clear(&self) {
        self.by_user.write().await.clear();
    }

    /// Total entries across all users.
    pub async fn count(&self) -> usize {
        self.by_user.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl ApplicantRepository for InMemoryApplicantRepository {
    async fn save(&self, user_email: &str, artist: &TrackedArtist) -> Result<(), DomainError> {
        let mut by_user = self.by_user.write().await;
        by_user
            .entry(user_email.to_string())
            .or_default()
            .push(artist.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_email: &str) -> Result<Vec<TrackedArtist>, DomainError> {
        let by_user = self.by_user.read().await;
        Ok(by_user.get(user_email).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, id: &ArtistId) -> Result<Option<TrackedArtist>, DomainError> {
        let by_user = self.by_user.read().await;
        Ok(by_user
            .values()
            .flatten()
            .find(|a| a.id == *id)
            .cloned())
    }

    async fn update(&self, artist: &TrackedArtist) -> Result<(), DomainError> {
        let mut by_user = self.by_user.write().await;
        for artists in by_user.values_mut() {
            if let Some(existing) = artists.iter_mut().find(|a| a.id == artist.id) {
                *existing = artist.clone();
                return Ok(());
            }
        }
        Err(DomainError::artist_not_found(artist.id))
    }

    async fn delete(&self, id: &ArtistId) -> Result<(), DomainError> {
        let mut by_user = self.by_user.write().await;
        for artists in by_user.values_mut() {
            artists.retain(|a| a.id != *id);
        }
        Ok(())
    }
}

/// In-memory source-document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, StoredDocument>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything stored so far (useful for tests).
    pub async fn all(&self) -> Vec<StoredDocument> {
        self.documents.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &StoredDocument) -> Result<(), DomainError> {
        self.documents
            .write()
            .await
            .insert(document.id, document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<StoredDocument>, DomainError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn mark_processed(
        &self,
        id: &DocumentId,
        extracted_text: &str,
        status: ExtractionStatus,
    ) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.get_mut(id) else {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::DocumentNotFound,
                format!("Document not found: {}", id),
            ));
        };
        document.extracted_text = Some(extracted_text.to_string());
        document.status = status;
        document.processed_at = Some(Utc::now());
        Ok(())
    }
}

/// In-memory object storage that fabricates URLs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    uploads: Arc<RwLock<Vec<(String, usize, String)>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// (key, byte length, mime) for each upload so far.
    pub async fn uploads(&self) -> Vec<(String, usize, String)> {
        self.uploads.read().await.clone()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(&self, key: &str, bytes: &[u8], mime_type: &str) -> Result<String, StorageError> {
        self.uploads
            .write()
            .await
            .push((key.to_string(), bytes.len(), mime_type.to_string()));
        Ok(format!("memory://visa-documents/{}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::applicant::PersonRecord;
    use crate::domain::tracker::ArtistStatus;

    #[tokio::test]
    async fn applicants_are_scoped_by_user() {
        let repo = InMemoryApplicantRepository::new();
        let artist = TrackedArtist::new(PersonRecord::placeholder());
        repo.save("a@example.com", &artist).await.unwrap();

        assert_eq!(repo.find_by_user("a@example.com").await.unwrap().len(), 1);
        assert!(repo.find_by_user("b@example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_matching_entry() {
        let repo = InMemoryApplicantRepository::new();
        let mut artist = TrackedArtist::new(PersonRecord::placeholder());
        repo.save("a@example.com", &artist).await.unwrap();

        artist.status = ArtistStatus::Approved;
        repo.update(&artist).await.unwrap();

        let found = repo.find_by_id(&artist.id).await.unwrap().unwrap();
        assert_eq!(found.status, ArtistStatus::Approved);
    }

    #[tokio::test]
    async fn update_of_unknown_artist_fails() {
        let repo = InMemoryApplicantRepository::new();
        let artist = TrackedArtist::new(PersonRecord::placeholder());
        assert!(repo.update(&artist).await.is_err());
    }

    #[tokio::test]
    async fn mark_processed_stores_text_and_timestamp() {
        let repo = InMemoryDocumentRepository::new();
        let document = StoredDocument::new("a.pdf", "QUJD");
        repo.save(&document).await.unwrap();

        repo.mark_processed(&document.id, "extracted", ExtractionStatus::Completed)
            .await
            .unwrap();

        let found = repo.find_by_id(&document.id).await.unwrap().unwrap();
        assert_eq!(found.extracted_text.as_deref(), Some("extracted"));
        assert_eq!(found.status, ExtractionStatus::Completed);
        assert!(found.processed_at.is_some());
    }
}
