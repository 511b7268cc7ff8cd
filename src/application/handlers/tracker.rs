//! Tracker handlers - list, reconcile, status updates, and deletion.

use std::sync::Arc;
use tracing::info;

use crate::domain::applicant::PersonRecord;
use crate::domain::foundation::{ArtistId, DomainError};
use crate::domain::tracker::{reconcile, ReconcileOutcome, StatusAction, TrackedArtist};
use crate::ports::ApplicantRepository;

/// Result of a reconciliation pass: the updated list plus what happened.
#[derive(Debug)]
pub struct TrackerReconcileResult {
    pub artists: Vec<TrackedArtist>,
    pub outcome: ReconcileOutcome,
}

/// Lists a user's tracked artists.
pub struct ListArtistsHandler {
    applicants: Arc<dyn ApplicantRepository>,
}

impl ListArtistsHandler {
    pub fn new(applicants: Arc<dyn ApplicantRepository>) -> Self {
        Self { applicants }
    }

    pub async fn handle(&self, user_email: &str) -> Result<Vec<TrackedArtist>, DomainError> {
        self.applicants.find_by_user(user_email).await
    }
}

/// Folds newly extracted records into the tracked list.
pub struct ReconcileTrackerHandler {
    applicants: Arc<dyn ApplicantRepository>,
}

impl ReconcileTrackerHandler {
    pub fn new(applicants: Arc<dyn ApplicantRepository>) -> Self {
        Self { applicants }
    }

    pub async fn handle(
        &self,
        user_email: &str,
        records: Vec<PersonRecord>,
    ) -> Result<TrackerReconcileResult, DomainError> {
        let mut artists = self.applicants.find_by_user(user_email).await?;
        let before = artists.len();

        let outcome = reconcile(&mut artists, records);

        // Only appended entries are new; existing ones are untouched by
        // design and need no write.
        for artist in &artists[before..] {
            self.applicants.save(user_email, artist).await?;
        }

        info!(
            user = user_email,
            added = outcome.added,
            skipped = outcome.skipped.len(),
            "tracker reconciled"
        );
        Ok(TrackerReconcileResult { artists, outcome })
    }
}

/// Applies a workflow action to one artist.
pub struct UpdateArtistStatusHandler {
    applicants: Arc<dyn ApplicantRepository>,
}

impl UpdateArtistStatusHandler {
    pub fn new(applicants: Arc<dyn ApplicantRepository>) -> Self {
        Self { applicants }
    }

    pub async fn handle(
        &self,
        id: &ArtistId,
        action: StatusAction,
    ) -> Result<TrackedArtist, DomainError> {
        let mut artist = self
            .applicants
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::artist_not_found(id))?;

        if artist.apply(action) {
            self.applicants.update(&artist).await?;
        }
        Ok(artist)
    }
}

/// Deletes one artist. Destructive; clients confirm before calling.
pub struct DeleteArtistHandler {
    applicants: Arc<dyn ApplicantRepository>,
}

impl DeleteArtistHandler {
    pub fn new(applicants: Arc<dyn ApplicantRepository>) -> Self {
        Self { applicants }
    }

    pub async fn handle(&self, id: &ArtistId) -> Result<(), DomainError> {
        let artist = self
            .applicants
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::artist_not_found(id))?;

        info!(artist = %artist.record.display_name(), "deleting tracked artist");
        self.applicants.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryApplicantRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::tracker::ArtistStatus;

    const USER: &str = "ops@example.com";

    fn record(given: &str, family: &str, passport: &str) -> PersonRecord {
        let mut r = PersonRecord::empty();
        r.given_name = given.to_string();
        r.family_name = family.to_string();
        r.passport_number = passport.to_string();
        r
    }

    #[tokio::test]
    async fn reconcile_persists_only_new_entries() {
        let repo = Arc::new(InMemoryApplicantRepository::new());
        let handler = ReconcileTrackerHandler::new(repo.clone());

        let first = handler
            .handle(USER, vec![record("Alice", "Smith", "X1")])
            .await
            .unwrap();
        assert_eq!(first.outcome.added, 1);

        let second = handler
            .handle(
                USER,
                vec![record("Alice", "Smith", "X1"), record("Bob", "Jones", "Y2")],
            )
            .await
            .unwrap();
        assert_eq!(second.outcome.added, 1);
        assert_eq!(second.outcome.skipped.len(), 1);
        assert_eq!(repo.count().await, 2);
    }

    #[tokio::test]
    async fn status_action_is_applied_and_persisted() {
        let repo = Arc::new(InMemoryApplicantRepository::new());
        let reconciler = ReconcileTrackerHandler::new(repo.clone());
        let result = reconciler
            .handle(USER, vec![record("Alice", "Smith", "X1")])
            .await
            .unwrap();
        let id = result.artists[0].id;

        let handler = UpdateArtistStatusHandler::new(repo.clone());
        let artist = handler.handle(&id, StatusAction::CopiedJson).await.unwrap();
        assert_eq!(artist.status, ArtistStatus::Processing);

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, ArtistStatus::Processing);
    }

    #[tokio::test]
    async fn unknown_artist_is_not_found() {
        let repo = Arc::new(InMemoryApplicantRepository::new());
        let handler = UpdateArtistStatusHandler::new(repo);
        let err = handler
            .handle(&ArtistId::new(), StatusAction::CopiedJson)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ArtistNotFound);
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let repo = Arc::new(InMemoryApplicantRepository::new());
        let reconciler = ReconcileTrackerHandler::new(repo.clone());
        let result = reconciler
            .handle(USER, vec![record("Alice", "Smith", "X1")])
            .await
            .unwrap();
        let id = result.artists[0].id;

        DeleteArtistHandler::new(repo.clone())
            .handle(&id)
            .await
            .unwrap();
        assert_eq!(repo.count().await, 0);
    }
}
