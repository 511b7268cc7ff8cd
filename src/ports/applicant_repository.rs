//! Applicant repository port.
//!
//! The original tool kept tracked artists in ad hoc in-memory arrays; the
//! explicit repository interface makes the in-memory version a test
//! double rather than a production path.

use async_trait::async_trait;

use crate::domain::foundation::{ArtistId, DomainError};
use crate::domain::tracker::TrackedArtist;

/// Persistence for the tracked-artist list, keyed by the owning user's
/// email address.
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// Inserts a new tracked artist for a user.
    async fn save(&self, user_email: &str, artist: &TrackedArtist) -> Result<(), DomainError>;

    /// All tracked artists for a user, in insertion order.
    async fn find_by_user(&self, user_email: &str) -> Result<Vec<TrackedArtist>, DomainError>;

    /// Looks up one tracked artist by id.
    async fn find_by_id(&self, id: &ArtistId) -> Result<Option<TrackedArtist>, DomainError>;

    /// Persists updated workflow state for an existing entry.
    async fn update(&self, artist: &TrackedArtist) -> Result<(), DomainError>;

    /// Removes an entry. Missing ids are not an error here; handlers
    /// decide whether absence matters.
    async fn delete(&self, id: &ArtistId) -> Result<(), DomainError>;
}
