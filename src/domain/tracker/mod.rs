//! Tracked-artist workflow state and reconciliation.

mod reconcile;
mod tracked_artist;

pub use reconcile::{reconcile, DuplicateKey, ReconcileOutcome, SkippedDuplicate};
pub use tracked_artist::{ArtistStatus, StatusAction, TrackedArtist, VisaDocument};
