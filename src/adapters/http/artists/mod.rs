//! Tracked-artist endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::ArtistsAppState;
pub use routes::artists_router;
