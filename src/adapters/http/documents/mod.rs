//! Document extraction and merge endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::DocumentsAppState;
pub use routes::documents_router;
