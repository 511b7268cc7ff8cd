//! Gmail adapters.

mod draft_gateway;

pub use draft_gateway::GmailDraftGateway;
