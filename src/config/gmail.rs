//! Mail provider configuration.
//!
//! OAuth credential management is an external concern; access tokens
//! arrive with each request. Only the API endpoint is configured here.

use serde::Deserialize;

/// Gmail API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GmailConfig {
    /// Gmail API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://gmail.googleapis.com".to_string()
}
