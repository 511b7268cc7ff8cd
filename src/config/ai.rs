//! Completion provider configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// OpenAI-compatible completion API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key.
    pub api_key: String,

    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model for per-document extraction (the cheap, frequent call).
    #[serde(default = "default_extraction_model")]
    pub extraction_model: String,

    /// Model for the merge call (one per batch, harder reasoning).
    #[serde(default = "default_merge_model")]
    pub merge_model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates AI configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_extraction_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_merge_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_rejected() {
        let config = AiConfig {
            api_key: String::new(),
            base_url: default_base_url(),
            extraction_model: default_extraction_model(),
            merge_model: default_merge_model(),
            timeout_secs: default_timeout(),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        ));
    }
}
