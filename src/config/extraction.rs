//! Extraction pipeline tuning.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Batch-loop pacing and limits. The delays exist purely to stay under
/// upstream rate limits; tests zero them out.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Fixed delay between documents in a batch, in milliseconds.
    #[serde(default = "default_throttle_delay_ms")]
    pub throttle_delay_ms: u64,

    /// Fixed delay before a retry of a failed document, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Additional attempts after the first failure, per document.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum characters of extracted text sent to the LLM. Longer text
    /// is truncated silently (a known lossy limitation).
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

impl ExtractionConfig {
    pub fn throttle_delay(&self) -> Duration {
        Duration::from_millis(self.throttle_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validates extraction configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_retries > 10 {
            return Err(ValidationError::RetryCountTooLarge);
        }
        if self.max_text_chars == 0 {
            return Err(ValidationError::InvalidTruncationLimit);
        }
        Ok(())
    }

    /// Zero-delay settings for tests.
    pub fn immediate() -> Self {
        Self {
            throttle_delay_ms: 0,
            retry_delay_ms: 0,
            max_retries: default_max_retries(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            throttle_delay_ms: default_throttle_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retries: default_max_retries(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

fn default_throttle_delay_ms() -> u64 {
    2000
}

fn default_retry_delay_ms() -> u64 {
    3000
}

fn default_max_retries() -> u32 {
    2
}

fn default_max_text_chars() -> usize {
    10_000
}
