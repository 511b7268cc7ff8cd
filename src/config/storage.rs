//! Object-storage configuration (Supabase storage).

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase storage configuration for supporting-document uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Project base URL (https://<project>.supabase.co).
    pub url: String,

    /// Service-role key used for uploads.
    pub service_key: String,

    /// Bucket holding uploaded visa documents.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl StorageConfig {
    /// Validates storage configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidStorageUrl);
        }
        if self.service_key.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__SERVICE_KEY"));
        }
        Ok(())
    }
}

fn default_bucket() -> String {
    "visa-documents".to_string()
}
