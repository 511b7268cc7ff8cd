//! Supabase storage adapter for supporting-document uploads.
//!
//! Uploads land in a public bucket; the returned URL is the stable
//! public-object path.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use tracing::info;

use crate::config::StorageConfig;
use crate::ports::{FileStorage, StorageError};

/// Object storage backed by the Supabase storage REST API.
pub struct SupabaseFileStorage {
    base_url: String,
    bucket: String,
    service_key: Secret<String>,
    client: Client,
}

impl SupabaseFileStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            service_key: Secret::new(config.service_key.clone()),
            client: Client::new(),
        }
    }

    fn upload_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }
}

#[async_trait]
impl FileStorage for SupabaseFileStorage {
    async fn upload(&self, key: &str, bytes: &[u8], mime_type: &str) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.upload_url(key))
            .header(
                "Authorization",
                format!("Bearer {}", self.service_key.expose_secret()),
            )
            .header("Content-Type", mime_type)
            .header("x-upsert", "true")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected(format!("{}: {}", status, body)));
        }

        info!(key, bytes = bytes.len(), "uploaded supporting document");
        Ok(self.public_url(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseFileStorage {
        SupabaseFileStorage::new(&StorageConfig {
            url: "https://proj.supabase.co/".to_string(),
            service_key: "key".to_string(),
            bucket: "visa-documents".to_string(),
        })
    }

    #[test]
    fn urls_are_built_from_bucket_and_key() {
        let s = storage();
        assert_eq!(
            s.upload_url("abc/passport.pdf"),
            "https://proj.supabase.co/storage/v1/object/visa-documents/abc/passport.pdf"
        );
        assert_eq!(
            s.public_url("abc/passport.pdf"),
            "https://proj.supabase.co/storage/v1/object/public/visa-documents/abc/passport.pdf"
        );
    }
}
