//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `COS_PORTAL`
//! prefix and `__` separating nested sections.
//!
//! # Example
//!
//! ```no_run
//! use cos_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod database;
mod error;
mod extraction;
mod gmail;
mod server;
mod storage;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use extraction::ExtractionConfig;
pub use gmail::GmailConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment).
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection).
    pub database: DatabaseConfig,

    /// Completion provider configuration (OpenAI-compatible API).
    pub ai: AiConfig,

    /// Object-storage configuration (Supabase storage).
    pub storage: StorageConfig,

    /// Mail provider configuration (Gmail API).
    #[serde(default)]
    pub gmail: GmailConfig,

    /// Extraction pipeline tuning (throttle, retries, truncation).
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file when present (development), then environment
    /// variables such as `COS_PORTAL__SERVER__PORT=8080` and
    /// `COS_PORTAL__DATABASE__URL=postgres://...`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COS_PORTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all configuration sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        self.extraction.validate()?;
        Ok(())
    }
}
