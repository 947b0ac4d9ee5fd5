//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `FINANCE_TRACKER` prefix and nested
//! values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use finance_tracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod error;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Profile storage backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bearer-token authentication. The `/auth` routes are only mounted when set.
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `FINANCE_TRACKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FINANCE_TRACKER__STORAGE__BACKEND=redis` -> `storage.backend = redis`
    /// - `FINANCE_TRACKER__STORAGE__URL=...` -> `storage.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FINANCE_TRACKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.storage.validate()?;
        if let Some(auth) = &self.auth {
            auth.validate(self.server.is_production())?;
        }
        Ok(())
    }
}
