//! Profile storage configuration
//!
//! One flat section serves every backend. Only the settings the selected
//! backend reads are validated:
//!
//! | backend    | reads                                                        |
//! |------------|--------------------------------------------------------------|
//! | `memory`   | nothing                                                      |
//! | `postgres` | `url`, `max_connections`, `connect_timeout_secs`, `run_migrations` |
//! | `redis`    | `url`, `collection`, `connect_timeout_secs`                  |

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// Which ProfileStore adapter to run against
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
    Redis,
}

impl StorageBackend {
    /// Accepted URL schemes, or `None` when the backend needs no URL.
    fn url_schemes(self) -> Option<&'static [&'static str]> {
        match self {
            StorageBackend::Memory => None,
            StorageBackend::Postgres => Some(&["postgres://", "postgresql://"][..]),
            StorageBackend::Redis => Some(&["redis://", "rediss://"][..]),
        }
    }

    fn name(self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres => "postgres",
            StorageBackend::Redis => "redis",
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Adapter selection
    #[serde(default)]
    pub backend: StorageBackend,

    /// Redis key prefix. PostgreSQL always uses the `financial_profiles` table.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Connection URL, required by the postgres and redis backends
    pub url: Option<String>,

    /// Upper bound of the PostgreSQL connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long to wait for a connection: pool acquire for PostgreSQL,
    /// initial connect for Redis
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Apply the bundled PostgreSQL migrations at startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl StorageConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The connection URL of a networked backend.
    pub fn url(&self) -> Result<&str, ValidationError> {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ValidationError::MissingRequired("storage.url"))
    }

    /// Validate the settings the selected backend reads
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Some(schemes) = self.backend.url_schemes() else {
            return Ok(());
        };

        let url = self.url()?;
        if !schemes.iter().any(|scheme| url.starts_with(scheme)) {
            return Err(ValidationError::UrlSchemeMismatch {
                backend: self.backend.name(),
                expected: schemes[0],
            });
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("storage.connect_timeout_secs"));
        }

        match self.backend {
            StorageBackend::Postgres if !(1..=MAX_POOL_SIZE).contains(&self.max_connections) => {
                Err(ValidationError::InvalidPoolSize)
            }
            StorageBackend::Redis if !is_key_prefix(&self.collection) => {
                Err(ValidationError::InvalidKeyPrefix)
            }
            _ => Ok(()),
        }
    }
}

fn is_key_prefix(collection: &str) -> bool {
    !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            collection: default_collection(),
            url: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
            run_migrations: false,
        }
    }
}

fn default_collection() -> String {
    "financial_profiles".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(backend: StorageBackend, url: &str) -> StorageConfig {
        StorageConfig {
            backend,
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.collection, "financial_profiles");
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_backend_ignores_network_settings() {
        let config = StorageConfig {
            collection: "has space".to_string(),
            max_connections: 0,
            connect_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_networked_backends_require_url() {
        for backend in [StorageBackend::Postgres, StorageBackend::Redis] {
            let config = StorageConfig {
                backend,
                url: Some(String::new()),
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::MissingRequired("storage.url"))
            );
        }
    }

    #[test]
    fn test_url_scheme_must_match_backend() {
        assert_eq!(
            backend(StorageBackend::Postgres, "redis://localhost:6379").validate(),
            Err(ValidationError::UrlSchemeMismatch {
                backend: "postgres",
                expected: "postgres://",
            })
        );
        assert!(backend(StorageBackend::Postgres, "postgresql://localhost/finance")
            .validate()
            .is_ok());
        assert!(backend(StorageBackend::Redis, "rediss://cache.example.com:6380")
            .validate()
            .is_ok());
        assert!(backend(StorageBackend::Redis, "http://localhost:6379")
            .validate()
            .is_err());
    }

    #[test]
    fn test_pool_size_only_checked_for_postgres() {
        for max_connections in [0, 150] {
            let config = StorageConfig {
                max_connections,
                ..backend(StorageBackend::Postgres, "postgres://localhost/finance")
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));

            let config = StorageConfig {
                max_connections,
                ..backend(StorageBackend::Redis, "redis://localhost:6379")
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_key_prefix_only_checked_for_redis() {
        for collection in ["", "profiles:v2", "has space"] {
            let config = StorageConfig {
                collection: collection.to_string(),
                ..backend(StorageBackend::Redis, "redis://localhost:6379")
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidKeyPrefix));

            let config = StorageConfig {
                collection: collection.to_string(),
                ..backend(StorageBackend::Postgres, "postgres://localhost/finance")
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_connect_timeout_bounds() {
        let config = StorageConfig {
            connect_timeout_secs: 0,
            ..backend(StorageBackend::Redis, "redis://localhost:6379")
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout("storage.connect_timeout_secs"))
        );
    }
}
