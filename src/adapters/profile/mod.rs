//! Profile store adapters
//!
//! - `InMemoryProfileStore` - process-local, for development and tests
//! - `PgProfileStore` - document store, one JSONB row per username
//! - `RedisProfileStore` - key-value table, one hash per username

mod in_memory;
mod postgres;
mod redis;

pub use in_memory::InMemoryProfileStore;
pub use postgres::PgProfileStore;
pub use self::redis::RedisProfileStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ProfileStore;

/// Build the store selected by configuration.
///
/// Connects (and migrates, when enabled) before returning, so a bad URL
/// fails startup instead of the first request.
pub async fn connect_store(config: &StorageConfig) -> Result<Arc<dyn ProfileStore>, DomainError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory profile store; data is lost on restart");
            Ok(Arc::new(InMemoryProfileStore::new()))
        }
        StorageBackend::Postgres => {
            let url = configured_url(config)?;
            let store =
                PgProfileStore::connect(url, config.max_connections, config.connect_timeout())
                    .await?;
            if config.run_migrations {
                store.run_migrations().await?;
            }
            tracing::info!("connected to postgres profile store");
            Ok(Arc::new(store))
        }
        StorageBackend::Redis => {
            let url = configured_url(config)?;
            let store =
                RedisProfileStore::connect(url, &config.collection, config.connect_timeout())
                    .await?;
            tracing::info!(collection = %config.collection, "connected to redis profile store");
            Ok(Arc::new(store))
        }
    }
}

fn configured_url(config: &StorageConfig) -> Result<&str, DomainError> {
    config
        .url()
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_needs_no_connection() {
        let store = connect_store(&StorageConfig::default()).await.unwrap();
        let username = crate::domain::foundation::Username::new("alice").unwrap();
        assert!(store.get(&username).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn postgres_backend_without_url_fails() {
        let config = StorageConfig {
            backend: StorageBackend::Postgres,
            ..Default::default()
        };
        let err = connect_store(&config).await.err().unwrap();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn redis_backend_without_url_fails() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            ..Default::default()
        };
        let err = connect_store(&config).await.err().unwrap();
        assert_eq!(err.message(), "storage.url must be set");
    }
}
