//! Configuration error types

use thiserror::Error;

/// Startup failure: the environment could not be read or holds bad values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A configuration value that parsed but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("cannot bind to host '{0}'")]
    InvalidBindAddress(String),

    #[error("server.port must not be 0")]
    InvalidPort,

    #[error("{0} must be between 1 and 300 seconds")]
    InvalidTimeout(&'static str),

    #[error("storage.url for the {backend} backend must start with {expected}")]
    UrlSchemeMismatch {
        backend: &'static str,
        expected: &'static str,
    },

    #[error("storage.max_connections must be between 1 and 100")]
    InvalidPoolSize,

    #[error("storage.collection is a Redis key prefix and may only contain [A-Za-z0-9_-]")]
    InvalidKeyPrefix,

    #[error("auth.jwt_secret must be at least 32 bytes")]
    JwtSecretTooShort,

    #[error("auth.issuer must use https in production")]
    IssuerMustBeHttps,
}
