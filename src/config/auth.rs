//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

const MIN_SECRET_LEN: usize = 32;

/// Bearer-token authentication configuration (HS256 JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify token signatures
    pub jwt_secret: SecretString,

    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    pub audience: String,

    /// Clock skew tolerance for `exp`/`nbf`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the issuer.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("auth.issuer"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("auth.audience"));
        }

        if production && !self.issuer.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }

        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}
