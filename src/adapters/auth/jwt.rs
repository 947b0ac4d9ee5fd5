//! HS256 JWT adapter for the `SessionValidator` port.
//!
//! Tokens are signed with a shared secret. A token is accepted when its
//! signature verifies and its issuer, audience, and expiry claims match the
//! configured values. The `sub` claim becomes the caller's username.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Username};
use crate::ports::SessionValidator;

/// Claims this service reads from a bearer token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Validates shared-secret JWTs.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = config.leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!("Token issued for another service: {}", e);
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let id = Username::new(data.claims.sub).map_err(|_| {
            tracing::warn!("Token has blank subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(id, data.claims.email))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.validation.iss)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}
