//! Session validation port for bearer token validation.
//!
//! This port is provider-agnostic. The HTTP middleware calls it to turn an
//! `Authorization: Bearer` token into an `AuthenticatedUser`; the token
//! issuer itself (sign-up, login) lives outside this service.
//!
//! # Contract
//!
//! Implementations must:
//! - Validate the token signature
//! - Validate issuer, audience and expiry claims
//! - Return `AuthError::InvalidToken` for malformed/bad signature tokens
//! - Return `AuthError::TokenExpired` for expired tokens
//! - Return `AuthError::ServiceUnavailable` for transient or configuration errors

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
