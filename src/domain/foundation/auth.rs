//! Authentication types for the domain layer.
//!
//! These types represent a caller identified by a validated bearer token.
//! They have no provider dependencies; any token issuer can populate them
//! through the `SessionValidator` port.

use super::Username;
use thiserror::Error;

/// Caller extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Username taken from the token subject. Also the profile key.
    pub id: Username,

    /// Email claim, when the issuer provides one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: Username, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// True when this caller owns the profile keyed by `username`.
    pub fn owns(&self, username: &Username) -> bool {
        &self.id == username
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service could not be reached or is misconfigured.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should obtain a new token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AuthenticatedUser {
        AuthenticatedUser::new(
            Username::new("alice").unwrap(),
            Some("alice@example.com".to_string()),
        )
    }

    #[test]
    fn authenticated_user_owns_its_own_profile() {
        let user = alice();
        assert!(user.owns(&Username::new("alice").unwrap()));
        assert!(!user.owns(&Username::new("bob").unwrap()));
    }

    #[test]
    fn expired_and_invalid_tokens_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }

    #[test]
    fn auth_error_displays_message() {
        assert_eq!(
            AuthError::service_unavailable("no secret").to_string(),
            "Auth service unavailable: no secret"
        );
    }
}
