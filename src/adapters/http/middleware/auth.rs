//! Authentication middleware and extractor for axum.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The middleware only depends on the `SessionValidator` port, so the JWT
//! validator and the test mock plug in the same way.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser, ErrorCode};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates a `Bearer` token when one is present.
///
/// A valid token puts the `AuthenticatedUser` into request extensions. An
/// invalid token is answered with 401. Requests without a token pass through
/// untouched so that `RequireAuth` decides.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            tracing::debug!(username = %user.id, "request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) if e.requires_reauthentication() => {
            let message = match e {
                AuthError::TokenExpired => "Token expired",
                _ => "Invalid token",
            };
            auth_error_body(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, message)
        }
        Err(e) => {
            tracing::error!(error = %e, "token could not be validated");
            auth_error_body(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "Authentication service unavailable",
            )
        }
    }
}

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                auth_error_body(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                )
            }
        }
    }
}

fn auth_error_body(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message,
            "code": code.to_string(),
        })),
    )
        .into_response()
}
