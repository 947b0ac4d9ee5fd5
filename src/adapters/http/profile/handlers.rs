//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::{FetchProfileQuery, ProfileService, SubmitProfileCommand};
use crate::domain::finance::ProfilePayload;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, Username};

use super::dto::{ErrorResponse, HealthResponse, MessageResponse, UsernameQuery};

const WRITE_FAULT: &str = "An error occurred while adding user details";
const READ_FAULT: &str = "An error occurred while fetching user details";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProfileAppState {
    service: Arc<ProfileService>,
}

impl ProfileAppState {
    pub fn new(service: Arc<ProfileService>) -> Self {
        Self { service }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Public handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /addDetails - Create or replace a profile
pub async fn add_details(
    State(state): State<ProfileAppState>,
    body: Result<Json<ProfilePayload>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let username = payload.claimed_username().unwrap_or_default().to_string();
    submit(&state, username, payload).await
}

/// GET /getDetails?username= - Read a profile
pub async fn get_details(
    State(state): State<ProfileAppState>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => fetch_details(&state, query.username.unwrap_or_default()).await,
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

/// GET /getSummary?username= - Read derived totals for a profile
pub async fn get_summary(
    State(state): State<ProfileAppState>,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => fetch_summary(&state, query.username.unwrap_or_default()).await,
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════
// Authenticated handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /auth/addDetails - Write the caller's own profile
pub async fn add_own_details(
    State(state): State<ProfileAppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<ProfilePayload>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match owned_username(&user, payload.claimed_username()) {
        Ok(username) => submit(&state, username.into(), payload).await,
        Err(e) => error_response(e, WRITE_FAULT),
    }
}

/// GET /auth/getDetails - Read the caller's own profile
pub async fn get_own_details(
    State(state): State<ProfileAppState>,
    RequireAuth(user): RequireAuth,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match owned_username(&user, query.username.as_deref()) {
        Ok(username) => fetch_details(&state, username.into()).await,
        Err(e) => error_response(e, READ_FAULT),
    }
}

/// GET /auth/getSummary - Read totals for the caller's own profile
pub async fn get_own_summary(
    State(state): State<ProfileAppState>,
    RequireAuth(user): RequireAuth,
    query: Result<Query<UsernameQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match owned_username(&user, query.username.as_deref()) {
        Ok(username) => fetch_summary(&state, username.into()).await,
        Err(e) => error_response(e, READ_FAULT),
    }
}

/// The caller's username, unless the request names somebody else.
fn owned_username(user: &AuthenticatedUser, claimed: Option<&str>) -> Result<Username, DomainError> {
    let claimed = match claimed.map(Username::new) {
        Some(Ok(claimed)) => claimed,
        // absent or blank: the token subject
        _ => return Ok(user.id.clone()),
    };

    if user.owns(&claimed) {
        Ok(claimed)
    } else {
        Err(
            DomainError::new(ErrorCode::Forbidden, "Cannot access another user's details")
                .with_detail("username", claimed.as_str()),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Shared bodies
// ════════════════════════════════════════════════════════════════════════════

async fn submit(state: &ProfileAppState, username: String, payload: ProfilePayload) -> Response {
    let cmd = SubmitProfileCommand { username, payload };

    match state.service.submit_profile(cmd).await {
        Ok(result) if result.created => {
            (StatusCode::CREATED, Json(MessageResponse::created())).into_response()
        }
        Ok(_) => (StatusCode::OK, Json(MessageResponse::updated())).into_response(),
        Err(e) => error_response(e, WRITE_FAULT),
    }
}

async fn fetch_details(state: &ProfileAppState, username: String) -> Response {
    match state.service.fetch_profile(FetchProfileQuery { username }).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => error_response(e, READ_FAULT),
    }
}

async fn fetch_summary(state: &ProfileAppState, username: String) -> Response {
    match state.service.financial_summary(FetchProfileQuery { username }).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e, READ_FAULT),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Extractor rejections (body or query string) in the shared error shape.
fn bad_request(message: String) -> Response {
    tracing::warn!(error = %message, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

/// Maps a domain error to a response. Storage faults are logged in full and
/// answered with `fault_message` only.
fn error_response(error: DomainError, fault_message: &'static str) -> Response {
    let code = error.code();
    let status = match code {
        c if c.is_validation() => {
            tracing::warn!(error = %error, "rejected profile request");
            StatusCode::BAD_REQUEST
        }
        ErrorCode::ProfileNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        _ => {
            tracing::error!(error = %error, "profile request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(fault_message)),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::new(code, error.message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    fn alice() -> AuthenticatedUser {
        AuthenticatedUser::new(Username::new("alice").unwrap(), None)
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = error_response(DomainError::profile_not_found("alice"), READ_FAULT);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = error_response(ValidationError::empty_field("username").into(), WRITE_FAULT);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = error_response(DomainError::new(ErrorCode::Forbidden, "no"), READ_FAULT);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn storage_faults_map_to_500() {
        for error in [
            DomainError::database("relation does not exist"),
            DomainError::key_value_store("broken pipe"),
            DomainError::serialization("bad json"),
        ] {
            let response = error_response(error, WRITE_FAULT);
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn owned_username_defaults_to_subject() {
        assert_eq!(owned_username(&alice(), None).unwrap().as_str(), "alice");
        assert_eq!(owned_username(&alice(), Some("  ")).unwrap().as_str(), "alice");
        assert_eq!(owned_username(&alice(), Some(" alice ")).unwrap().as_str(), "alice");
    }

    #[test]
    fn owned_username_rejects_other_users() {
        let err = owned_username(&alice(), Some("bob")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
