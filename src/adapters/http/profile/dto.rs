//! HTTP DTOs for profile endpoints.
//!
//! Request bodies deserialize straight into `ProfilePayload`; these types cover
//! the query string and the envelope bodies around it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// `?username=` on the read endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsernameQuery {
    #[serde(default)]
    pub username: Option<String>,
}

/// Body for successful writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn created() -> Self {
        Self {
            message: "User added successfully".to_string(),
        }
    }

    pub fn updated() -> Self {
        Self {
            message: "User details updated successfully".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, error)
    }
}
