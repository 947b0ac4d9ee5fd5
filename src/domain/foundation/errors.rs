//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,

    // Not found errors
    ProfileNotFound,

    // Authorization errors
    Unauthorized,
    Forbidden,
    ServiceUnavailable,

    // Storage errors
    DatabaseError,
    KeyValueStoreError,
    SerializationError,

    InternalError,
}

impl ErrorCode {
    /// True for every code raised by a storage backend.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            ErrorCode::DatabaseError | ErrorCode::KeyValueStoreError | ErrorCode::SerializationError
        )
    }

    /// True for every client input problem.
    pub fn is_validation(&self) -> bool {
        matches!(self, ErrorCode::ValidationFailed | ErrorCode::EmptyField)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::ProfileNotFound => "PROFILE_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::KeyValueStoreError => "KEY_VALUE_STORE_ERROR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a not-found error for the profile keyed by `username`.
    pub fn profile_not_found(username: impl Into<String>) -> Self {
        let username = username.into();
        Self::new(
            ErrorCode::ProfileNotFound,
            format!("No financial profile for user '{}'", username),
        )
        .with_detail("username", username)
    }

    /// Creates a storage error raised by the document database backend.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a storage error raised by the key-value backend.
    pub fn key_value_store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::KeyValueStoreError, message)
    }

    /// Creates a storage error for a document that could not be (de)serialized.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the error came from a storage backend.
    pub fn is_storage_fault(&self) -> bool {
        self.code.is_storage()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::EmptyField { field } => {
                DomainError::new(ErrorCode::EmptyField, err.to_string()).with_detail("field", field.clone())
            }
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::serialization(format!("Failed to (de)serialize profile document: {}", err))
    }
}
