//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes surfaced to API clients as machine-readable strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Document extraction errors
    UnsupportedFormat,
    ParseFailure,
    EmptyDocument,

    // LLM errors
    LlmParseFailed,
    RateLimited,
    UpstreamTimeout,
    UpstreamError,

    // Delegated-auth errors
    AuthExpired,
    PermissionRequired,

    // Not found errors
    ArtistNotFound,
    DocumentNotFound,

    // State errors
    InvalidStatusTransition,

    // Infrastructure errors
    StorageError,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::ParseFailure => "PARSE_FAILURE",
            ErrorCode::EmptyDocument => "EMPTY_DOCUMENT",
            ErrorCode::LlmParseFailed => "LLM_PARSE_FAILED",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            ErrorCode::UpstreamError => "UPSTREAM_ERROR",
            ErrorCode::AuthExpired => "AUTH_EXPIRED",
            ErrorCode::PermissionRequired => "PERMISSION_REQUIRED",
            ErrorCode::ArtistNotFound => "ARTIST_NOT_FOUND",
            ErrorCode::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
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

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    /// Creates a not-found error for a tracked artist.
    pub fn artist_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ArtistNotFound, format!("Artist not found: {}", id))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
