//! Shared HTTP response envelope and request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Failure envelope: `{"success": false, "error": ..., "code": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
}

/// Wrapper turning a [`DomainError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        let body = ErrorBody {
            success: false,
            error: self.0.message.clone(),
            code: self.0.code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::UnsupportedFormat
        | ErrorCode::EmptyDocument
        | ErrorCode::ParseFailure => StatusCode::BAD_REQUEST,
        ErrorCode::AuthExpired => StatusCode::UNAUTHORIZED,
        ErrorCode::PermissionRequired => StatusCode::FORBIDDEN,
        ErrorCode::ArtistNotFound | ErrorCode::DocumentNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStatusTransition => StatusCode::CONFLICT,
        ErrorCode::UpstreamTimeout => StatusCode::REQUEST_TIMEOUT,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::LlmParseFailed
        | ErrorCode::UpstreamError
        | ErrorCode::StorageError
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The requesting user, identified by email.
///
/// Session management is delegated to the OAuth provider; the trusted
/// frontend forwards the authenticated address in a header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Rejection for a missing user header.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: "Authentication is required".to_string(),
            code: "AUTH_REQUIRED".to_string(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let email = parts
                .headers
                .get("X-User-Email")
                .and_then(|v| v.to_str().ok())
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.to_string())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { email })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_the_taxonomy() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(ErrorCode::UpstreamTimeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(status_for(ErrorCode::AuthExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::ArtistNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(ErrorCode::InvalidStatusTransition),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(ErrorCode::LlmParseFailed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
