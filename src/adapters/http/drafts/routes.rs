//! Route configuration for draft endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{create_draft, DraftsAppState};

/// Creates the drafts router.
///
/// Routes:
/// - `POST /api/drafts` - create a reply draft in the user's mailbox
pub fn drafts_router() -> Router<DraftsAppState> {
    Router::new().route("/api/drafts", post(create_draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{DraftHandle, DraftRequest, MailError, MailGateway};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubGateway {
        result: Result<(), MailError>,
    }

    #[async_trait]
    impl MailGateway for StubGateway {
        async fn create_draft(
            &self,
            _access_token: &str,
            _request: &DraftRequest,
        ) -> Result<DraftHandle, MailError> {
            match &self.result {
                Ok(()) => Ok(DraftHandle {
                    draft_id: "draft-42".to_string(),
                }),
                Err(MailError::AuthExpired) => Err(MailError::AuthExpired),
                Err(_) => Err(MailError::Upstream("boom".to_string())),
            }
        }
    }

    fn post_draft(recipient: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/drafts")
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "accessToken": "ya29.token",
                    "artist": {"givenName": "Alice", "familyName": "Smith"},
                    "recipient": recipient,
                    "bodyText": "Documents attached."
                })
                .to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn created_draft_returns_id() {
        let app = drafts_router().with_state(DraftsAppState::new(Arc::new(StubGateway {
            result: Ok(()),
        })));

        let response = app.oneshot(post_draft("agent@example.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["draftId"], "draft-42");
    }

    #[tokio::test]
    async fn expired_token_maps_to_401_with_code() {
        let app = drafts_router().with_state(DraftsAppState::new(Arc::new(StubGateway {
            result: Err(MailError::AuthExpired),
        })));

        let response = app.oneshot(post_draft("agent@example.com")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "AUTH_EXPIRED");
    }
}
