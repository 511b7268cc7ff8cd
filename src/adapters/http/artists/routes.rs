//! Route configuration for tracked-artist endpoints.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers::{
    delete_artist, list_artists, reconcile_artists, update_status, upload_document,
    ArtistsAppState,
};

/// Creates the artists router.
///
/// Routes:
/// - `GET /api/artists` - tracked list for the requesting user
/// - `POST /api/artists/reconcile` - fold extracted records into the tracker
/// - `PUT /api/artists/:id/status` - advance workflow status
/// - `POST /api/artists/:id/documents` - upload a supporting document
/// - `DELETE /api/artists/:id` - remove a tracked artist
pub fn artists_router() -> Router<ArtistsAppState> {
    Router::new()
        .route("/api/artists", get(list_artists))
        .route("/api/artists/reconcile", post(reconcile_artists))
        .route("/api/artists/:id/status", put(update_status))
        .route("/api/artists/:id/documents", post(upload_document))
        .route("/api/artists/:id", delete(delete_artist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryApplicantRepository, InMemoryFileStorage};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> ArtistsAppState {
        ArtistsAppState::new(
            Arc::new(InMemoryApplicantRepository::new()),
            Arc::new(InMemoryFileStorage::new()),
        )
    }

    fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-User-Email", "ops@example.com")
            .header("Content-Type", "application/json");
        match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn listing_requires_the_user_header() {
        let app = artists_router().with_state(state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/artists")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reconcile_then_list_round_trips() {
        let app = artists_router().with_state(state());

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/artists/reconcile",
                Some(serde_json::json!({
                    "artists": [{"givenName": "Alice", "familyName": "Smith",
                                 "passportNumber": "X1234567"}]
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["added"], 1);
        assert_eq!(body["artists"][0]["status"], "pending");

        let response = app
            .oneshot(request("GET", "/api/artists", None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["artists"].as_array().unwrap().len(), 1);
        assert_eq!(body["artists"][0]["passportNumber"], "X1234567");
    }

    #[tokio::test]
    async fn status_update_flows_through() {
        let app = artists_router().with_state(state());
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/artists/reconcile",
                Some(serde_json::json!({
                    "artists": [{"givenName": "Alice", "familyName": "Smith"}]
                })),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        let id = body["artists"][0]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(request(
                "PUT",
                &format!("/api/artists/{}/status", id),
                Some(serde_json::json!({"action": "copied_json"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["artist"]["status"], "processing");
    }

    #[tokio::test]
    async fn unknown_artist_maps_to_404() {
        let app = artists_router().with_state(state());
        let response = app
            .oneshot(request(
                "PUT",
                &format!("/api/artists/{}/status", uuid::Uuid::new_v4()),
                Some(serde_json::json!({"action": "copied_json"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "ARTIST_NOT_FOUND");
    }
}
