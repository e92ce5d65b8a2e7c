//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::flickr::{available_backends, BackendInfo, PhotoUrl};
use crate::location::{Coordinate, LocationEvent};
use crate::pipeline::DiscoveryOutcome;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/location", post(location_handler))
        .route("/api/feed", get(feed_handler).delete(feed_clear_handler))
        .route("/api/status", get(status_handler))
        .route("/api/backends", get(backends_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Location event request body
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

/// Location event response
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationResponse {
    /// Whether the event passed the throttle
    pub accepted: bool,
    /// What the event amounted to: "throttled", "failed", "no_photos" or "inserted"
    pub outcome: String,
    /// The URL added to the feed, when one was
    pub inserted: Option<PhotoUrl>,
    /// Feed size after handling the event
    pub feed_size: usize,
}

/// Feed listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Number of URLs in the feed
    pub count: usize,
    /// URLs, newest first
    pub urls: Vec<PhotoUrl>,
}

/// Feed clear response
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    /// Number of URLs removed
    pub cleared: usize,
}

/// Server status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Active search backend
    pub backend: String,
    /// Current feed size
    pub feed_size: usize,
    /// When the throttle will next accept a location event
    pub next_allowed: DateTime<Utc>,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::UnexpectedStatus(_) => "UPSTREAM_STATUS",
            Error::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// POST /api/location - feed a location event into the pipeline
async fn location_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<LocationResponse>, ApiError> {
    let coordinate = Coordinate::new(request.lat, request.lng);
    coordinate.validate().map_err(ApiError::from)?;

    let mut pipeline = state.pipeline().await;
    let outcome = pipeline
        .on_location_update(LocationEvent::now(coordinate))
        .await;

    let (accepted, outcome_name, inserted) = match outcome {
        DiscoveryOutcome::Throttled => (false, "throttled", None),
        DiscoveryOutcome::Failed => (true, "failed", None),
        DiscoveryOutcome::NoPhotos => (true, "no_photos", None),
        DiscoveryOutcome::Inserted(url) => (true, "inserted", Some(url)),
    };

    Ok(Json(LocationResponse {
        accepted,
        outcome: outcome_name.to_string(),
        inserted,
        feed_size: pipeline.feed().len(),
    }))
}

/// GET /api/feed - list the feed, newest first
async fn feed_handler(State(state): State<Arc<AppState>>) -> Json<FeedResponse> {
    let pipeline = state.pipeline().await;
    let urls = pipeline.feed().urls().to_vec();

    Json(FeedResponse {
        count: urls.len(),
        urls,
    })
}

/// DELETE /api/feed - clear the feed
async fn feed_clear_handler(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    let mut pipeline = state.pipeline().await;
    let cleared = pipeline.feed().len();
    pipeline.clear_feed();

    Json(ClearResponse { cleared })
}

/// GET /api/status - server status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let pipeline = state.pipeline().await;

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: pipeline.backend_name().to_string(),
        feed_size: pipeline.feed().len(),
        next_allowed: pipeline.next_allowed(),
    })
}

/// GET /api/backends - list available search backends
async fn backends_handler() -> Json<Vec<BackendInfo>> {
    Json(available_backends())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::flickr::{get_backend, SearchParams};
    use crate::pipeline::DiscoveryPipeline;
    use crate::throttle::UpdateThrottle;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Duration;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn canned_config() -> Config {
        let mut config = Config::default();
        config.defaults.backend = "canned".to_string();
        config
    }

    /// State with a canned backend and a throttle that is already open
    fn create_test_state() -> Arc<AppState> {
        let config = canned_config();
        let throttle = UpdateThrottle::new(
            Duration::seconds(config.throttle.interval_secs as i64),
            Utc::now() - Duration::seconds(60),
        );
        let pipeline = DiscoveryPipeline::new(
            get_backend("canned", None),
            SearchParams::default(),
            throttle,
        );
        Arc::new(AppState::with_pipeline(config, pipeline))
    }

    fn location_request(lat: f64, lng: f64) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/location")
            .header("content-type", "application/json")
            .body(Body::from(format!("{{\"lat\":{},\"lng\":{}}}", lat, lng)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();

        assert!(status.running);
        assert_eq!(status.backend, "canned");
        assert_eq!(status.feed_size, 0);
    }

    #[tokio::test]
    async fn test_backends_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/backends")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let backends: Vec<BackendInfo> = serde_json::from_slice(&body).unwrap();

        assert!(backends.iter().any(|b| b.name == "flickr"));
        assert!(backends.iter().any(|b| b.name == "canned"));
    }

    #[tokio::test]
    async fn test_feed_starts_empty() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/feed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let feed: FeedResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(feed.count, 0);
        assert!(feed.urls.is_empty());
    }

    #[tokio::test]
    async fn test_location_event_inserts_photo() {
        let state = create_test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(location_request(40.7128, -74.0060))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let result: LocationResponse = serde_json::from_slice(&body).unwrap();

        assert!(result.accepted);
        assert_eq!(result.outcome, "inserted");
        assert!(result.inserted.is_some());
        assert_eq!(result.feed_size, 1);
    }

    #[tokio::test]
    async fn test_second_event_inside_window_is_throttled() {
        let state = create_test_state();

        let first = create_router(state.clone())
            .oneshot(location_request(40.7128, -74.0060))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = create_router(state)
            .oneshot(location_request(40.7129, -74.0061))
            .await
            .unwrap();

        let body = second.into_body().collect().await.unwrap().to_bytes();
        let result: LocationResponse = serde_json::from_slice(&body).unwrap();

        assert!(!result.accepted);
        assert_eq!(result.outcome, "throttled");
        assert_eq!(result.feed_size, 1);
    }

    #[tokio::test]
    async fn test_location_event_invalid_coordinates() {
        let app = create_router(create_test_state());

        let response = app.oneshot(location_request(95.0, 0.0)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_feed_clear() {
        let state = create_test_state();

        create_router(state.clone())
            .oneshot(location_request(40.7128, -74.0060))
            .await
            .unwrap();

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/feed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let cleared: ClearResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(cleared.cleared, 1);

        let feed = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/feed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = feed.into_body().collect().await.unwrap().to_bytes();
        let feed: FeedResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(feed.count, 0);
    }
}
