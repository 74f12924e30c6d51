//! HTTP surface for the readiness engine
//!
//! Exposes the engine as a small JSON API: `POST /progression` evaluates
//! a request against the configured history store. Every response
//! carries permissive CORS headers and preflight requests are answered
//! with an empty 200, so browser clients can call the API directly.
//!
//! Validation failures and upstream store failures share one error
//! shape, `{ "error": <message> }` with status 400.

use crate::engine::ReadinessEngine;
use crate::error::Result;
use crate::models::ProgressionRequest;
use crate::store::HistoryStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use http::{header::HeaderName, HeaderValue, Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ReadinessEngine>,
    store: Arc<dyn HistoryStore + Send + Sync>,
}

impl AppState {
    pub fn new(engine: ReadinessEngine, store: Arc<dyn HistoryStore + Send + Sync>) -> Self {
        AppState {
            engine: Arc::new(engine),
            store,
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Configure CORS for the API
///
/// `allowed_origins` is a comma-separated origin list; empty or "*"
/// allows any origin.
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() || allowed_origins == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

/// Build the API router
pub fn router(state: AppState, allowed_origins: &str) -> Router {
    Router::new()
        .route("/progression", post(progression))
        .route("/health", get(health))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the API until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr, allowed_origins: &str) -> Result<()> {
    let app = router(state, allowed_origins);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn progression(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProgressionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return error_response(rejection.body_text()),
    };

    match state
        .engine
        .evaluate(state.store.as_ref(), &request, Utc::now())
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            warn!(user_id = %request.user_id, error = %err, "progression request failed");
            error_response(err.user_message())
        }
    }
}

fn error_response(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProgressionResponse, SessionLog};
    use crate::store::MemoryStore;
    use axum::body::Body;
    use chrono::{Days, Utc};
    use http::Request;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let mut store = MemoryStore::new();
        let today = Utc::now().date_naive();
        for back in 0..14u64 {
            store.add_session(
                "athlete-1",
                SessionLog {
                    date: today.checked_sub_days(Days::new(back)).unwrap(),
                    session_rpe: Some(6.0),
                    total_load: dec!(400),
                    rpe_load: Some(dec!(2400)),
                },
            );
        }
        let state = AppState::new(ReadinessEngine::new(), Arc::new(store));
        router(state, "*")
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_progression_success() {
        let app = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/progression")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"user_id":"athlete-1","current_load":100,"exercise_type":"compound"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cors = response
            .headers()
            .get("access-control-allow-origin")
            .cloned();
        assert_eq!(cors.unwrap(), "*");

        let body = body_bytes(response).await;
        let parsed: ProgressionResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.readiness_index >= 0.0 && parsed.readiness_index <= 1.0);
        assert!(parsed.progression.suggested_load > 0.0);
    }

    #[tokio::test]
    async fn test_progression_validation_error() {
        let app = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/progression")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"user_id":"athlete-1","current_load":-5,"exercise_type":"compound"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_bytes(response).await;
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(parsed.error.contains("current_load"));
    }

    #[tokio::test]
    async fn test_progression_malformed_body() {
        let app = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/progression")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preflight_gets_empty_ok() {
        let app = test_router();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/progression")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));

        let body = body_bytes(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_router();
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
