//! API handlers for the LMS REST endpoints

pub mod analytics;
pub mod health;
pub mod openapi;
pub mod stats;

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, routing::get, BoxError, Router};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Analytics
        .route("/analytics/book", get(analytics::book_analytics))
        .route("/analytics/student", get(analytics::student_analytics))
        // Statistics
        .route("/stats", get(stats::get_stats))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Turn middleware failures into the regular `{error}` envelope
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout("Request timed out.".to_string())
    } else {
        AppError::Internal(format!("Unhandled internal error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    #[tokio::test]
    async fn test_timeout_returns_error_envelope() {
        let response = handle_middleware_error(Box::new(Elapsed::new()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Request timed out." }));
    }

    #[tokio::test]
    async fn test_other_middleware_errors_are_reported() {
        let response = handle_middleware_error("boom".into()).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
