//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, health, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LMS API",
        version = "1.0.0",
        description = "Library Management System borrow analytics API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Analytics
        analytics::book_analytics,
        analytics::student_analytics,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            crate::models::TopBorrower,
            crate::models::MostBorrowedBook,
            crate::models::BookAnalytics,
            crate::models::StudentAnalytics,
            crate::models::DashboardStats,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "analytics", description = "Per-book and per-student borrow analytics"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
