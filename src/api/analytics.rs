//! Borrow analytics endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::{BookAnalytics, StudentAnalytics},
    AppState,
};

/// Identity query parameter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Document id (24 hex characters)
    pub id: Option<String>,
}

impl IdQuery {
    /// The id, or a missing-parameter error naming the entity.
    ///
    /// A query string that cannot be read as a single `id` (a repeated
    /// `id`, for instance) is reported as an invalid identity.
    fn require(query: Result<Query<Self>, QueryRejection>, entity: &str) -> AppResult<String> {
        let Query(query) = query.map_err(|rejection| {
            tracing::debug!("Rejected query string: {}", rejection.body_text());
            AppError::InvalidIdentity(format!("Invalid {} ID.", entity.to_lowercase()))
        })?;

        query
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::MissingParameter(format!("{} ID is required.", entity)))
    }
}

/// Borrow analytics for a book
#[utoipa::path(
    get,
    path = "/analytics/book",
    tag = "analytics",
    params(IdQuery),
    responses(
        (status = 200, description = "Book analytics, or an error envelope when the id is missing", body = BookAnalytics),
        (status = 404, description = "Invalid id, book not found or store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_analytics(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<Json<BookAnalytics>> {
    let id = IdQuery::require(query, "Book")?;
    let analytics = state.services.analytics.book_analytics(&id).await?;
    Ok(Json(analytics))
}

/// Borrow analytics for a student
#[utoipa::path(
    get,
    path = "/analytics/student",
    tag = "analytics",
    params(IdQuery),
    responses(
        (status = 200, description = "Student analytics, or an error envelope when the id is missing", body = StudentAnalytics),
        (status = 404, description = "Invalid id, student not found or store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn student_analytics(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<Json<StudentAnalytics>> {
    let id = IdQuery::require(query, "Student")?;
    let analytics = state.services.analytics.student_analytics(&id).await?;
    Ok(Json(analytics))
}
