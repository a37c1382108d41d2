//! Statistics endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::DashboardStats, AppState};

/// Dashboard counters for the whole library
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Library statistics", body = DashboardStats),
        (status = 404, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
