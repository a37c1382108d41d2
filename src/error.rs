//! Error types for the LMS server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Required query parameter absent or blank
    #[error("{0}")]
    MissingParameter(String),

    /// Identity token is not a valid document id
    #[error("{0}")]
    InvalidIdentity(String),

    #[error("{0}")]
    NotFound(String),

    /// Request exceeded `server.request_timeout_secs`
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Store(#[from] mongodb::error::Error),

    #[error("{0}")]
    Decode(#[from] bson::de::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status reported for this error.
    ///
    /// A missing parameter keeps the default 200 status and a timeout is
    /// 408; every other failure is reported as not-found, whatever its cause.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) => StatusCode::OK,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::NOT_FOUND,
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(e) => tracing::error!("Store error: {:?}", e),
            AppError::Decode(e) => tracing::error!("Document decode error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Timeout(msg) => tracing::warn!("{}", msg),
            _ => tracing::debug!("Request failed: {}", self),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
