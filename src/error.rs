//! Application error taxonomy shared by domain operations and the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::storage::DatabaseError;

/// Errors surfaced by domain operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// A unique resource already exists (duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credentials, or a failed login.
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Malformed input rejected before it reaches the store.
    #[error("{0}")]
    Validation(String),

    /// Store-level failure; the transaction rolled back.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!("request failed: {self}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
