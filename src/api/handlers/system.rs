//! Liveness and store-connectivity endpoints.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::dto::OkResponse;
use crate::api::state::AppState;
use crate::error::AppError;

/// GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "Healthy" }))
}

/// GET /health/db
pub async fn db_health(State(state): State<AppState>) -> Result<Json<OkResponse>, AppError> {
    let db = state.db.lock().await;
    db.ping()?;
    Ok(Json(OkResponse { ok: true }))
}
