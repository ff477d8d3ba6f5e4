//! Registration and login endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::{LoginRequest, MeResponse, RegisterRequest, TokenResponse};
use crate::api::state::AppState;
use crate::error::AppError;
use crate::services::accounts;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MeResponse>), AppError> {
    let mut db = state.db.lock().await;
    let user = accounts::register(
        &mut db,
        &request.email,
        &request.password,
        request.display_name.as_deref(),
    )?;
    Ok((StatusCode::CREATED, Json(MeResponse::from(user))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let mut db = state.db.lock().await;
    let access_token = accounts::login(&mut db, &state.tokens, &request.email, &request.password)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
