//! Identity and profile endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::dto::{MeResponse, ProfileResponse, ProfileUpdateRequest};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::error::AppError;
use crate::services::profiles;
use crate::storage::ProfileChanges;

/// GET /me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(user))
}

/// GET /profiles/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut db = state.db.lock().await;
    let profile = profiles::get_profile(&mut db, &user_id)?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /profiles/me
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let changes = ProfileChanges::from(request);
    let mut db = state.db.lock().await;
    let profile = profiles::update_my_profile(&mut db, &user, &changes)?;
    Ok(Json(ProfileResponse::from(profile)))
}
