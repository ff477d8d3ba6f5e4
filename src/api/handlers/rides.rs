//! Group ride endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::dto::{ItemsResponse, RideCreateRequest, RideResponse};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::error::AppError;
use crate::services::rides;

/// GET /rides
pub async fn list_rides(
    State(state): State<AppState>,
    _caller: CurrentUser,
) -> Result<Json<ItemsResponse<RideResponse>>, AppError> {
    let mut db = state.db.lock().await;
    let rides = rides::list_rides(&mut db)?;
    Ok(Json(ItemsResponse {
        items: rides.into_iter().map(RideResponse::from).collect(),
    }))
}

/// POST /rides
pub async fn create_ride(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RideCreateRequest>,
) -> Result<Json<RideResponse>, AppError> {
    let mut db = state.db.lock().await;
    let ride = rides::create_ride(&mut db, &user, request.into())?;
    Ok(Json(RideResponse::from(ride)))
}

/// GET /rides/{ride_id}
pub async fn get_ride(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(ride_id): Path<String>,
) -> Result<Json<RideResponse>, AppError> {
    let mut db = state.db.lock().await;
    let ride = rides::get_ride(&mut db, &ride_id)?;
    Ok(Json(RideResponse::from(ride)))
}
