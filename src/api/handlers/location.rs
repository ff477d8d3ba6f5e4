//! Location update and nearby-search endpoints.

use axum::extract::{Query, State};
use axum::Json;

use crate::api::dto::{ItemsResponse, LocationUpdateRequest, NearbyItem, NearbyQuery, OkResponse};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::error::AppError;
use crate::services::nearby;

/// POST /location
pub async fn update_location(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<LocationUpdateRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let mut db = state.db.lock().await;
    nearby::update_location(&mut db, &user, request.lat, request.lng)?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /nearby
pub async fn nearby_search(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ItemsResponse<NearbyItem>>, AppError> {
    let mut db = state.db.lock().await;
    let riders = nearby::nearby_search(&mut db, &user, query.lat, query.lng, query.radius_km)?;
    Ok(Json(ItemsResponse {
        items: riders.into_iter().map(NearbyItem::from).collect(),
    }))
}
