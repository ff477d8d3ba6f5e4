//! Location updates and proximity search.

use chrono::Utc;

use crate::error::AppError;
use crate::geo::haversine_km;
use crate::storage::{commit, Database, LocationsStore, UserRecord};

/// Default search radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Upper bound on the search radius in kilometers.
pub const MAX_RADIUS_KM: f64 = 200.0;

/// A nearby rider with computed distance from the query point.
#[derive(Debug, Clone)]
pub struct NearbyRider {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: String,
    pub pace: Option<String>,
    pub bike_type: Option<String>,
    pub distance_km: f64,
}

/// Upsert the caller's single location row with a fresh timestamp.
pub fn update_location(
    db: &mut Database,
    user: &UserRecord,
    lat: f64,
    lng: f64,
) -> Result<(), AppError> {
    validate_coordinates(lat, lng)?;

    let tx = db.transaction()?;
    LocationsStore::new(&tx).upsert_location(&user.id, lat, lng, Utc::now())?;
    commit(tx)?;
    Ok(())
}

/// Riders within `radius_km` of the query point, ascending by distance.
///
/// Full scan over every user with a location row; the distance filter and
/// sort happen in memory. No spatial index at this scope's data volume.
pub fn nearby_search(
    db: &mut Database,
    user: &UserRecord,
    lat: f64,
    lng: f64,
    radius_km: f64,
) -> Result<Vec<NearbyRider>, AppError> {
    validate_coordinates(lat, lng)?;
    if !(radius_km > 0.0 && radius_km <= MAX_RADIUS_KM) {
        return Err(AppError::Validation(format!(
            "radius_km must be within (0, {MAX_RADIUS_KM}]"
        )));
    }

    let tx = db.transaction()?;
    let riders = LocationsStore::new(&tx).list_located_riders(&user.id)?;
    commit(tx)?;

    let mut items: Vec<NearbyRider> = riders
        .into_iter()
        .filter_map(|rider| {
            let distance_km = haversine_km(lat, lng, rider.lat, rider.lng);
            (distance_km <= radius_km).then(|| NearbyRider {
                user_id: rider.user_id,
                display_name: rider.display_name,
                email: rider.email,
                pace: rider.pace,
                bike_type: rider.bike_type,
                distance_km,
            })
        })
        .collect();

    items.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(items)
}

fn validate_coordinates(lat: f64, lng: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::Validation(
            "lat must be within [-90, 90]".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::Validation(
            "lng must be within [-180, 180]".to_string(),
        ));
    }
    Ok(())
}
