//! Group ride listings.

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::{commit, Database, RideRecord, RidesStore, UserRecord};

/// Maximum number of rides returned by a listing.
pub const LIST_LIMIT: usize = 200;

/// Fields accepted when creating a ride. Optional values are stored
/// verbatim; date and time stay free-form strings.
#[derive(Debug, Clone, Default)]
pub struct RideDraft {
    pub title: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub pace: Option<String>,
    pub distance_km: Option<f64>,
    pub start: Option<String>,
    pub notes: Option<String>,
}

/// Most recent rides, descending by creation time.
pub fn list_rides(db: &mut Database) -> Result<Vec<RideRecord>, AppError> {
    let tx = db.transaction()?;
    let rides = RidesStore::new(&tx).list_recent(LIST_LIMIT)?;
    commit(tx)?;
    Ok(rides)
}

/// Create a new ride owned by the caller.
pub fn create_ride(
    db: &mut Database,
    user: &UserRecord,
    draft: RideDraft,
) -> Result<RideRecord, AppError> {
    if draft.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    let ride = RideRecord {
        id: Uuid::new_v4().to_string(),
        creator_id: Some(user.id.clone()),
        title: draft.title,
        date: draft.date,
        time: draft.time,
        pace: draft.pace,
        distance_km: draft.distance_km,
        start: draft.start,
        notes: draft.notes,
        created_at: Utc::now(),
    };

    let tx = db.transaction()?;
    RidesStore::new(&tx).insert_ride(&ride)?;
    commit(tx)?;
    Ok(ride)
}

/// Get ride details by id.
pub fn get_ride(db: &mut Database, ride_id: &str) -> Result<RideRecord, AppError> {
    let tx = db.transaction()?;
    let ride = RidesStore::new(&tx)
        .get_ride(ride_id)?
        .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;
    commit(tx)?;
    Ok(ride)
}
