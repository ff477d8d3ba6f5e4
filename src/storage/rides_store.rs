//! Group ride row access.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::storage::database::DatabaseError;
use crate::storage::parse_timestamp;

/// A group ride event row. Immutable after creation.
#[derive(Debug, Clone)]
pub struct RideRecord {
    pub id: String,
    pub creator_id: Option<String>,
    pub title: String,
    /// Free-form 'YYYY-MM-DD'; not validated as a calendar date.
    pub date: Option<String>,
    /// Free-form 'HH:MM'.
    pub time: Option<String>,
    pub pace: Option<String>,
    pub distance_km: Option<f64>,
    pub start: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Store for group rides.
pub struct RidesStore<'a> {
    conn: &'a Connection,
}

impl<'a> RidesStore<'a> {
    /// Create a new rides store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new ride.
    pub fn insert_ride(&self, ride: &RideRecord) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO rides (id, creator_id, title, date, time, pace, distance_km,
                 start, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    ride.id,
                    ride.creator_id,
                    ride.title,
                    ride.date,
                    ride.time,
                    ride.pace,
                    ride.distance_km,
                    ride.start,
                    ride.notes,
                    ride.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a ride by id.
    pub fn get_ride(&self, ride_id: &str) -> Result<Option<RideRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, creator_id, title, date, time, pace, distance_km, start,
                 notes, created_at FROM rides WHERE id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query(params![ride_id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_ride(row)?)),
            None => Ok(None),
        }
    }

    /// Most recent rides, descending by creation time.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<RideRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, creator_id, title, date, time, pace, distance_km, start,
                 notes, created_at FROM rides ORDER BY created_at DESC LIMIT ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], |row| {
                let created_str: String = row.get(9)?;
                Ok(RideRow {
                    id: row.get(0)?,
                    creator_id: row.get(1)?,
                    title: row.get(2)?,
                    date: row.get(3)?,
                    time: row.get(4)?,
                    pace: row.get(5)?,
                    distance_km: row.get(6)?,
                    start: row.get(7)?,
                    notes: row.get(8)?,
                    created_at: created_str,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rides = Vec::new();
        for row in rows {
            let r = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            rides.push(RideRecord {
                id: r.id,
                creator_id: r.creator_id,
                title: r.title,
                date: r.date,
                time: r.time,
                pace: r.pace,
                distance_km: r.distance_km,
                start: r.start,
                notes: r.notes,
                created_at: parse_timestamp(&r.created_at)?,
            });
        }
        Ok(rides)
    }
}

fn row_to_ride(row: &rusqlite::Row<'_>) -> Result<RideRecord, DatabaseError> {
    let created_str: String = row
        .get(9)
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(RideRecord {
        id: row
            .get(0)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        creator_id: row
            .get(1)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        title: row
            .get(2)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        date: row
            .get(3)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        time: row
            .get(4)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        pace: row
            .get(5)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        distance_km: row
            .get(6)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        start: row
            .get(7)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        notes: row
            .get(8)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        created_at: parse_timestamp(&created_str)?,
    })
}

/// Helper struct for row data.
struct RideRow {
    id: String,
    creator_id: Option<String>,
    title: String,
    date: Option<String>,
    time: Option<String>,
    pace: Option<String>,
    distance_km: Option<f64>,
    start: Option<String>,
    notes: Option<String>,
    created_at: String,
}
