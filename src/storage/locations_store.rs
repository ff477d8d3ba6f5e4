//! Location row access for the nearby-cyclists search.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::storage::database::DatabaseError;
use crate::storage::parse_timestamp;

/// A user's latest location fix.
#[derive(Debug, Clone)]
pub struct LocationRecord {
    pub user_id: String,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTime<Utc>,
}

/// A user row joined with their latest location and profile attributes,
/// as consumed by the nearby search.
#[derive(Debug, Clone)]
pub struct LocatedRider {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub pace: Option<String>,
    pub bike_type: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// Store for user locations.
pub struct LocationsStore<'a> {
    conn: &'a Connection,
}

impl<'a> LocationsStore<'a> {
    /// Create a new locations store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Upsert a user's single location row.
    pub fn upsert_location(
        &self,
        user_id: &str,
        lat: f64,
        lng: f64,
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let updated = self
            .conn
            .execute(
                "UPDATE locations SET lat = ?2, lng = ?3, updated_at = ?4 WHERE user_id = ?1",
                params![user_id, lat, lng, now.to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if updated == 0 {
            self.conn
                .execute(
                    "INSERT INTO locations (user_id, lat, lng, updated_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![user_id, lat, lng, now.to_rfc3339()],
                )
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Get a user's location, if any.
    pub fn get_location(&self, user_id: &str) -> Result<Option<LocationRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id, lat, lng, updated_at FROM locations WHERE user_id = ?1")
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query(params![user_id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
        {
            Some(row) => {
                let updated_str: String = row
                    .get(3)
                    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
                Ok(Some(LocationRecord {
                    user_id: row
                        .get(0)
                        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
                    lat: row
                        .get(1)
                        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
                    lng: row
                        .get(2)
                        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
                    updated_at: parse_timestamp(&updated_str)?,
                }))
            }
            None => Ok(None),
        }
    }

    /// List every user with a location row, except the given one. Profile
    /// attributes come along via a left join; the distance filter happens
    /// in the caller.
    pub fn list_located_riders(
        &self,
        exclude_user_id: &str,
    ) -> Result<Vec<LocatedRider>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT u.id, u.email, u.display_name, p.pace, p.bike_type, l.lat, l.lng
                 FROM users u
                 JOIN locations l ON l.user_id = u.id
                 LEFT JOIN profiles p ON p.user_id = u.id
                 WHERE u.id != ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![exclude_user_id], |row| {
                Ok(LocatedRider {
                    user_id: row.get(0)?,
                    email: row.get(1)?,
                    display_name: row.get(2)?,
                    pace: row.get(3)?,
                    bike_type: row.get(4)?,
                    lat: row.get(5)?,
                    lng: row.get(6)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut riders = Vec::new();
        for row in rows {
            riders.push(row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?);
        }

        Ok(riders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AccountsStore, Database, UserRecord};
    use uuid::Uuid;

    fn insert_user(db: &Database, email: &str) -> String {
        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: None,
            created_at: Utc::now(),
        };
        AccountsStore::new(db.connection())
            .insert_user(&user)
            .expect("Failed to insert user");
        user.id
    }

    #[test]
    fn test_upsert_inserts_then_updates() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = LocationsStore::new(db.connection());
        let user_id = insert_user(&db, "rider@example.com");

        store
            .upsert_location(&user_id, 47.0, 8.0, Utc::now())
            .expect("Failed to insert location");
        store
            .upsert_location(&user_id, 48.0, 9.0, Utc::now())
            .expect("Failed to update location");

        let location = store
            .get_location(&user_id)
            .expect("Failed to get location")
            .expect("Location not found");
        assert_eq!(location.lat, 48.0);
        assert_eq!(location.lng, 9.0);

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_list_located_riders_excludes_given_user() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = LocationsStore::new(db.connection());
        let me = insert_user(&db, "me@example.com");
        let other = insert_user(&db, "other@example.com");

        store
            .upsert_location(&me, 47.0, 8.0, Utc::now())
            .expect("Failed to insert location");
        store
            .upsert_location(&other, 47.1, 8.1, Utc::now())
            .expect("Failed to insert location");

        let riders = store
            .list_located_riders(&me)
            .expect("Failed to list riders");
        assert_eq!(riders.len(), 1);
        assert_eq!(riders[0].user_id, other);
    }

    #[test]
    fn test_list_located_riders_skips_users_without_location() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let store = LocationsStore::new(db.connection());
        let me = insert_user(&db, "me@example.com");
        insert_user(&db, "nowhere@example.com");

        let riders = store
            .list_located_riders(&me)
            .expect("Failed to list riders");
        assert!(riders.is_empty());
    }
}
