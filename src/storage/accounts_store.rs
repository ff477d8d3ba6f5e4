//! Account and profile row access.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::storage::database::DatabaseError;
use crate::storage::parse_timestamp;

/// A registered account row.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A rider profile row (one-to-one with a user).
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub user_id: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub pace: Option<String>,
    pub bike_type: Option<String>,
    pub looking_for: Option<String>,
    pub home_base: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. `Some` fields are applied; `None` fields keep
/// their stored values.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub pace: Option<String>,
    pub bike_type: Option<String>,
    pub looking_for: Option<String>,
    pub home_base: Option<String>,
}

/// Store for users and their profiles.
pub struct AccountsStore<'a> {
    conn: &'a Connection,
}

impl<'a> AccountsStore<'a> {
    /// Create a new accounts store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    // ========== User Operations ==========

    /// Insert a new user.
    pub fn insert_user(&self, user: &UserRecord) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO users (id, email, password_hash, display_name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id,
                    user.email,
                    user.password_hash,
                    user.display_name,
                    user.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(inner, _)
                    if inner.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    DatabaseError::ConstraintViolation(e.to_string())
                }
                other => DatabaseError::QueryFailed(other.to_string()),
            })?;
        Ok(())
    }

    /// Get a user by id.
    pub fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, email, password_hash, display_name, created_at
                 FROM users WHERE id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query(params![user_id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_user(row)?)),
            None => Ok(None),
        }
    }

    /// Get a user by email (case-sensitive, as stored).
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, email, password_hash, display_name, created_at
                 FROM users WHERE email = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query(params![email])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_user(row)?)),
            None => Ok(None),
        }
    }

    /// Set a user's display name (kept in sync with profile updates).
    pub fn set_user_display_name(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "UPDATE users SET display_name = ?2 WHERE id = ?1",
                params![user_id, display_name],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Delete a user; dependent rows cascade.
    pub fn delete_user(&self, user_id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM users WHERE id = ?1", params![user_id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    // ========== Profile Operations ==========

    /// Insert a profile row.
    pub fn insert_profile(&self, profile: &ProfileRecord) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO profiles (user_id, display_name, bio, pace, bike_type,
                 looking_for, home_base, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    profile.user_id,
                    profile.display_name,
                    profile.bio,
                    profile.pace,
                    profile.bike_type,
                    profile.looking_for,
                    profile.home_base,
                    profile.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a profile by user id.
    pub fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT user_id, display_name, bio, pace, bike_type, looking_for,
                 home_base, updated_at FROM profiles WHERE user_id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query(params![user_id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_profile(row)?)),
            None => Ok(None),
        }
    }

    /// Apply the supplied fields of a partial update to an existing profile
    /// row, leaving the rest untouched.
    pub fn update_profile_fields(
        &self,
        user_id: &str,
        changes: &ProfileChanges,
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "UPDATE profiles SET
                     display_name = COALESCE(?2, display_name),
                     bio = COALESCE(?3, bio),
                     pace = COALESCE(?4, pace),
                     bike_type = COALESCE(?5, bike_type),
                     looking_for = COALESCE(?6, looking_for),
                     home_base = COALESCE(?7, home_base),
                     updated_at = ?8
                 WHERE user_id = ?1",
                params![
                    user_id,
                    changes.display_name,
                    changes.bio,
                    changes.pace,
                    changes.bike_type,
                    changes.looking_for,
                    changes.home_base,
                    now.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<UserRecord, DatabaseError> {
    let created_str: String = row
        .get(4)
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(UserRecord {
        id: row
            .get(0)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        email: row
            .get(1)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        password_hash: row
            .get(2)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        display_name: row
            .get(3)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        created_at: parse_timestamp(&created_str)?,
    })
}

fn row_to_profile(row: &rusqlite::Row<'_>) -> Result<ProfileRecord, DatabaseError> {
    let updated_str: String = row
        .get(7)
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(ProfileRecord {
        user_id: row
            .get(0)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        display_name: row
            .get(1)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        bio: row
            .get(2)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        pace: row
            .get(3)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        bike_type: row
            .get(4)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        looking_for: row
            .get(5)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        home_base: row
            .get(6)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        updated_at: parse_timestamp(&updated_str)?,
    })
}
