//! Storage module: the relational store and typed row access.

pub mod accounts_store;
pub mod database;
pub mod locations_store;
pub mod messaging_store;
pub mod rides_store;
pub mod schema;

pub use accounts_store::{AccountsStore, ProfileChanges, ProfileRecord, UserRecord};
pub use database::{commit, Database, DatabaseError};
pub use locations_store::{LocatedRider, LocationRecord, LocationsStore};
pub use messaging_store::{MessageRecord, MessagingStore, ParticipantInfo};
pub use rides_store::{RideRecord, RidesStore};

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 TEXT column into a UTC timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
}
