//! Request and response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::messaging::{ConversationSummary, MessageView};
use crate::services::nearby::NearbyRider;
use crate::services::rides::RideDraft;
use crate::storage::{ProfileChanges, ProfileRecord, RideRecord, UserRecord};

/// Generic list envelope: `{"items": [...]}`.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

// ========== Auth ==========

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer".
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<UserRecord> for MeResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
        }
    }
}

// ========== Profiles ==========

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub pace: Option<String>,
    pub bike_type: Option<String>,
    pub looking_for: Option<String>,
    pub home_base: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(profile: ProfileRecord) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name,
            bio: profile.bio,
            pace: profile.pace,
            bike_type: profile.bike_type,
            looking_for: profile.looking_for,
            home_base: profile.home_base,
            updated_at: profile.updated_at,
        }
    }
}

/// Partial profile update. Absent and JSON-null fields both leave the
/// stored value unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub pace: Option<String>,
    #[serde(default)]
    pub bike_type: Option<String>,
    #[serde(default)]
    pub looking_for: Option<String>,
    #[serde(default)]
    pub home_base: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileChanges {
    fn from(request: ProfileUpdateRequest) -> Self {
        Self {
            display_name: request.display_name,
            bio: request.bio,
            pace: request.pace,
            bike_type: request.bike_type,
            looking_for: request.looking_for,
            home_base: request.home_base,
        }
    }
}

// ========== Location & Nearby ==========

#[derive(Debug, Deserialize)]
pub struct LocationUpdateRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    crate::services::nearby::DEFAULT_RADIUS_KM
}

#[derive(Debug, Serialize)]
pub struct NearbyItem {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: String,
    pub pace: Option<String>,
    pub bike_type: Option<String>,
    pub distance_km: f64,
}

impl From<NearbyRider> for NearbyItem {
    fn from(rider: NearbyRider) -> Self {
        Self {
            user_id: rider.user_id,
            display_name: rider.display_name,
            email: rider.email,
            pace: rider.pace,
            bike_type: rider.bike_type,
            distance_km: rider.distance_km,
        }
    }
}

// ========== Messaging ==========

#[derive(Debug, Serialize)]
pub struct ConversationItem {
    pub id: String,
    pub title: String,
    pub last_message: String,
}

impl From<ConversationSummary> for ConversationItem {
    fn from(summary: ConversationSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            last_message: summary.last_message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageItem {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub is_mine: bool,
}

impl From<MessageView> for MessageItem {
    fn from(message: MessageView) -> Self {
        Self {
            id: message.id,
            text: message.text,
            created_at: message.created_at,
            is_mine: message.is_mine,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

// ========== Rides ==========

#[derive(Debug, Deserialize)]
pub struct RideCreateRequest {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub pace: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<RideCreateRequest> for RideDraft {
    fn from(request: RideCreateRequest) -> Self {
        Self {
            title: request.title,
            date: request.date,
            time: request.time,
            pace: request.pace,
            distance_km: request.distance_km,
            start: request.start,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub pace: Option<String>,
    pub distance_km: Option<f64>,
    pub start: Option<String>,
    pub notes: Option<String>,
    pub creator_id: Option<String>,
}

impl From<RideRecord> for RideResponse {
    fn from(ride: RideRecord) -> Self {
        Self {
            id: ride.id,
            title: ride.title,
            date: ride.date,
            time: ride.time,
            pace: ride.pace,
            distance_km: ride.distance_km,
            start: ride.start,
            notes: ride.notes,
            creator_id: ride.creator_id,
        }
    }
}
