//! Bearer-token resolution to an authenticated user.

use rusqlite::Connection;

use crate::error::AppError;
use crate::storage::{AccountsStore, UserRecord};

use super::tokens::TokenService;

/// Resolve a raw bearer credential to the user it identifies.
///
/// Fails with `Unauthenticated` when the credential is missing or invalid,
/// or when the token subject no longer resolves to a user row (the user was
/// deleted after the token was issued).
pub fn authenticate(
    conn: &Connection,
    tokens: &TokenService,
    bearer: Option<&str>,
) -> Result<UserRecord, AppError> {
    let token =
        bearer.ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()))?;

    let claims = tokens
        .decode(token)
        .map_err(|_| AppError::Unauthenticated("Invalid token".to_string()))?;

    AccountsStore::new(conn)
        .get_user(&claims.sub)?
        .ok_or_else(|| AppError::Unauthenticated("User not found".to_string()))
}
