//! Request extractors for authenticated endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::authenticate;
use crate::error::AppError;
use crate::storage::UserRecord;

use super::state::AppState;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// Rejection maps to a 401 response via [`AppError`].
pub struct CurrentUser(pub UserRecord);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let db = state.db.lock().await;
        let user = authenticate(db.connection(), &state.tokens, bearer)?;
        Ok(CurrentUser(user))
    }
}
