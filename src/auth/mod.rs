//! Credentials: password hashing, access tokens, and the bearer-token guard.

pub mod guard;
pub mod password;
pub mod tokens;

use thiserror::Error;

pub use guard::authenticate;
pub use tokens::{Claims, TokenService};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed, tampered, or expired token. Deliberately undifferentiated.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),
}
