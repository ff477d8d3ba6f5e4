//! Password hashing and verification.

use bcrypt::DEFAULT_COST;

use super::AuthError;

/// Hash a plaintext password for storage. Salted and irreversible.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, DEFAULT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored hash. A malformed stored
/// hash verifies as false.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}
