//! Environment-driven configuration.
//!
//! `AppConfig::from_env` reads deployment settings from the process
//! environment. Required values (`DATABASE_PATH`, `JWT_SECRET`) have no
//! defaults — their absence is a fatal configuration error. Optional values
//! fall back to documented defaults.

use thiserror::Error;

/// Default token lifetime in minutes (one week).
const DEFAULT_JWT_EXPIRES_MINUTES: i64 = 10080;
/// Default socket address the server binds to.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Failure to assemble a valid configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// A variable was present but could not be parsed into the expected type.
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        source: std::num::ParseIntError,
    },
}

/// Deployment configuration consumed at the composition root.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path.
    pub database_path: String,
    /// Secret used to sign/verify JWTs; required, never defaulted.
    pub jwt_secret: String,
    /// Default token lifetime in minutes.
    pub jwt_expires_minutes: i64,
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Allowed CORS origins; empty means permissive (allow any).
    pub cors_allow_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_path =
            std::env::var("DATABASE_PATH").map_err(|_| ConfigError::Missing("DATABASE_PATH"))?;

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expires_minutes = match std::env::var("JWT_EXPIRES_MINUTES") {
            Ok(raw) => raw.trim().parse().map_err(|source| ConfigError::Invalid {
                name: "JWT_EXPIRES_MINUTES",
                source,
            })?,
            Err(_) => DEFAULT_JWT_EXPIRES_MINUTES,
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let cors_allow_origins = match std::env::var("CORS_ALLOW_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|origin| origin.trim())
                .filter(|origin| !origin.is_empty())
                .map(|origin| origin.to_string())
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Self {
            database_path,
            jwt_secret,
            jwt_expires_minutes,
            bind_addr,
            cors_allow_origins,
        })
    }
}
