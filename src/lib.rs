//! BikeConnect - Location-Based Cycling Social Backend
//!
//! A self-hosted backend for cyclist discovery: account registration and
//! login, rider profiles, proximity search ("nearby cyclists"), direct
//! messaging, and group ride listings. HTTP transport via axum over a
//! SQLite relational store.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod geo;
pub mod services;
pub mod storage;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::AppError;
pub use storage::{Database, DatabaseError};
