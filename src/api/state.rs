//! Shared application state for the HTTP layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::TokenService;
use crate::storage::Database;

/// State shared by all request handlers.
///
/// The store handle is constructed once by the composition root and injected
/// here; there is no process-global connection cache.
#[derive(Clone)]
pub struct AppState {
    /// The shared store. One connection; requests serialize on the lock for
    /// the duration of their single transaction.
    pub db: Arc<Mutex<Database>>,
    /// Token issuance and validation.
    pub tokens: TokenService,
}

impl AppState {
    /// Build state from an opened database and a configured token service.
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            tokens,
        }
    }
}
