//! BikeConnect backend server.
//!
//! Entry point: loads configuration, opens the store, and serves the HTTP
//! API. The store handle is constructed here and injected into the router
//! state; nothing in the core touches process-global state.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bikeconnect::api::{self, AppState};
use bikeconnect::auth::TokenService;
use bikeconnect::config::AppConfig;
use bikeconnect::storage::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting BikeConnect v{}", env!("CARGO_PKG_VERSION"));

    let db = Database::open(&config.database_path)?;
    let tokens = TokenService::new(&config.jwt_secret, config.jwt_expires_minutes);
    let state = AppState::new(db, tokens);

    let cors = if config.cors_allow_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
