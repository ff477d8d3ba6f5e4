//! HTTP transport: router, state, DTOs, and endpoint handlers.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;

pub use state::AppState;

/// Build the application router with all routes bound to the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::system::health))
        .route("/health/db", get(handlers::system::db_health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/me", get(handlers::profiles::me))
        .route("/profiles/me", put(handlers::profiles::update_me))
        .route("/profiles/{user_id}", get(handlers::profiles::get_profile))
        .route("/location", post(handlers::location::update_location))
        .route("/nearby", get(handlers::location::nearby_search))
        .route(
            "/conversations",
            get(handlers::messaging::list_conversations),
        )
        .route(
            "/conversations/{conversation_id}/messages",
            get(handlers::messaging::list_messages).post(handlers::messaging::send_message),
        )
        .route(
            "/rides",
            get(handlers::rides::list_rides).post(handlers::rides::create_ride),
        )
        .route("/rides/{ride_id}", get(handlers::rides::get_ride))
        .with_state(state)
}
