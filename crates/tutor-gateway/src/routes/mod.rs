//! Route handlers for the gateway.

pub mod health;
pub mod messages;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/v1/messages", post(messages::handle_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
