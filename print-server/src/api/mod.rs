//! HTTP API
//!
//! - [`health`] - liveness
//! - [`print`] - receipt printing and printer status

pub mod health;
pub mod print;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(print::router())
        .merge(health::router())
}

/// Build the full application: routes, middleware and state
///
/// Used by the HTTP server and by in-process tests
pub fn router(state: ServerState) -> Router {
    build_router()
        // The POS frontend calls from a browser on another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
