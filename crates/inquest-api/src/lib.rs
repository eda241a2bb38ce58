//! Inquest API — the HTTP/JSON surface of the investigation engine.
//!
//! Thin adapter layer: handlers translate requests into engine calls and
//! engine errors into status codes. No game rules live here.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/mysteries", routes::mysteries::router())
        .nest("/api/v1/game", routes::game::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
