//! Shared application state.

use std::sync::Arc;

use inquest_session::GameEngine;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The investigation session engine.
    pub engine: Arc<GameEngine>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(engine: Arc<GameEngine>) -> Self {
        Self { engine }
    }
}
