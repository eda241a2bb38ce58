//! Mystery catalogue endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use inquest_mystery::MysterySummary;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/mysteries
async fn list_mysteries(
    State(state): State<AppState>,
) -> Result<Json<Vec<MysterySummary>>, ApiError> {
    let summaries = state.engine.list_mysteries().await?;
    Ok(Json(summaries))
}

/// Returns the mystery catalogue router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_mysteries))
}
