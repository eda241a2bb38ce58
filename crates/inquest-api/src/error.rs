//! Inquest — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inquest_core::error::GameError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `GameError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            GameError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            GameError::CharacterNotFound(_) => (StatusCode::NOT_FOUND, "character_not_found"),
            GameError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GameError::GameAlreadyOver => (StatusCode::CONFLICT, "game_already_over"),
            GameError::CollaboratorUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "collaborator_unavailable")
            }
            GameError::MysteryLoadFailure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "mystery_load_failure")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
