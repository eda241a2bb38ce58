//! Engine error taxonomy.

use thiserror::Error;

/// Top-level error type for investigation session operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// No live session exists under the given identifier.
    #[error("game session not found: {0}")]
    SessionNotFound(String),

    /// The named character does not appear in the session's mystery.
    #[error("character not found: {0}")]
    CharacterNotFound(String),

    /// The request body was malformed or carried an out-of-range value.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A mutating operation was attempted on a resolved or timed-out session.
    #[error("game is already over")]
    GameAlreadyOver,

    /// The text-generation collaborator failed or timed out. The session
    /// state is untouched and the caller may retry the same question.
    #[error("text generation unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// The mystery scenario could not be loaded or parsed.
    #[error("failed to load mystery: {0}")]
    MysteryLoadFailure(String),
}
