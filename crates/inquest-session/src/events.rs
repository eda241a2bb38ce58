//! The persistence/statistics collaborator seam.
//!
//! The engine only emits lifecycle events; storing statistics, achievements
//! and history is an external service's job. Sink failures are logged by the
//! engine and never fail the player's request.

use async_trait::async_trait;
use thiserror::Error;

/// Failure delivering an event to the sink.
#[derive(Debug, Error)]
#[error("event sink error: {0}")]
pub struct EventSinkError(pub String);

/// Consumer of session lifecycle events.
#[async_trait]
pub trait GameEventSink: Send + Sync {
    /// A session was created.
    async fn session_started(
        &self,
        session_id: &str,
        player_id: &str,
        mystery_id: &str,
    ) -> Result<(), EventSinkError>;

    /// A question was asked and answered.
    async fn question_asked(
        &self,
        session_id: &str,
        character: &str,
        total_questions: u32,
    ) -> Result<(), EventSinkError>;

    /// A session reached a terminal state, by accusation or by timeout.
    async fn session_completed(
        &self,
        session_id: &str,
        solved: bool,
        time_spent_secs: i64,
        questions: u32,
    ) -> Result<(), EventSinkError>;
}

/// Default sink that records events to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

#[async_trait]
impl GameEventSink for TracingEventSink {
    async fn session_started(
        &self,
        session_id: &str,
        player_id: &str,
        mystery_id: &str,
    ) -> Result<(), EventSinkError> {
        tracing::info!(session_id, player_id, mystery_id, "session started");
        Ok(())
    }

    async fn question_asked(
        &self,
        session_id: &str,
        character: &str,
        total_questions: u32,
    ) -> Result<(), EventSinkError> {
        tracing::info!(session_id, character, total_questions, "question asked");
        Ok(())
    }

    async fn session_completed(
        &self,
        session_id: &str,
        solved: bool,
        time_spent_secs: i64,
        questions: u32,
    ) -> Result<(), EventSinkError> {
        tracing::info!(session_id, solved, time_spent_secs, questions, "session completed");
        Ok(())
    }
}
