//! Process-wide table of live sessions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use inquest_core::error::GameError;
use inquest_mystery::Mystery;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::session::Session;

/// Registry of active sessions keyed by session identifier.
///
/// Identifiers are v4 UUIDs, so they cannot be guessed by other players.
/// Terminal sessions are retired by the eviction sweep after a grace window
/// rather than living for the life of the process.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh session and stores it in Active state.
    pub async fn create(
        &self,
        player_id: String,
        mystery: Mystery,
        session_seconds: i64,
        started_at: DateTime<Utc>,
    ) -> Arc<Session> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(
            id.clone(),
            player_id,
            mystery,
            session_seconds,
            started_at,
        ));
        self.sessions.write().await.insert(id, session.clone());
        session
    }

    /// Looks up a live session.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionNotFound` when no session exists under
    /// the identifier.
    pub async fn get(&self, session_id: &str) -> Result<Arc<Session>, GameError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_owned()))
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Removes a session and cancels its countdown task.
    pub async fn retire(&self, session_id: &str) {
        let removed = self.sessions.write().await.remove(session_id);
        if let Some(session) = removed {
            session.cancel_countdown().await;
            tracing::debug!(session_id, "session retired");
        }
    }

    /// Retires every terminal session whose grace window has passed.
    /// Returns the number of sessions removed.
    pub async fn sweep(&self, now: DateTime<Utc>, grace: Duration) -> usize {
        let candidates: Vec<Arc<Session>> =
            self.sessions.read().await.values().cloned().collect();

        let mut expired = Vec::new();
        for session in candidates {
            let state = session.state().await;
            if let Some(ended_at) = state.ended_at {
                if state.game_over && now - ended_at >= grace {
                    expired.push(session.id().to_owned());
                }
            }
        }

        let count = expired.len();
        for session_id in expired {
            self.retire(&session_id).await;
        }
        count
    }
}
