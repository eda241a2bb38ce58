//! One player's live session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use inquest_core::clock::Clock;
use inquest_dialogue::Transcript;
use inquest_mystery::Mystery;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;

use crate::events::GameEventSink;

/// Timer snapshot returned by the read-timer operation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimerStatus {
    /// Seconds left on the game clock.
    pub remaining_time: i64,
    /// Whether the countdown is running.
    pub timer_enabled: bool,
    /// Whether the session has reached a terminal state.
    pub game_over: bool,
}

/// Mutable session fields. Every mutation goes through the session's state
/// mutex; the countdown task and request handlers never touch these fields
/// directly.
#[derive(Debug)]
pub struct SessionState {
    /// Seconds left; monotonically non-increasing while the timer runs.
    pub remaining_time: i64,
    /// Whether ticks currently decrement the clock.
    pub timer_enabled: bool,
    /// Terminal flag; transitions false -> true at most once, never back.
    pub game_over: bool,
    /// Successful questions asked this session.
    pub questions_asked: u32,
    /// When the session reached a terminal state.
    pub ended_at: Option<DateTime<Utc>>,
    /// Conversation transcripts keyed by character name.
    pub transcripts: HashMap<String, Transcript>,
}

/// A single player's in-progress game.
#[derive(Debug)]
pub struct Session {
    id: String,
    player_id: String,
    mystery: Arc<Mystery>,
    started_at: DateTime<Utc>,
    state: Mutex<SessionState>,
    /// Held across the whole ask pipeline (including the collaborator call)
    /// so transcript entries for a character append in ask order. Lock order
    /// is interrogation before state; the state lock is never held across
    /// an await on the collaborator.
    interrogation: Mutex<()>,
    countdown: Mutex<Option<AbortHandle>>,
}

impl Session {
    /// Creates an active session with a full game clock.
    #[must_use]
    pub fn new(
        id: String,
        player_id: String,
        mystery: Mystery,
        session_seconds: i64,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            player_id,
            mystery: Arc::new(mystery),
            started_at,
            state: Mutex::new(SessionState {
                remaining_time: session_seconds,
                timer_enabled: true,
                game_over: false,
                questions_asked: 0,
                ended_at: None,
                transcripts: HashMap::new(),
            }),
            interrogation: Mutex::new(()),
            countdown: Mutex::new(None),
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Owning player identifier.
    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// The immutable mystery snapshot.
    #[must_use]
    pub fn mystery(&self) -> &Arc<Mystery> {
        &self.mystery
    }

    /// When the session started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Locks the mutable state.
    pub async fn state(&self) -> tokio::sync::MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    /// Locks the ask pipeline.
    pub async fn interrogation(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.interrogation.lock().await
    }

    /// Reads the timer fields.
    pub async fn timer_status(&self) -> TimerStatus {
        let state = self.state.lock().await;
        TimerStatus {
            remaining_time: state.remaining_time,
            timer_enabled: state.timer_enabled,
            game_over: state.game_over,
        }
    }

    /// Remembers the countdown task so retirement can cancel it.
    pub async fn attach_countdown(&self, handle: AbortHandle) {
        *self.countdown.lock().await = Some(handle);
    }

    /// Cancels the countdown task, if one is still attached.
    pub async fn cancel_countdown(&self) {
        if let Some(handle) = self.countdown.lock().await.take() {
            handle.abort();
        }
    }
}

/// Runs the one-second countdown for a session until it reaches a terminal
/// state. On expiry the session transitions to timed-out autonomously and a
/// completion event is emitted; no solution is revealed until the player
/// takes an explicit action.
pub async fn run_countdown(
    session: Arc<Session>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn GameEventSink>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;

        let questions;
        {
            let mut state = session.state.lock().await;
            if state.game_over {
                break;
            }
            if !state.timer_enabled {
                continue;
            }
            state.remaining_time -= 1;
            if state.remaining_time > 0 {
                continue;
            }
            state.remaining_time = 0;
            state.game_over = true;
            state.ended_at = Some(clock.now());
            questions = state.questions_asked;
        }

        let time_spent = (clock.now() - session.started_at).num_seconds();
        tracing::info!(session_id = %session.id, time_spent, "session timed out");
        if let Err(err) = sink
            .session_completed(&session.id, false, time_spent, questions)
            .await
        {
            tracing::warn!(session_id = %session.id, error = %err, "failed to record timeout completion");
        }
        break;
    }
}
