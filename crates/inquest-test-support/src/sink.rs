//! Test sinks — mock `GameEventSink` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use inquest_session::events::{EventSinkError, GameEventSink};

/// A lifecycle event recorded by `RecordingEventSink`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    Started {
        session_id: String,
        player_id: String,
        mystery_id: String,
    },
    QuestionAsked {
        session_id: String,
        character: String,
        total_questions: u32,
    },
    Completed {
        session_id: String,
        solved: bool,
        time_spent_secs: i64,
        questions: u32,
    },
}

/// An event sink that records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingEventSink {
    /// Returns a snapshot of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl GameEventSink for RecordingEventSink {
    async fn session_started(
        &self,
        session_id: &str,
        player_id: &str,
        mystery_id: &str,
    ) -> Result<(), EventSinkError> {
        self.events.lock().unwrap().push(RecordedEvent::Started {
            session_id: session_id.to_owned(),
            player_id: player_id.to_owned(),
            mystery_id: mystery_id.to_owned(),
        });
        Ok(())
    }

    async fn question_asked(
        &self,
        session_id: &str,
        character: &str,
        total_questions: u32,
    ) -> Result<(), EventSinkError> {
        self.events
            .lock()
            .unwrap()
            .push(RecordedEvent::QuestionAsked {
                session_id: session_id.to_owned(),
                character: character.to_owned(),
                total_questions,
            });
        Ok(())
    }

    async fn session_completed(
        &self,
        session_id: &str,
        solved: bool,
        time_spent_secs: i64,
        questions: u32,
    ) -> Result<(), EventSinkError> {
        self.events.lock().unwrap().push(RecordedEvent::Completed {
            session_id: session_id.to_owned(),
            solved,
            time_spent_secs,
            questions,
        });
        Ok(())
    }
}
