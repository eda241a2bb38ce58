//! Inquest Session — live game sessions and their lifecycle.
//!
//! A `Session` owns one player's in-progress game: the immutable mystery
//! snapshot, the countdown, the per-character transcripts and the resolution
//! state. The `SessionRegistry` is the process-wide table of live sessions;
//! the `GameEngine` is the facade the HTTP layer talks to.

pub mod engine;
pub mod events;
pub mod registry;
pub mod session;

pub use engine::{AskOutcome, AskRequest, EngineConfig, GameEngine, StartedSession, Verdict};
pub use events::{EventSinkError, GameEventSink, TracingEventSink};
pub use registry::SessionRegistry;
pub use session::{Session, TimerStatus};
