//! Shared test mocks and utilities for the Inquest engine.

mod clock;
mod generator;
mod rng;
mod sink;

pub use clock::FixedClock;
pub use generator::{FailingGenerator, ScriptedGenerator};
pub use rng::{MidpointRng, SequenceNoiseRng};
pub use sink::{RecordedEvent, RecordingEventSink};
