//! Inquest Core — shared abstractions.
//!
//! This crate defines the error taxonomy and the effect traits (time,
//! randomness) that every other crate depends on. It contains no I/O.

pub mod clock;
pub mod error;
pub mod rng;
