//! Inquest Mystery — immutable scenario data and loading.
//!
//! A `Mystery` is the scenario snapshot a session plays against: the ground
//! truth (killer, weapon, location), the introduction text, and the cast of
//! characters. It is loaded once at session start and never mutated.

pub mod loader;
pub mod model;

pub use loader::{FileMysteryLoader, MysteryLoader, MysterySummary};
pub use model::{Character, Message, Mystery, Role};
