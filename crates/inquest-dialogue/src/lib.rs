//! Inquest Dialogue — turning questions into in-character exchanges.
//!
//! The orchestrator owns the conversation protocol: it synthesizes the
//! persona message on first contact, resends the entire transcript to the
//! stateless text-generation collaborator on every turn, and parses the
//! free-text reply into a structured `{response, emotion}` value with a
//! layered recovery chain. A malformed reply never fails the request; a
//! failed or timed-out collaborator call always does.

pub mod factory;
pub mod ollama;
pub mod openai;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod reply;
pub mod transcript;

pub use factory::{OllamaConfig, OpenAiConfig, ProviderConfig, build_generator};
pub use orchestrator::Interrogator;
pub use provider::{ProviderError, TextGenerator};
pub use reply::{CharacterReply, parse_reply};
pub use transcript::Transcript;
