//! Test generators — mock `TextGenerator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use inquest_dialogue::provider::{ProviderError, TextGenerator};

/// A text generator that replays scripted completions in order and records
/// every prompt it was sent. Once the script is exhausted it keeps returning
/// a neutral well-formed reply.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Create a generator that replays `completions` in order.
    #[must_use]
    pub fn new(completions: Vec<String>) -> Self {
        Self {
            script: Mutex::new(completions),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every prompt sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            Ok(r#"{"response": "I have nothing more to say.", "emotion": "neutral"}"#.to_owned())
        } else {
            Ok(script.remove(0))
        }
    }

    async fn is_available(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// A text generator that always fails. Useful for testing the
/// collaborator-unavailable error path.
#[derive(Debug)]
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Api {
            status: 503,
            message: "model offline".to_owned(),
        })
    }

    async fn is_available(&self) -> Result<(), ProviderError> {
        Err(ProviderError::ModelUnavailable("model offline".to_owned()))
    }
}
