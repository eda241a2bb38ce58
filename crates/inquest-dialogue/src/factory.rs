//! Provider selection.

use std::sync::Arc;
use std::time::Duration;

use crate::ollama::OllamaGenerator;
use crate::openai::OpenAiGenerator;
use crate::provider::{ProviderError, TextGenerator};

/// OpenAI provider settings.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (required).
    pub api_key: String,
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Completion token cap, if any.
    pub max_tokens: Option<u32>,
}

/// Ollama provider settings.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Host URL, e.g. `http://localhost:11434`.
    pub host: String,
    /// Model identifier.
    pub model: String,
}

/// Which text-generation provider to use.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// OpenAI-compatible chat completions.
    OpenAi(OpenAiConfig),
    /// Local or remote Ollama.
    Ollama(OllamaConfig),
}

/// Builds the configured text generator.
///
/// # Errors
///
/// Returns `ProviderError::Config` for unusable settings (e.g. a missing
/// API key).
pub fn build_generator(
    config: &ProviderConfig,
    timeout: Duration,
) -> Result<Arc<dyn TextGenerator>, ProviderError> {
    match config {
        ProviderConfig::OpenAi(cfg) => Ok(Arc::new(OpenAiGenerator::new(
            cfg.api_key.clone(),
            cfg.base_url.clone(),
            cfg.model.clone(),
            cfg.max_tokens,
            timeout,
        )?)),
        ProviderConfig::Ollama(cfg) => Ok(Arc::new(OllamaGenerator::new(
            cfg.host.clone(),
            cfg.model.clone(),
            timeout,
        )?)),
    }
}
