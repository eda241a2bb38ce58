//! The text-generation collaborator seam.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a text-generation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider configuration is unusable (missing key, unknown provider).
    #[error("provider configuration error: {0}")]
    Config(String),

    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// The provider answered successfully but produced no completion.
    #[error("provider returned no completion")]
    EmptyCompletion,

    /// The configured model is not offered by the provider.
    #[error("model {0} is not available")]
    ModelUnavailable(String),
}

/// A stateless external text generator.
///
/// Implementations accept a prompt string and return raw text with no
/// format guarantee. All conversation context must be carried in the
/// prompt; the provider remembers nothing between calls.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates raw text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Checks that the configured model can be served.
    async fn is_available(&self) -> Result<(), ProviderError>;
}
