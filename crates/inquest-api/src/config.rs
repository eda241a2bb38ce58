//! Server configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use inquest_dialogue::{OllamaConfig, OpenAiConfig, ProviderConfig};
use inquest_session::EngineConfig;

use crate::error::AppError;

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address host.
    pub host: String,
    /// Bind address port.
    pub port: u16,
    /// Directory holding mystery definition files.
    pub mystery_dir: PathBuf,
    /// Text-generation provider settings.
    pub provider: ProviderConfig,
    /// Upper bound on one collaborator call.
    pub llm_timeout: Duration,
    /// Game clock length in seconds.
    pub session_seconds: i64,
    /// Grace window before terminal sessions are swept.
    pub retire_grace_secs: i64,
}

impl Config {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a variable is present but unparsable,
    /// or when the selected provider is missing a required setting.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

        let mystery_dir =
            PathBuf::from(var("INQUEST_MYSTERY_DIR").unwrap_or_else(|| "mysteries".to_string()));

        let provider_name = var("INQUEST_LLM_PROVIDER").unwrap_or_else(|| "openai".to_string());
        let provider = match provider_name.as_str() {
            "openai" => {
                let api_key = var("INQUEST_OPENAI_API_KEY").ok_or_else(|| {
                    AppError::Config("INQUEST_OPENAI_API_KEY must be set for the openai provider".to_string())
                })?;
                ProviderConfig::OpenAi(OpenAiConfig {
                    api_key,
                    base_url: var("INQUEST_OPENAI_BASE_URL")
                        .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
                    model: var("INQUEST_OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                    max_tokens: None,
                })
            }
            "ollama" => ProviderConfig::Ollama(OllamaConfig {
                host: var("INQUEST_OLLAMA_HOST")
                    .unwrap_or_else(|| "http://localhost:11434".to_string()),
                model: var("INQUEST_OLLAMA_MODEL").unwrap_or_else(|| "llama3.2".to_string()),
            }),
            other => {
                return Err(AppError::Config(format!(
                    "INQUEST_LLM_PROVIDER must be 'openai' or 'ollama', got '{other}'"
                )));
            }
        };

        let llm_timeout = Duration::from_secs(parse_var(&var, "INQUEST_LLM_TIMEOUT_SECS", 30)?);
        let session_seconds = parse_var(&var, "INQUEST_SESSION_SECONDS", 3600)?;
        let retire_grace_secs = parse_var(&var, "INQUEST_RETIRE_GRACE_SECS", 300)?;

        Ok(Self {
            host,
            port,
            mystery_dir,
            provider,
            llm_timeout,
            session_seconds,
            retire_grace_secs,
        })
    }

    /// The engine tunables this configuration implies.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            session_seconds: self.session_seconds,
            retire_grace_secs: self.retire_grace_secs,
            llm_timeout: self.llm_timeout,
            ..EngineConfig::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match var(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{name} must be a valid number: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let map = vars(pairs);
        Config::from_vars(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_with_ollama_provider() {
        let config = config_from(&[("INQUEST_LLM_PROVIDER", "ollama")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.mystery_dir, PathBuf::from("mysteries"));
        assert_eq!(config.llm_timeout, Duration::from_secs(30));
        assert_eq!(config.session_seconds, 3600);
        assert!(matches!(config.provider, ProviderConfig::Ollama(_)));
    }

    #[test]
    fn test_openai_provider_requires_api_key() {
        let err = config_from(&[]).unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_openai_provider_with_key() {
        let config = config_from(&[
            ("INQUEST_OPENAI_API_KEY", "sk-test"),
            ("INQUEST_SESSION_SECONDS", "120"),
        ])
        .unwrap();

        assert_eq!(config.session_seconds, 120);
        match config.provider {
            ProviderConfig::OpenAi(cfg) => {
                assert_eq!(cfg.api_key, "sk-test");
                assert_eq!(cfg.base_url, "https://api.openai.com/v1");
            }
            ProviderConfig::Ollama(_) => panic!("expected openai provider"),
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = config_from(&[("INQUEST_LLM_PROVIDER", "mystral")]).unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "http"), ("INQUEST_LLM_PROVIDER", "ollama")]).unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }
}
