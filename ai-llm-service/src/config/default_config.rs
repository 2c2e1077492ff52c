//! Default model config loaded from environment variables.
//!
//! One generation profile is used for both reviews and revisions. The provider
//! is picked by `LLM_KIND` (default `gemini`).
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = `gemini` | `openai` | `ollama`
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 120)
//!
//! Gemini:
//! - `GEMINI_API_KEY` (mandatory), `GEMINI_MODEL`, `GEMINI_URL`
//!
//! OpenAI:
//! - `OPENAI_API_KEY` (mandatory), `OPENAI_MODEL`, `OPENAI_URL`
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` (mandatory), `OLLAMA_MODEL` (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, must_var, opt_u32, opt_u64, opt_var, validate_http_endpoint,
    },
};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Builds the generation config from the process environment.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds the generation config from an arbitrary variable lookup.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::MissingVar`] for a missing key/model/endpoint
/// - [`ConfigError::InvalidNumber`] for malformed numeric values
/// - [`ConfigError::InvalidFormat`] for an endpoint without http/https
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider: LlmProvider = opt_var(&lookup, "LLM_KIND")
        .unwrap_or_else(|| "gemini".to_string())
        .parse()?;
    let max_tokens = opt_u32(&lookup, "LLM_MAX_TOKENS")?;
    let timeout_secs = opt_u64(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    let (endpoint, model, api_key) = match provider {
        LlmProvider::Gemini => {
            let endpoint =
                opt_var(&lookup, "GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.into());
            validate_http_endpoint("GEMINI_URL", &endpoint)?;
            let model =
                opt_var(&lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());
            let key = must_var(&lookup, "GEMINI_API_KEY")?;
            (endpoint, model, Some(key))
        }
        LlmProvider::OpenAI => {
            let endpoint =
                opt_var(&lookup, "OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.into());
            validate_http_endpoint("OPENAI_URL", &endpoint)?;
            let model =
                opt_var(&lookup, "OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
            let key = must_var(&lookup, "OPENAI_API_KEY")?;
            (endpoint, model, Some(key))
        }
        LlmProvider::Ollama => {
            let endpoint = ollama_endpoint(&lookup)?;
            let model = must_var(&lookup, "OLLAMA_MODEL")?;
            (endpoint, model, None)
        }
    };

    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint<F>(lookup: &F) -> Result<String, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = opt_var(lookup, "OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = opt_var(lookup, "OLLAMA_PORT") {
        port.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
            var: "OLLAMA_PORT",
            reason: "expected u16 (1..=65535)",
        })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_to_gemini() {
        let cfg = config_from_lookup(lookup_from(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::Gemini);
        assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.endpoint, DEFAULT_GEMINI_URL);
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn gemini_requires_key() {
        let err = config_from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn ollama_port_fallback() {
        let cfg = config_from_lookup(lookup_from(&[
            ("LLM_KIND", "ollama"),
            ("OLLAMA_PORT", "11434"),
            ("OLLAMA_MODEL", "qwen3:14b"),
            ("LLM_MAX_TOKENS", "2048"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint, "http://localhost:11434");
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.max_tokens, Some(2048));
    }

    #[test]
    fn ollama_rejects_bad_port() {
        let err = config_from_lookup(lookup_from(&[
            ("LLM_KIND", "ollama"),
            ("OLLAMA_PORT", "http"),
            ("OLLAMA_MODEL", "m"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OLLAMA_PORT"));
    }

    #[test]
    fn openai_endpoint_must_be_http() {
        let err = config_from_lookup(lookup_from(&[
            ("LLM_KIND", "openai"),
            ("OPENAI_API_KEY", "sk"),
            ("OPENAI_URL", "api.openai.com"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { var: "OPENAI_URL", .. })
        ));
    }
}
