//! Provider clients. Each one validates its config at construction and
//! exposes a single non-streaming `generate` call.

pub mod gemini_service;
pub mod ollama_service;
pub mod open_ai_service;

use std::time::Duration;

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ProviderError, ProviderErrorKind},
};

/// Returns the trimmed base URL, or `InvalidEndpoint` when it is empty or not http(s).
pub(crate) fn checked_endpoint(cfg: &LlmModelConfig) -> Result<String, AiLlmError> {
    let endpoint = cfg.base_url();
    if endpoint.is_empty() || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
    {
        return Err(ProviderError::new(
            cfg.provider,
            ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
        )
        .into());
    }
    Ok(endpoint.to_string())
}

/// Maps a failed request, reporting an elapsed client timeout as [`AiLlmError::Timeout`].
pub(crate) fn send_error(e: reqwest::Error, timeout: Duration) -> AiLlmError {
    if e.is_timeout() {
        AiLlmError::Timeout(timeout)
    } else {
        AiLlmError::HttpTransport(e)
    }
}
