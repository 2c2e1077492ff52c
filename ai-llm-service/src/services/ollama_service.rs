//! Lightweight Ollama service for text generation.
//!
//! Thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate` : synchronous text generation (`stream=false`)
//!
//! The system instruction, when given, is forwarded through Ollama's `system` field.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
    services::{checked_endpoint, send_error},
};

/// Thin client for Ollama.
///
/// Reuses an HTTP client with a configurable timeout.
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    timeout: Duration,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not `Ollama`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(
                ProviderError::new(LlmProvider::Ollama, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let base = checked_endpoint(&cfg)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        let url_generate = format!("{}/api/generate", base);

        Ok(Self {
            client,
            cfg,
            url_generate,
            timeout,
        })
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`        ← `self.cfg.model`
    /// - `num_predict`  ← `self.cfg.max_tokens`
    /// - `temperature`  ← `self.cfg.temperature`
    /// - `top_p`        ← `self.cfg.top_p`
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::Timeout`] when no response arrives within the configured timeout
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - `Decode` if response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateRequest::from_cfg(&self.cfg, prompt, system);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, "Ollama /api/generate returned non-success status");
            return Err(ProviderError::new(
                LlmProvider::Ollama,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::Ollama,
                ProviderErrorKind::Decode(format!("serde error: {e}; ensure `stream=false` is used")),
            )
        })?;

        if out.response.trim().is_empty() {
            return Err(ProviderError::new(LlmProvider::Ollama, ProviderErrorKind::EmptyChoices).into());
        }

        info!(latency_ms = started.elapsed().as_millis(), "generation completed");
        Ok(out.response)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            model: &cfg.model,
            prompt,
            system,
            stream: false,
            options: GenerateOptions {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                num_predict: cfg.max_tokens,
            },
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/generate`; the generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn cfg(endpoint: String) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen3:14b".into(),
            endpoint,
            api_key: None,
            max_tokens: Some(512),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn generate_posts_non_streaming_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({
                "model": "qwen3:14b",
                "stream": false,
                "system": "sys",
                "options": {"num_predict": 512}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
            .mount(&server)
            .await;

        let svc = OllamaService::new(cfg(format!("{}/", server.uri()))).unwrap();
        assert_eq!(svc.generate("p", Some("sys")).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn slow_backend_reports_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "late"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut c = cfg(server.uri());
        c.timeout_secs = Some(1);
        let svc = OllamaService::new(c).unwrap();
        let err = svc.generate("p", None).await.unwrap_err();
        assert!(
            matches!(err, AiLlmError::Timeout(d) if d == Duration::from_secs(1)),
            "{err}"
        );
    }

    #[test]
    fn rejects_foreign_provider() {
        let mut c = cfg("http://localhost:11434".into());
        c.provider = LlmProvider::Gemini;
        assert!(OllamaService::new(c).is_err());
    }

    #[test]
    fn rejects_endpoint_without_scheme() {
        let err = OllamaService::new(cfg("localhost:11434".into())).unwrap_err();
        assert!(err.to_string().contains("invalid endpoint"));
    }
}
