//! Gemini service for text generation.
//!
//! Non-streaming client for the Generative Language API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! The API key travels in the `x-goog-api-key` header. The system instruction,
//! when given, goes into `systemInstruction`; the prompt is a single user turn.
//! All text parts of the first candidate are concatenated into the result.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
    services::{checked_endpoint, send_error},
};

/// Thin client for Gemini `generateContent`.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    timeout: Duration,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not Gemini
    /// - `MissingApiKey` if `cfg.api_key` is `None`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::MissingApiKey)
        })?;

        let base = checked_endpoint(&cfg)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        let mut key_value = header::HeaderValue::from_str(&api_key).map_err(|e| {
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model);

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            timeout,
        })
    }

    /// Performs a single `generateContent` call.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses (quota, invalid key, etc.)
    /// - [`AiLlmError::Timeout`] when no response arrives within the configured timeout
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - `Decode` if the JSON cannot be parsed or the prompt was blocked
    /// - `EmptyChoices` if no candidate carries text
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_generate
        );

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

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(error = %e, model = %self.cfg.model, "failed to decode generateContent response");
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts[].text`"
                )),
            )
        })?;

        if let Some(reason) = out.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!("prompt blocked: {reason}")),
            )
            .into());
        }

        let text = out
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyChoices)
            })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "generateContent completed"
        );

        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system.map(|s| Content {
                role: None,
                parts: vec![Part { text: s }],
            }),
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn cfg(endpoint: String) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-test".into(),
            endpoint,
            api_key: Some("g-key".into()),
            max_tokens: Some(1024),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn joins_candidate_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(json!({
                "systemInstruction": {"parts": [{"text": "sys"}]},
                "contents": [{"role": "user", "parts": [{"text": "prompt"}]}],
                "generationConfig": {"maxOutputTokens": 1024}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "## Review\n"}, {"text": "All good."}]}}]
            })))
            .mount(&server)
            .await;

        let svc = GeminiService::new(cfg(server.uri())).unwrap();
        let out = svc.generate("prompt", Some("sys")).await.unwrap();
        assert_eq!(out, "## Review\nAll good.");
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [],
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let svc = GeminiService::new(cfg(server.uri())).unwrap();
        let err = svc.generate("prompt", None).await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn empty_candidates_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let svc = GeminiService::new(cfg(server.uri())).unwrap();
        let err = svc.generate("prompt", None).await.unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::EmptyChoices,
                ..
            })
        ));
    }
}
