//! Shared text-generation service.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Dispatches to the concrete provider client chosen by the config.
//!
//! # Example
//! ```no_run
//! use ai_llm_service::{LlmService, config_from_env};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = LlmService::new(config_from_env()?)?;
//! let txt = svc.generate("Review: fn main() {}", Some("You are a code reviewer.")).await?;
//! println!("{txt}");
//! # Ok(()) }
//! ```

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{
        gemini_service::GeminiService, ollama_service::OllamaService,
        open_ai_service::OpenAiService,
    },
};

/// Concrete provider client with enum dispatch.
#[derive(Debug)]
enum ProviderClient {
    Gemini(GeminiService),
    OpenAI(OpenAiService),
    Ollama(OllamaService),
}

/// Text-generation service bound to one model config.
#[derive(Debug)]
pub struct LlmService {
    cfg: LlmModelConfig,
    client: ProviderClient,
}

impl LlmService {
    /// Builds the provider client for `cfg`.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the provider rejects the config (missing key,
    /// bad endpoint) or the HTTP client cannot be built.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let client = match cfg.provider {
            LlmProvider::Gemini => ProviderClient::Gemini(GeminiService::new(cfg.clone())?),
            LlmProvider::OpenAI => ProviderClient::OpenAI(OpenAiService::new(cfg.clone())?),
            LlmProvider::Ollama => ProviderClient::Ollama(OllamaService::new(cfg.clone())?),
        };
        Ok(Self { cfg, client })
    }

    /// Generates text for `prompt` with an optional system instruction.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails; no retry is attempted.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        debug!(provider = %self.cfg.provider, model = %self.cfg.model, "generate");
        match &self.client {
            ProviderClient::Gemini(c) => c.generate(prompt, system).await,
            ProviderClient::OpenAI(c) => c.generate(prompt, system).await,
            ProviderClient::Ollama(c) => c.generate(prompt, system).await,
        }
    }

    /// The config this service was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }
}
