//! Text-generation collaborator for code review.
//!
//! One [`LlmService`] per process, built from [`LlmModelConfig`] (usually via
//! [`config_from_env`]), dispatching to Gemini, OpenAI or Ollama.

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::default_config::{config_from_env, config_from_lookup};
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use llm_service::LlmService;
