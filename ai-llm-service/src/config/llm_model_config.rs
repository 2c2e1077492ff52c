use crate::config::llm_provider::LlmProvider;

/// Configuration for a text-generation model invocation.
///
/// # Fields
///
/// - `provider`: Which backend to use (Gemini, OpenAI, Ollama).
/// - `model`: The model identifier (e.g., `"gemini-2.5-flash"`, `"qwen3:14b"`).
/// - `endpoint`: Base URL of the API (no path).
/// - `api_key`: API key for providers that require authentication.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Gemini,
///     model: "gemini-2.5-flash".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: Some("AIza...".to_string()),
///     max_tokens: None,
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(120),
/// };
/// assert_eq!(cfg.provider, LlmProvider::Gemini);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL (remote API or local server).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Endpoint without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}
