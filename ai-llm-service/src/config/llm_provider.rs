use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for text generation.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let provider: LlmProvider = "ollama".parse().unwrap();
/// assert_eq!(provider, LlmProvider::Ollama);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// OpenAI-compatible chat completions API.
    OpenAI,
    /// Local Ollama runtime for on-device inference.
    Ollama,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Ollama => "ollama",
        })
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("Gemini".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert_eq!("chatgpt".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert_eq!(" OLLAMA ".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "claude-ish".parse::<LlmProvider>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedProvider(ref p) if p == "claude-ish"));
    }
}
