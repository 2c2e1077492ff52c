use std::future::Future;

use ai_llm_service::{AiLlmError, LlmService};

/// "Send a prompt, receive text."
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}

impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        LlmService::generate(self, prompt, system).await
    }
}
