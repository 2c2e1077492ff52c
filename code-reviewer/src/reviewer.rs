//! Review orchestrator: validates requests locally, then asks the generator.

use std::time::Instant;

use repo_intake::{FetchedFile, RepoRef};
use tracing::{info, instrument, warn};

use crate::errors::{ReviewError, ReviewResult};
use crate::generator::TextGenerator;
use crate::modes::ReviewMode;
use crate::prompt::{repository_prompt, review_prompt, revision_prompt};

#[derive(Debug, Clone)]
pub struct Reviewer<G> {
    generator: G,
}

impl<G: TextGenerator> Reviewer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Reviews one piece of code.
    ///
    /// # Errors
    /// - [`ReviewError::EmptyInput`] for empty or whitespace-only code (no call is made)
    /// - [`ReviewError::Generation`] when the generator fails
    #[instrument(skip_all, fields(language = %language, mode = %mode, code_len = code.len()))]
    pub async fn review_one(
        &self,
        code: &str,
        language: &str,
        custom_instructions: &str,
        mode: ReviewMode,
    ) -> ReviewResult<String> {
        if code.trim().is_empty() {
            warn!("refusing to review empty code");
            return Err(ReviewError::EmptyInput);
        }

        let started = Instant::now();
        let (system, prompt) = review_prompt(code, language, custom_instructions, mode);
        let feedback = self.generator.generate(&prompt, Some(&system)).await?;

        info!(
            feedback_len = feedback.len(),
            latency_ms = started.elapsed().as_millis(),
            "review completed"
        );
        Ok(feedback)
    }

    /// Reviews a set of repository files in one request.
    ///
    /// # Errors
    /// - [`ReviewError::ModeNotSupportedForRepository`] for file-only modes (no call is made)
    /// - [`ReviewError::Generation`] when the generator fails
    #[instrument(skip_all, fields(repo = %repo, mode = %mode, files = files.len()))]
    pub async fn review_many(
        &self,
        files: &[FetchedFile],
        repo: &RepoRef,
        custom_instructions: &str,
        mode: ReviewMode,
    ) -> ReviewResult<String> {
        check_repository_mode(mode)?;

        let started = Instant::now();
        let (system, prompt) = repository_prompt(files, repo, custom_instructions, mode);
        let feedback = self.generator.generate(&prompt, Some(&system)).await?;

        info!(
            prompt_len = prompt.len(),
            latency_ms = started.elapsed().as_millis(),
            "repository review completed"
        );
        Ok(feedback)
    }

    /// Asks for a rewrite of `original_code` that applies `feedback`.
    ///
    /// A markdown fence around the reply is removed.
    #[instrument(skip_all, fields(language = language_label))]
    pub async fn revise_from_feedback(
        &self,
        original_code: &str,
        language_label: &str,
        feedback: &str,
    ) -> ReviewResult<String> {
        let started = Instant::now();
        let (system, prompt) = revision_prompt(original_code, language_label, feedback);
        let raw = self.generator.generate(&prompt, Some(&system)).await?;
        let revised = strip_code_fence(&raw).to_string();

        info!(
            revised_len = revised.len(),
            latency_ms = started.elapsed().as_millis(),
            "revision completed"
        );
        Ok(revised)
    }
}

pub(crate) fn check_repository_mode(mode: ReviewMode) -> ReviewResult<()> {
    if mode.supports_repository() {
        Ok(())
    } else {
        Err(ReviewError::ModeNotSupportedForRepository(mode))
    }
}

/// Removes one surrounding ```` ```lang ... ``` ```` fence, if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some(body_start) = after_open.find('\n') else {
        return text;
    };
    let body = &after_open[body_start + 1..];
    match body.trim_end().strip_suffix("```") {
        Some(inner) => inner,
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use ai_llm_service::AiLlmError;

    use super::*;

    #[derive(Default)]
    struct Scripted {
        reply: String,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                ..Default::default()
            }
        }
    }

    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str, _system: Option<&str>) -> Result<String, AiLlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct Failing;

    impl TextGenerator for Failing {
        async fn generate(&self, _: &str, _: Option<&str>) -> Result<String, AiLlmError> {
            Err(AiLlmError::Timeout(Duration::from_secs(1)))
        }
    }

    fn acme() -> RepoRef {
        RepoRef {
            owner: "acme".into(),
            repo: "widgets".into(),
        }
    }

    #[tokio::test]
    async fn empty_code_never_reaches_the_generator() {
        let reviewer = Reviewer::new(Scripted::replying("x"));
        for code in ["", "   \n\t"] {
            let err = reviewer
                .review_one(code, "python", "", ReviewMode::Comprehensive)
                .await
                .unwrap_err();
            assert!(matches!(err, ReviewError::EmptyInput));
        }
        assert_eq!(reviewer.generator().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn review_one_returns_generated_text() {
        let reviewer = Reviewer::new(Scripted::replying("## Looks good"));
        let out = reviewer
            .review_one("print(1)", "python", "be brief", ReviewMode::Readability)
            .await
            .unwrap();
        assert_eq!(out, "## Looks good");
        let prompts = reviewer.generator().prompts.lock().unwrap();
        assert!(prompts[0].contains("print(1)"));
        assert!(prompts[0].contains("be brief"));
    }

    #[tokio::test]
    async fn repository_review_rejects_test_generation_without_calls() {
        let reviewer = Reviewer::new(Scripted::replying("x"));
        let err = reviewer
            .review_many(&[], &acme(), "", ReviewMode::TestGeneration)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReviewError::ModeNotSupportedForRepository(ReviewMode::TestGeneration)
        ));
        assert_eq!(reviewer.generator().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repository_review_accepts_an_empty_file_set() {
        let reviewer = Reviewer::new(Scripted::replying("nothing to review"));
        let out = reviewer
            .review_many(&[], &acme(), "", ReviewMode::Security)
            .await
            .unwrap();
        assert_eq!(out, "nothing to review");
    }

    #[tokio::test]
    async fn generator_failure_is_a_generation_error() {
        let reviewer = Reviewer::new(Failing);
        let err = reviewer
            .review_one("x", "rust", "", ReviewMode::Comprehensive)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Generation(_)));
    }

    #[tokio::test]
    async fn revision_strips_fences() {
        let reviewer = Reviewer::new(Scripted::replying("```rust\nfn main() {}\n```\n"));
        let out = reviewer
            .revise_from_feedback("fn main(){}", "Rust", "format it")
            .await
            .unwrap();
        assert_eq!(out, "fn main() {}\n");
    }

    #[test]
    fn strip_code_fence_cases() {
        assert_eq!(strip_code_fence("plain\ncode\n"), "plain\ncode\n");
        assert_eq!(strip_code_fence("```\na\n```"), "a\n");
        assert_eq!(strip_code_fence("  ```py\na\nb\n```  "), "a\nb\n");
        assert_eq!(strip_code_fence("```js\nunterminated\n"), "unterminated");
    }
}
