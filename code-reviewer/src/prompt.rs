//! Prompt builders for reviews and revisions.
//!
//! Each builder returns `(system, prompt)`. Prompts carry the code in fenced
//! blocks tagged with the language so the model keeps file boundaries.

use repo_intake::{FetchedFile, RepoRef};

use crate::modes::ReviewMode;

const REVIEWER_SYSTEM: &str = "You are an expert software engineer performing a code review. \
Reply in GitHub-flavoured markdown. Be specific, reference functions and lines, and suggest \
concrete fixes with code snippets.";

const REVISER_SYSTEM: &str = "You are an expert software engineer. You rewrite code so that it \
addresses review feedback while preserving its behaviour and public interface.";

/// Single file (or pasted snippet) review.
pub fn review_prompt(
    code: &str,
    language: &str,
    custom_instructions: &str,
    mode: ReviewMode,
) -> (String, String) {
    let mut s = String::new();
    s.push_str(&format!("# Task ({})\n{}\n", mode.label(), mode.focus()));
    push_custom(&mut s, custom_instructions);
    s.push_str(&format!("\n# Code ({language})\n```{language}\n"));
    s.push_str(code);
    if !code.ends_with('\n') {
        s.push('\n');
    }
    s.push_str("```\n");
    (REVIEWER_SYSTEM.to_string(), s)
}

/// Whole-repository review over already fetched files.
pub fn repository_prompt(
    files: &[FetchedFile],
    repo: &RepoRef,
    custom_instructions: &str,
    mode: ReviewMode,
) -> (String, String) {
    let mut s = String::new();
    s.push_str(&format!(
        "# Task ({}) for repository `{repo}`\n{}\n\
         Review the repository as a whole: point out cross-file issues and architecture \
         concerns, and name the file for every finding.\n",
        mode.label(),
        mode.focus()
    ));
    push_custom(&mut s, custom_instructions);
    s.push_str(&format!("\n# Files ({})\n", files.len()));
    for f in files {
        let tag = repo_intake::classify(&f.path)
            .map(|l| l.value)
            .unwrap_or_default();
        s.push_str(&format!("\n## {}\n```{tag}\n", f.path));
        s.push_str(&f.content);
        if !f.content.ends_with('\n') {
            s.push('\n');
        }
        s.push_str("```\n");
    }
    (REVIEWER_SYSTEM.to_string(), s)
}

/// Request for a full rewrite of `original_code` that applies `feedback`.
pub fn revision_prompt(original_code: &str, language_label: &str, feedback: &str) -> (String, String) {
    let mut s = String::new();
    s.push_str(&format!(
        "Rewrite the following {language_label} code so that it applies every suggestion in \
         the review below.\nReply with the complete revised code only: no explanations and no \
         markdown fences.\n"
    ));
    s.push_str("\n# Review\n");
    s.push_str(feedback);
    s.push_str("\n\n# Original code\n```\n");
    s.push_str(original_code);
    if !original_code.ends_with('\n') {
        s.push('\n');
    }
    s.push_str("```\n");
    (REVISER_SYSTEM.to_string(), s)
}

fn push_custom(s: &mut String, custom_instructions: &str) {
    let custom = custom_instructions.trim();
    if !custom.is_empty() {
        s.push_str("\n# Additional instructions from the user\n");
        s.push_str(custom);
        s.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_prompt_carries_code_language_and_instructions() {
        let (system, prompt) = review_prompt("x = 1", "python", "  check naming ", ReviewMode::Security);
        assert!(!system.is_empty());
        assert!(prompt.contains("```python\nx = 1\n```"));
        assert!(prompt.contains("check naming"));
        assert!(prompt.contains("Security"));
    }

    #[test]
    fn blank_instructions_are_omitted() {
        let (_, prompt) = review_prompt("x", "rust", "   ", ReviewMode::Comprehensive);
        assert!(!prompt.contains("Additional instructions"));
    }

    #[test]
    fn repository_prompt_lists_every_file() {
        let repo = RepoRef {
            owner: "acme".into(),
            repo: "widgets".into(),
        };
        let files = vec![
            FetchedFile {
                path: "src/a.rs".into(),
                content: "fn a() {}".into(),
            },
            FetchedFile {
                path: "b.py".into(),
                content: "def b(): pass\n".into(),
            },
        ];
        let (_, prompt) = repository_prompt(&files, &repo, "", ReviewMode::Performance);
        assert!(prompt.contains("acme/widgets"));
        assert!(prompt.contains("## src/a.rs\n```rust\nfn a() {}\n```"));
        assert!(prompt.contains("## b.py\n```python\n"));
    }

    #[test]
    fn revision_prompt_includes_feedback_and_code() {
        let (_, prompt) = revision_prompt("let x = 1;", "Rust", "rename x");
        assert!(prompt.contains("Rust"));
        assert!(prompt.contains("rename x"));
        assert!(prompt.contains("let x = 1;"));
    }
}
