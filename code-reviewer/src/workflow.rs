//! End-to-end review flows: intake, generation and history in one call.
//!
//! Every flow either completes and (where applicable) records exactly one
//! history item, or fails with exactly one error and records nothing.

use repo_intake::{GitHubClient, RepoRef, find_by_value, parse_repo_ref};
use review_history::{HistoryCache, HistoryItem, KeyValueStore, ReviewKind};
use serde::Serialize;
use tracing::{info, instrument};

use crate::diff::{LineDiff, line_diff};
use crate::errors::{ReviewError, WorkflowError};
use crate::generator::TextGenerator;
use crate::modes::ReviewMode;
use crate::reviewer::{Reviewer, check_repository_mode};

/// Collaborators shared by all flows.
#[derive(Debug)]
pub struct ReviewContext<G, S> {
    pub reviewer: Reviewer<G>,
    pub github: GitHubClient,
    pub history: HistoryCache<S>,
}

/// Review of one file or pasted snippet.
#[derive(Debug, Clone, Default)]
pub struct FileReviewRequest {
    pub code: String,
    /// Language tag (`"python"`); unknown tags are passed through as-is.
    pub language: String,
    /// Path of the selected file; pasted snippets have none and are not recorded.
    pub file_name: Option<String>,
    pub custom_instructions: String,
    pub mode: ReviewMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReviewOutcome {
    pub feedback: String,
    pub history_item: Option<HistoryItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoReviewOutcome {
    pub repo: RepoRef,
    pub files_reviewed: usize,
    pub feedback: String,
    pub history_item: HistoryItem,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub revised_code: String,
    pub diff: LineDiff,
}

impl<G: TextGenerator, S: KeyValueStore> ReviewContext<G, S> {
    pub fn new(reviewer: Reviewer<G>, github: GitHubClient, history: HistoryCache<S>) -> Self {
        Self {
            reviewer,
            github,
            history,
        }
    }

    /// Reviews one file and records it when the request names a file.
    pub async fn review_file(
        &self,
        req: &FileReviewRequest,
    ) -> Result<FileReviewOutcome, WorkflowError> {
        let feedback = self
            .reviewer
            .review_one(&req.code, &req.language, &req.custom_instructions, req.mode)
            .await?;

        let history_item = match req.file_name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => {
                let label = find_by_value(&req.language)
                    .map(|l| l.label.to_string())
                    .unwrap_or_else(|| req.language.clone());
                let item = HistoryItem::new(
                    ReviewKind::File,
                    name,
                    label,
                    req.mode.value(),
                    req.code.clone(),
                    feedback.clone(),
                );
                self.history.record(item.clone()).await;
                Some(item)
            }
            None => None,
        };

        Ok(FileReviewOutcome {
            feedback,
            history_item,
        })
    }

    /// Lists, fetches and reviews a whole GitHub repository.
    ///
    /// All-or-nothing: a single failed fetch fails the review and nothing is
    /// recorded.
    #[instrument(skip_all, fields(url = %url.trim(), mode = %mode))]
    pub async fn review_repository(
        &self,
        url: &str,
        custom_instructions: &str,
        mode: ReviewMode,
    ) -> Result<RepoReviewOutcome, WorkflowError> {
        let repo = parse_repo_ref(url)
            .ok_or_else(|| repo_intake::IntakeError::InvalidRepoUrl(url.trim().to_string()))?;
        check_repository_mode(mode)?;

        let listing = self.github.list_files(&repo).await?;
        let fetched = self.github.fetch_all(&repo, &listing).await?;
        let feedback = self
            .reviewer
            .review_many(&fetched, &repo, custom_instructions, mode)
            .await?;

        let paths: Vec<&str> = fetched.iter().map(|f| f.path.as_str()).collect();
        let item = HistoryItem::new(
            ReviewKind::Repo,
            repo.to_string(),
            format!("{} files", fetched.len()),
            mode.value(),
            paths.join("\n"),
            feedback.clone(),
        );
        self.history.record(item.clone()).await;

        info!(%repo, files = fetched.len(), "repository review recorded");
        Ok(RepoReviewOutcome {
            repo,
            files_reviewed: fetched.len(),
            feedback,
            history_item: item,
        })
    }

    /// Asks for revised code and diffs it against the original.
    pub async fn revise_with_diff(
        &self,
        code: &str,
        language_label: &str,
        feedback: &str,
    ) -> Result<Revision, WorkflowError> {
        if code.trim().is_empty() {
            return Err(ReviewError::EmptyInput.into());
        }
        let revised_code = self
            .reviewer
            .revise_from_feedback(code, language_label, feedback)
            .await?;
        let diff = line_diff(code, &revised_code);
        Ok(Revision { revised_code, diff })
    }
}
