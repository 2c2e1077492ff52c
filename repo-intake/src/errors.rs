//! Crate-wide error hierarchy for repo-intake.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Max characters of an upstream response body kept in errors/logs.
const SNIPPET_CHARS: usize = 240;

/// Root error type for source intake (local directories and remote repositories).
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The string does not name a GitHub repository.
    #[error("invalid repository url: {0}")]
    InvalidRepoUrl(String),

    /// Local directory access is not available in this deployment.
    #[error("local directory access is not supported: {0}")]
    UnsupportedPlatform(String),

    /// The requested directory may not be opened.
    #[error("access denied for {path}: {reason}")]
    AccessDenied { path: String, reason: String },

    /// Content was requested from the local scanner for a file without a local handle.
    #[error("no local handle available for {path}")]
    NotLocal { path: String },

    /// Reading a local file failed.
    #[error("failed to read {}: {cause}", path.display())]
    LocalReadFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// The hosting API answered with a non-success status.
    #[error("GitHub API error {status} for {repo} at {url}: {snippet}")]
    RemoteFetchFailed {
        status: u16,
        repo: String,
        url: String,
        snippet: String,
    },

    /// Transport failure without an HTTP status (DNS, connect, reset, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Remote file content could not be turned into text.
    #[error("could not decode {path}: {reason}")]
    DecodeFailed { path: String, reason: String },

    /// A fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(String),
}

impl IntakeError {
    /// HTTP status of the upstream response, when the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            IntakeError::RemoteFetchFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IntakeError {
    fn from(e: reqwest::Error) -> Self {
        IntakeError::Network(e.to_string())
    }
}

impl From<tokio::task::JoinError> for IntakeError {
    fn from(e: tokio::task::JoinError) -> Self {
        IntakeError::Join(e.to_string())
    }
}

/// Flattens whitespace and truncates a response body for error messages.
pub(crate) fn make_snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SNIPPET_CHARS {
        let cut: String = flat.chars().take(SNIPPET_CHARS).collect();
        format!("{cut}…")
    } else {
        flat
    }
}
