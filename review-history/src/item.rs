use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a review covered one file or a whole repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    #[default]
    File,
    Repo,
}

/// One completed review. Immutable once recorded.
///
/// Serialized in camelCase with `timestamp` as epoch milliseconds, so the
/// persisted blob is a plain JSON array of objects. Items written without a
/// `kind` are file reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// File path for file reviews, `owner/repo` for repository reviews.
    pub file_name: String,
    /// Language label (`"Python"`), or a summary for repository reviews.
    pub language: String,
    pub feedback: String,
    /// Depends on `kind`: the reviewed source text for file reviews, the
    /// newline-joined list of reviewed paths for repository reviews.
    pub code: String,
    pub mode: String,
    #[serde(default)]
    pub kind: ReviewKind,
}

impl HistoryItem {
    /// New item with a random id, stamped now.
    pub fn new(
        kind: ReviewKind,
        file_name: impl Into<String>,
        language: impl Into<String>,
        mode: impl Into<String>,
        code: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            file_name: file_name.into(),
            language: language.into(),
            feedback: feedback.into(),
            code: code.into(),
            mode: mode.into(),
            kind,
        }
    }
}
