//! Source-agnostic data model for discovered files.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::language::Language;

/// Where a [`CodeFile`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOrigin {
    /// Absolute path of a file found by the local scanner.
    Local(PathBuf),
    /// A file listed from a remote repository; content is fetched by path.
    Remote,
}

/// File text, loaded on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileContent {
    #[default]
    Unloaded,
    Loaded(String),
}

impl FileContent {
    pub fn as_loaded(&self) -> Option<&str> {
        match self {
            FileContent::Loaded(s) => Some(s),
            FileContent::Unloaded => None,
        }
    }
}

/// One discovered source file.
///
/// `path` is slash-separated and relative to the directory or repository it
/// was found in; it is unique only within that source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFile {
    pub path: String,
    pub language: &'static Language,
    pub content: FileContent,
    pub origin: FileOrigin,
}

impl CodeFile {
    pub fn is_local(&self) -> bool {
        matches!(self.origin, FileOrigin::Local(_))
    }
}

/// `owner/repo` on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A repository file together with its decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedFile {
    pub path: String,
    pub content: String,
}
