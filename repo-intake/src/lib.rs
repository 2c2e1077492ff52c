//! Source intake for code review: language classification, local directory
//! scanning and GitHub repository access.

mod errors;
pub mod github;
pub mod language;
pub mod local;
pub mod repo_url;
pub mod types;

pub use errors::{IntakeError, IntakeResult};
pub use github::{DEFAULT_GITHUB_API, GitHubClient, GitHubConfig};
pub use language::{LANGUAGES, Language, classify, find_by_value};
pub use repo_url::parse_repo_ref;
pub use types::{CodeFile, FetchedFile, FileContent, FileOrigin, RepoRef};
