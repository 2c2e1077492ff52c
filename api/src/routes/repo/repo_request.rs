use serde::Deserialize;

/// Body of `POST /repo/files`.
#[derive(Debug, Deserialize)]
pub struct RepoFilesRequest {
    /// `https://github.com/{owner}/{repo}` (extra segments and `.git` allowed).
    pub url: String,
}

/// Body of `POST /repo/file`.
#[derive(Debug, Deserialize)]
pub struct RepoFileRequest {
    pub url: String,
    /// Path as listed by `/repo/files`.
    pub path: String,
}
