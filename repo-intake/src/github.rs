//! GitHub provider (REST v3) for repository listings and file contents.
//!
//! Endpoints used:
//!   * GET /repos/{owner}/{repo}
//!   * GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
//!   * GET /repos/{owner}/{repo}/contents/{path}

use std::time::Instant;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::{IntakeError, IntakeResult, make_snippet};
use crate::language::classify;
use crate::types::{CodeFile, FetchedFile, FileContent, FileOrigin, RepoRef};

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("code-critic/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base, e.g. `https://api.github.com` or a GitHub Enterprise `/api/v3` root.
    pub api_base: String,
    /// Optional token sent as `Authorization: Bearer ...`.
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GITHUB_API.to_string(),
            token: None,
        }
    }
}

/// GitHub HTTP client wrapper. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
}

impl GitHubClient {
    /// Builds a client with the default headers GitHub expects.
    pub fn new(cfg: GitHubConfig) -> IntakeResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = cfg.token.as_deref().filter(|t| !t.trim().is_empty()) {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| IntakeError::Network(format!("invalid GITHUB_TOKEN header: {e}")))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let base_api = cfg.api_base.trim().trim_end_matches('/').to_string();
        debug!(base_api = %base_api, authenticated = cfg.token.is_some(), "GitHubClient created");

        Ok(Self { http, base_api })
    }

    /// Lists recognised source files on the default branch.
    ///
    /// Only blob entries are kept; entries with unknown extensions are dropped.
    #[instrument(skip_all, fields(repo = %repo))]
    pub async fn list_files(&self, repo: &RepoRef) -> IntakeResult<Vec<CodeFile>> {
        let started = Instant::now();

        let info_url = format!("{}/repos/{}/{}", self.base_api, repo.owner, repo.repo);
        let info: RepoInfo = self.get_json(repo, &info_url).await?;

        let tree_url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.base_api,
            repo.owner,
            repo.repo,
            urlencoding::encode(&info.default_branch)
        );
        let tree: TreeResponse = self.get_json(repo, &tree_url).await?;

        if tree.truncated {
            warn!(
                branch = %info.default_branch,
                entries = tree.tree.len(),
                "tree listing truncated by GitHub; some files are missing"
            );
        }

        let total = tree.tree.len();
        let files: Vec<CodeFile> = tree
            .tree
            .into_iter()
            .filter(|e| e.kind == "blob")
            .filter_map(|e| {
                classify(&e.path).map(|language| CodeFile {
                    path: e.path,
                    language,
                    content: FileContent::Unloaded,
                    origin: FileOrigin::Remote,
                })
            })
            .collect();

        info!(
            branch = %info.default_branch,
            total,
            kept = files.len(),
            latency_ms = started.elapsed().as_millis(),
            "repository listing completed"
        );
        Ok(files)
    }

    /// Fetches and decodes one file's text.
    ///
    /// # Errors
    /// - [`IntakeError::RemoteFetchFailed`] for non-2xx responses
    /// - [`IntakeError::DecodeFailed`] for a non-base64 encoding, invalid base64
    ///   or content that is not UTF-8
    pub async fn fetch_content(&self, repo: &RepoRef, path: &str) -> IntakeResult<String> {
        let encoded_path = path
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_api, repo.owner, repo.repo, encoded_path
        );
        debug!(%repo, path, "fetching file content");

        let body: ContentResponse = self.get_json(repo, &url).await.map_err(|e| match e {
            IntakeError::DecodeFailed { reason, .. } => IntakeError::DecodeFailed {
                path: path.to_string(),
                reason,
            },
            other => other,
        })?;

        decode_content(path, &body)
    }

    /// Fetches every file concurrently, one task per file.
    ///
    /// All-or-nothing: the first failure aborts the outstanding tasks and is
    /// returned. On success the output follows the order of `files`.
    #[instrument(skip_all, fields(repo = %repo, files = files.len()))]
    pub async fn fetch_all(
        &self,
        repo: &RepoRef,
        files: &[CodeFile],
    ) -> IntakeResult<Vec<FetchedFile>> {
        let started = Instant::now();
        let mut set = JoinSet::new();

        for (idx, file) in files.iter().enumerate() {
            let client = self.clone();
            let repo = repo.clone();
            let path = file.path.clone();
            set.spawn(async move {
                let content = client.fetch_content(&repo, &path).await;
                (idx, path, content)
            });
        }

        let mut slots: Vec<Option<FetchedFile>> = vec![None; files.len()];
        while let Some(joined) = set.join_next().await {
            let (idx, path, content) = match joined {
                Ok(v) => v,
                Err(e) => {
                    set.abort_all();
                    return Err(e.into());
                }
            };
            match content {
                Ok(content) => slots[idx] = Some(FetchedFile { path, content }),
                Err(e) => {
                    error!(path = %path, error = %e, "file fetch failed; aborting remaining fetches");
                    set.abort_all();
                    return Err(e);
                }
            }
        }

        let fetched: Vec<FetchedFile> = slots.into_iter().flatten().collect();
        info!(
            fetched = fetched.len(),
            latency_ms = started.elapsed().as_millis(),
            "repository contents fetched"
        );
        Ok(fetched)
    }

    async fn get_json<T: DeserializeOwned>(&self, repo: &RepoRef, url: &str) -> IntakeResult<T> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, %repo, "GitHub returned non-success status");
            return Err(IntakeError::RemoteFetchFailed {
                status: status.as_u16(),
                repo: repo.to_string(),
                url: url.to_string(),
                snippet,
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| IntakeError::DecodeFailed {
            path: url.to_string(),
            reason: format!("unexpected response shape: {e}"),
        })
    }
}

fn decode_content(path: &str, body: &ContentResponse) -> IntakeResult<String> {
    let fail = |reason: String| IntakeError::DecodeFailed {
        path: path.to_string(),
        reason,
    };

    if body.encoding != "base64" {
        return Err(fail(format!("unsupported encoding `{}`", body.encoding)));
    }
    let compact: String = body
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| fail(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| fail(format!("content is not UTF-8: {e}")))
}

/* ===========================================================================
GitHub payloads
======================================================================== */

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn acme() -> RepoRef {
        RepoRef {
            owner: "acme".into(),
            repo: "widgets".into(),
        }
    }

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(GitHubConfig {
            api_base: format!("{}/", server.uri()),
            token: None,
        })
        .unwrap()
    }

    fn b64(s: &str) -> String {
        STANDARD.encode(s)
    }

    async fn mount_content(server: &MockServer, file: &str, text: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/acme/widgets/contents/{file}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": b64(text),
                "encoding": "base64"
            })))
            .mount(server)
            .await;
    }

    fn remote(p: &str) -> CodeFile {
        CodeFile {
            path: p.into(),
            language: classify(p).unwrap(),
            content: FileContent::Unloaded,
            origin: FileOrigin::Remote,
        }
    }

    #[tokio::test]
    async fn list_files_keeps_recognised_blobs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"default_branch": "trunk"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/git/trees/trunk"))
            .and(query_param("recursive", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "truncated": false,
                "tree": [
                    {"path": "src", "type": "tree"},
                    {"path": "src/main.rs", "type": "blob"},
                    {"path": "README.md", "type": "blob"},
                    {"path": "vendor/lib", "type": "commit"},
                    {"path": "web/app.tsx", "type": "blob"}
                ]
            })))
            .mount(&server)
            .await;

        let files = client(&server).list_files(&acme()).await.unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/main.rs", "web/app.tsx"]);
        assert!(files.iter().all(|f| f.origin == FileOrigin::Remote));
    }

    #[tokio::test]
    async fn missing_repo_reports_status_and_repo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let err = client(&server).list_files(&acme()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        let msg = err.to_string();
        assert!(msg.contains("acme/widgets"), "{msg}");
        assert!(msg.contains("Not Found"), "{msg}");
    }

    #[tokio::test]
    async fn token_is_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/contents/a.py"))
            .and(header("authorization", "Bearer ghp_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": b64("x = 1\n"),
                "encoding": "base64"
            })))
            .mount(&server)
            .await;

        let gh = GitHubClient::new(GitHubConfig {
            api_base: server.uri(),
            token: Some("ghp_test".into()),
        })
        .unwrap();
        assert_eq!(gh.fetch_content(&acme(), "a.py").await.unwrap(), "x = 1\n");
    }

    #[tokio::test]
    async fn content_with_line_breaks_decodes() {
        let server = MockServer::start().await;
        let text = "fn main() {\n    println!(\"hello\");\n}\n".repeat(4);
        let encoded = b64(&text);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(60)
            .map(|c| format!("{}\n", String::from_utf8_lossy(c)))
            .collect();
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/contents/src/main.rs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": wrapped,
                "encoding": "base64"
            })))
            .mount(&server)
            .await;

        let out = client(&server)
            .fetch_content(&acme(), "src/main.rs")
            .await
            .unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn decode_rejects_bad_payloads() {
        let not_b64 = ContentResponse {
            content: "abc".into(),
            encoding: "none".into(),
        };
        let invalid_utf8 = ContentResponse {
            content: STANDARD.encode([0xff, 0xfe, 0x00]),
            encoding: "base64".into(),
        };
        let garbage = ContentResponse {
            content: "@@@".into(),
            encoding: "base64".into(),
        };
        for body in [not_b64, invalid_utf8, garbage] {
            let err = decode_content("x.rs", &body).unwrap_err();
            assert!(
                matches!(&err, IntakeError::DecodeFailed { path, .. } if path == "x.rs"),
                "{err}"
            );
        }
    }

    #[tokio::test]
    async fn fetch_all_keeps_listing_order() {
        let server = MockServer::start().await;
        mount_content(&server, "a.py", "a").await;
        mount_content(&server, "b.py", "b").await;
        mount_content(&server, "c.py", "c").await;

        let files = vec![remote("c.py"), remote("a.py"), remote("b.py")];
        let out = client(&server).fetch_all(&acme(), &files).await.unwrap();
        let got: Vec<(&str, &str)> = out
            .iter()
            .map(|f| (f.path.as_str(), f.content.as_str()))
            .collect();
        assert_eq!(got, vec![("c.py", "c"), ("a.py", "a"), ("b.py", "b")]);
    }

    #[tokio::test]
    async fn fetch_all_fails_as_a_whole() {
        let server = MockServer::start().await;
        mount_content(&server, "a.py", "a").await;
        mount_content(&server, "c.py", "c").await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/contents/b.py"))
            .respond_with(ResponseTemplate::new(403).set_body_string("rate limit exceeded"))
            .mount(&server)
            .await;

        let files = vec![remote("a.py"), remote("b.py"), remote("c.py")];
        let err = client(&server).fetch_all(&acme(), &files).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }
}
