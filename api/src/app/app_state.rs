use std::net::SocketAddr;
use std::path::PathBuf;

use ai_llm_service::{AiLlmError, LlmModelConfig, LlmService, config_from_lookup};
use code_reviewer::{ReviewContext, Reviewer};
use repo_intake::local::{ScanConfig, WorkspaceRoot};
use repo_intake::{DEFAULT_GITHUB_API, GitHubClient, GitHubConfig, IntakeError};
use review_history::{DEFAULT_HISTORY_DIR, FileStore, HistoryCache};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error(transparent)]
    Intake(#[from] IntakeError),
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_address: SocketAddr,
    pub llm: LlmModelConfig,
    pub github: GitHubConfig,
    pub history_dir: PathBuf,
    pub workspace_root: Option<PathBuf>,
    pub scan: ScanConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_address = var("API_ADDRESS")
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.into())
            .parse()
            .map_err(|e| ConfigError::InvalidVar {
                var: "API_ADDRESS",
                reason: format!("expected host:port ({e})"),
            })?;

        let api_base = var("GITHUB_API_BASE").unwrap_or_else(|| DEFAULT_GITHUB_API.into());
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidVar {
                var: "GITHUB_API_BASE",
                reason: "must start with http:// or https://".into(),
            });
        }

        Ok(Self {
            api_address,
            llm: config_from_lookup(&lookup)?,
            github: GitHubConfig {
                api_base,
                token: var("GITHUB_TOKEN"),
            },
            history_dir: var("HISTORY_DIR")
                .unwrap_or_else(|| DEFAULT_HISTORY_DIR.into())
                .into(),
            workspace_root: var("LOCAL_WORKSPACE_ROOT").map(PathBuf::from),
            scan: var("SCAN_EXCLUDED_DIRS")
                .map(|csv| ScanConfig::from_csv(&csv))
                .unwrap_or_default(),
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub ctx: ReviewContext<LlmService, FileStore>,
    pub workspace: WorkspaceRoot,
}

impl AppState {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(AppConfig::from_env()?)
    }

    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        let llm = LlmService::new(config.llm.clone())?;
        let github = GitHubClient::new(config.github.clone())?;
        let history = HistoryCache::new(FileStore::new(&config.history_dir));
        let workspace = WorkspaceRoot::new(config.workspace_root.clone());

        info!(
            provider = %config.llm.provider,
            model = %config.llm.model,
            github = %config.github.api_base,
            history_dir = %config.history_dir.display(),
            local_access = workspace.is_enabled(),
            "application state initialised"
        );

        Ok(Self {
            ctx: ReviewContext::new(Reviewer::new(llm), github, history),
            workspace,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply() {
        let cfg = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(cfg.api_address.to_string(), DEFAULT_API_ADDRESS);
        assert_eq!(cfg.github.api_base, DEFAULT_GITHUB_API);
        assert_eq!(cfg.github.token, None);
        assert_eq!(cfg.history_dir, PathBuf::from(DEFAULT_HISTORY_DIR));
        assert_eq!(cfg.workspace_root, None);
        assert_eq!(cfg.scan, ScanConfig::default());
    }

    #[test]
    fn overrides_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("API_ADDRESS", "0.0.0.0:9000"),
            ("GITHUB_TOKEN", " ghp "),
            ("LOCAL_WORKSPACE_ROOT", "/srv/code"),
            ("SCAN_EXCLUDED_DIRS", "target,vendor"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_address.port(), 9000);
        assert_eq!(cfg.github.token.as_deref(), Some("ghp"));
        assert_eq!(cfg.workspace_root, Some(PathBuf::from("/srv/code")));
        assert!(cfg.scan.excluded_dirs.contains("vendor"));
        assert!(!cfg.scan.excluded_dirs.contains("node_modules"));
    }

    #[test]
    fn bad_address_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("API_ADDRESS", "localhost"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "API_ADDRESS", .. }));
    }

    #[test]
    fn missing_llm_key_is_a_config_error() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Llm(_)));
    }
}
