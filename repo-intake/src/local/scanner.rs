use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info, instrument};

use crate::errors::{IntakeError, IntakeResult};
use crate::language::classify;
use crate::local::picker::{DirectoryPicker, PickOutcome};
use crate::local::walker::{DirectoryHandle, Entry};
use crate::types::{CodeFile, FileContent, FileOrigin};

pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", ".git", "build"];

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory names never descended into, at any depth.
    pub excluded_dirs: HashSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Parses a comma-separated list (`SCAN_EXCLUDED_DIRS`); blanks are ignored.
    pub fn from_csv(csv: &str) -> Self {
        Self {
            excluded_dirs: csv
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn keep_dir(&self, name: &str) -> bool {
        !self.excluded_dirs.contains(name)
    }
}

/// Asks `picker` for a directory and lists every recognised source file in it.
///
/// A dismissed picker yields an empty list.
pub async fn scan<P: DirectoryPicker>(picker: &P, config: &ScanConfig) -> IntakeResult<Vec<CodeFile>> {
    match picker.pick().await? {
        PickOutcome::Dismissed => {
            info!("directory picker dismissed");
            Ok(Vec::new())
        }
        PickOutcome::Granted(dir) => scan_directory(&dir, config).await,
    }
}

/// Recursively lists recognised source files below `dir`.
///
/// Paths are relative to `dir` and slash-separated; content stays unloaded.
#[instrument(skip_all, fields(dir = dir.name()))]
pub async fn scan_directory<D: DirectoryHandle>(
    dir: &D,
    config: &ScanConfig,
) -> IntakeResult<Vec<CodeFile>> {
    let files = walk(dir, String::new(), config).await?;
    info!(files = files.len(), "scan completed");
    Ok(files)
}

fn walk<'a, D: DirectoryHandle>(
    dir: &'a D,
    prefix: String,
    config: &'a ScanConfig,
) -> Pin<Box<dyn Future<Output = IntakeResult<Vec<CodeFile>>> + Send + 'a>> {
    Box::pin(async move {
        let mut files = Vec::new();
        for entry in dir.entries().await? {
            match entry {
                Entry::File { name, handle } => {
                    let Some(language) = classify(&name) else {
                        continue;
                    };
                    files.push(CodeFile {
                        path: format!("{prefix}{name}"),
                        language,
                        content: FileContent::Unloaded,
                        origin: FileOrigin::Local(handle),
                    });
                }
                Entry::Directory(sub) => {
                    if !config.keep_dir(sub.name()) {
                        debug!(dir = sub.name(), "skipping excluded directory");
                        continue;
                    }
                    let nested = format!("{prefix}{}/", sub.name());
                    files.extend(walk(&sub, nested, config).await?);
                }
            }
        }
        Ok(files)
    })
}

/// Returns the text of a file: content already loaded is returned as is,
/// otherwise the local file is read. Nothing is cached.
///
/// # Errors
/// - [`IntakeError::NotLocal`] for files without a local handle
/// - [`IntakeError::LocalReadFailed`] when the read fails (including non-UTF-8 data)
pub async fn read_content(file: &CodeFile) -> IntakeResult<String> {
    if let Some(text) = file.content.as_loaded() {
        return Ok(text.to_string());
    }
    let FileOrigin::Local(handle) = &file.origin else {
        return Err(IntakeError::NotLocal {
            path: file.path.clone(),
        });
    };
    tokio::fs::read_to_string(handle)
        .await
        .map_err(|cause| IntakeError::LocalReadFailed {
            path: handle.clone(),
            cause,
        })
}
