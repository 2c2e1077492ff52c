//! Directory grants.
//!
//! A picker produces the directory the scanner is allowed to walk. The
//! server-side picker grants directories below a configured workspace root;
//! a request that names no directory is treated as a dismissed picker.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{IntakeError, IntakeResult};
use crate::local::walker::{DirectoryHandle, FsDirectory};

/// Result of asking for a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome<D> {
    Granted(D),
    /// The user backed out; not an error.
    Dismissed,
}

/// Source of directory grants.
pub trait DirectoryPicker: Send + Sync {
    type Handle: DirectoryHandle;

    /// # Errors
    /// [`IntakeError::UnsupportedPlatform`] when directory access is unavailable,
    /// [`IntakeError::AccessDenied`] when the directory may not be opened.
    fn pick(&self) -> impl Future<Output = IntakeResult<PickOutcome<Self::Handle>>> + Send;
}

/// Grants directories below `root` (`LOCAL_WORKSPACE_ROOT`).
#[derive(Debug, Clone, Default)]
pub struct WorkspaceRoot {
    root: Option<PathBuf>,
}

impl WorkspaceRoot {
    /// `None` disables local directory access.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Picker for one request; `requested` is relative to the root (or absolute inside it).
    pub fn picker(&self, requested: Option<&str>) -> WorkspacePicker {
        WorkspacePicker {
            root: self.root.clone(),
            requested: requested
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Opens `requested` directly; used when the caller already holds a grant.
    pub async fn open(&self, requested: &str) -> IntakeResult<FsDirectory> {
        let root = self.root.as_deref().ok_or_else(disabled)?;
        grant(root, requested).await
    }
}

/// One pending directory request.
#[derive(Debug, Clone)]
pub struct WorkspacePicker {
    root: Option<PathBuf>,
    requested: Option<String>,
}

impl DirectoryPicker for WorkspacePicker {
    type Handle = FsDirectory;

    async fn pick(&self) -> IntakeResult<PickOutcome<FsDirectory>> {
        let root = self.root.as_deref().ok_or_else(disabled)?;
        let Some(requested) = self.requested.as_deref() else {
            debug!("no directory requested; treating as dismissed");
            return Ok(PickOutcome::Dismissed);
        };
        grant(root, requested).await.map(PickOutcome::Granted)
    }
}

fn disabled() -> IntakeError {
    IntakeError::UnsupportedPlatform("LOCAL_WORKSPACE_ROOT is not configured".into())
}

async fn grant(root: &Path, requested: &str) -> IntakeResult<FsDirectory> {
    let denied = |reason: &str| IntakeError::AccessDenied {
        path: requested.to_string(),
        reason: reason.to_string(),
    };

    let root = tokio::fs::canonicalize(root)
        .await
        .map_err(|_| denied("workspace root is not accessible"))?;
    let target = tokio::fs::canonicalize(root.join(requested))
        .await
        .map_err(|_| denied("directory does not exist"))?;

    if !target.starts_with(&root) {
        return Err(denied("directory is outside the workspace root"));
    }
    let meta = tokio::fs::metadata(&target)
        .await
        .map_err(|_| denied("directory is not readable"))?;
    if !meta.is_dir() {
        return Err(denied("not a directory"));
    }

    info!(directory = %target.display(), "directory access granted");
    Ok(FsDirectory::new(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_root_is_unsupported() {
        let err = WorkspaceRoot::new(None)
            .picker(Some("x"))
            .pick()
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedPlatform(_)));
    }

    #[tokio::test]
    async fn missing_request_is_dismissed() {
        let tmp = tempfile::tempdir().unwrap();
        let root = WorkspaceRoot::new(Some(tmp.path().to_path_buf()));
        assert_eq!(root.picker(None).pick().await.unwrap(), PickOutcome::Dismissed);
        assert_eq!(
            root.picker(Some("   ")).pick().await.unwrap(),
            PickOutcome::Dismissed
        );
    }

    #[tokio::test]
    async fn grants_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("proj")).unwrap();
        let root = WorkspaceRoot::new(Some(tmp.path().to_path_buf()));

        match root.picker(Some("proj")).pick().await.unwrap() {
            PickOutcome::Granted(dir) => assert_eq!(dir.name(), "proj"),
            PickOutcome::Dismissed => panic!("expected a grant"),
        }
    }

    #[tokio::test]
    async fn denies_escape_and_files() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::create_dir(outer.path().join("ws")).unwrap();
        std::fs::create_dir(outer.path().join("other")).unwrap();
        std::fs::write(outer.path().join("ws").join("f.txt"), "x").unwrap();
        let root = WorkspaceRoot::new(Some(outer.path().join("ws")));

        for requested in ["../other", "f.txt", "missing"] {
            let err = root.picker(Some(requested)).pick().await.unwrap_err();
            assert!(
                matches!(err, IntakeError::AccessDenied { .. }),
                "{requested}: {err}"
            );
        }
    }
}
