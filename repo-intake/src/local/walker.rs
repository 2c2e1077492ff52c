//! Directory handles: the capability the scanner walks.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::errors::{IntakeError, IntakeResult};

/// One child of a directory.
#[derive(Debug, Clone)]
pub enum Entry<D> {
    /// A regular file; `handle` is what [`read_content`](super::read_content) opens.
    File { name: String, handle: PathBuf },
    Directory(D),
}

/// An opened directory whose entries can be listed asynchronously.
pub trait DirectoryHandle: Send + Sync + Sized {
    /// Last path component, used to build nested paths and apply exclusions.
    fn name(&self) -> &str;

    fn entries(&self) -> impl Future<Output = IntakeResult<Vec<Entry<Self>>>> + Send;
}

/// A directory on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsDirectory {
    path: PathBuf,
    name: String,
}

impl FsDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves a slash-separated path relative to this directory to the
    /// canonical path of an existing entry.
    ///
    /// Only plain components are accepted; `..`, root and prefix components
    /// are rejected. Symlinks are followed and the target must still lie
    /// inside this directory, so the result never leaves it.
    ///
    /// # Errors
    /// - [`IntakeError::AccessDenied`] for rejected components or a link that escapes
    /// - [`IntakeError::LocalReadFailed`] when the entry does not exist
    pub async fn resolve(&self, relative: &str) -> IntakeResult<PathBuf> {
        let denied = |reason: &str| IntakeError::AccessDenied {
            path: relative.to_string(),
            reason: reason.to_string(),
        };

        let rel = Path::new(relative.trim());
        let clean = !relative.trim().is_empty()
            && rel.components().all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(denied("path must be relative to the opened directory"));
        }

        let base = canonical(&self.path).await?;
        let target = canonical(&self.path.join(rel)).await?;
        if !target.starts_with(&base) {
            debug!(resolved = %target.display(), "resolved path leaves the directory");
            return Err(denied("path resolves outside the opened directory"));
        }
        Ok(target)
    }
}

async fn canonical(path: &Path) -> IntakeResult<PathBuf> {
    tokio::fs::canonicalize(path)
        .await
        .map_err(|cause| IntakeError::LocalReadFailed {
            path: path.to_path_buf(),
            cause,
        })
}

impl DirectoryHandle for FsDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entries(&self) -> IntakeResult<Vec<Entry<Self>>> {
        let read_failed = |cause| IntakeError::LocalReadFailed {
            path: self.path.clone(),
            cause,
        };

        let mut rd = tokio::fs::read_dir(&self.path).await.map_err(read_failed)?;
        let mut out = Vec::new();
        while let Some(entry) = rd.next_entry().await.map_err(read_failed)? {
            let file_type = match entry.file_type().await {
                Ok(t) => t,
                Err(err) => {
                    debug!(path = %entry.path().display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if file_type.is_dir() {
                out.push(Entry::Directory(FsDirectory {
                    path: entry.path(),
                    name,
                }));
            } else if file_type.is_file() {
                out.push(Entry::File {
                    name,
                    handle: entry.path(),
                });
            }
        }

        // read_dir order is platform-dependent
        out.sort_by(|a, b| entry_name(a).cmp(entry_name(b)));
        Ok(out)
    }
}

fn entry_name<D: DirectoryHandle>(e: &Entry<D>) -> &str {
    match e {
        Entry::File { name, .. } => name,
        Entry::Directory(d) => d.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_files_and_directories_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        std::fs::write(tmp.path().join("b.rs"), "fn b() {}").unwrap();
        std::fs::write(tmp.path().join("a.py"), "pass").unwrap();

        let dir = FsDirectory::new(tmp.path());
        let names: Vec<String> = dir
            .entries()
            .await
            .unwrap()
            .iter()
            .map(|e| entry_name(e).to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "b.rs", "src"]);
    }

    #[tokio::test]
    async fn resolve_rejects_escapes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        std::fs::write(tmp.path().join("src/main.rs"), "fn main() {}").unwrap();

        let dir = FsDirectory::new(tmp.path());
        assert_eq!(
            dir.resolve("src/main.rs").await.unwrap(),
            tmp.path().canonicalize().unwrap().join("src/main.rs")
        );
        for bad in ["../secret.txt", "/etc/passwd", "", "src/../../x"] {
            assert!(
                matches!(dir.resolve(bad).await, Err(IntakeError::AccessDenied { .. })),
                "{bad}"
            );
        }
        assert!(matches!(
            dir.resolve("missing.rs").await,
            Err(IntakeError::LocalReadFailed { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn resolve_refuses_symlinks_that_leave_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let proj = tmp.path().join("proj");
        std::fs::create_dir(&proj).unwrap();
        std::fs::write(tmp.path().join("secret.txt"), "TOP SECRET\n").unwrap();
        std::fs::write(proj.join("real.py"), "pass\n").unwrap();
        std::os::unix::fs::symlink("../secret.txt", proj.join("leak.py")).unwrap();
        std::os::unix::fs::symlink("real.py", proj.join("alias.py")).unwrap();

        let dir = FsDirectory::new(&proj);
        assert!(matches!(
            dir.resolve("leak.py").await,
            Err(IntakeError::AccessDenied { .. })
        ));
        assert_eq!(
            dir.resolve("alias.py").await.unwrap(),
            proj.canonicalize().unwrap().join("real.py")
        );
    }
}
