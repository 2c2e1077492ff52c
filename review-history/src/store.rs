//! Key-value stores backing the history cache.
//!
//! Layout of [`FileStore`]: `<dir>/<key>.json`, one file per key.
//! Default dir: `code_data/history`.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{StoreError, StoreResult};

pub const DEFAULT_HISTORY_DIR: &str = "code_data/history";

/// String blobs addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        let ok = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !ok {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir).await?;
        // write-then-rename: readers never observe a partial blob;
        // one temp file per write so concurrent writers never share it
        let tmp = self
            .dir
            .join(format!("{key}.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, used in tests and when persistence is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}
