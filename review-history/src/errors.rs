use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures of the backing key-value store. Logged by the cache, never surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}
