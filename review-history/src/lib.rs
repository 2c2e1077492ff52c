//! Review history: a capped, newest-first list of completed reviews kept in
//! a key-value store owned by this application.

pub mod cache;
pub mod errors;
pub mod item;
pub mod store;

pub use cache::{HISTORY_KEY, HistoryCache, MAX_HISTORY_ITEMS};
pub use errors::{StoreError, StoreResult};
pub use item::{HistoryItem, ReviewKind};
pub use store::{DEFAULT_HISTORY_DIR, FileStore, KeyValueStore, MemoryStore};
