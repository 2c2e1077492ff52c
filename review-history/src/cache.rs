//! Capped, newest-first history of completed reviews.
//!
//! The whole collection lives as one JSON array under [`HISTORY_KEY`].
//! Persistence problems never fail a review: reads degrade to an empty
//! history, writes are logged and dropped.

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::item::HistoryItem;
use crate::store::KeyValueStore;

pub const HISTORY_KEY: &str = "codeReviewHistory";
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Writers are serialized: `record` and `clear` hold `write_lock` across the
/// whole read-modify-write, so concurrent reviews never overwrite each other.
#[derive(Debug)]
pub struct HistoryCache<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> HistoryCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recorded items, newest first.
    ///
    /// A blob that does not parse is removed and treated as empty.
    pub async fn load(&self) -> Vec<HistoryItem> {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!(error = %e, "failed to read review history");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
            Ok(mut items) => {
                items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                items
            }
            Err(e) => {
                warn!(error = %e, "review history is corrupt; discarding it");
                if let Err(e) = self.store.remove(HISTORY_KEY).await {
                    error!(error = %e, "failed to remove corrupt review history");
                }
                Vec::new()
            }
        }
    }

    /// Prepends `item`, replacing any entry with the same id, and keeps the
    /// newest [`MAX_HISTORY_ITEMS`]. Returns the resulting history.
    pub async fn record(&self, item: HistoryItem) -> Vec<HistoryItem> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await;
        items.retain(|existing| existing.id != item.id);

        let id = item.id.clone();
        items.insert(0, item);
        items.truncate(MAX_HISTORY_ITEMS);

        match serde_json::to_string(&items) {
            Ok(blob) => match self.store.set(HISTORY_KEY, &blob).await {
                Ok(()) => debug!(%id, total = items.len(), "review recorded"),
                Err(e) => error!(%id, error = %e, "failed to persist review history"),
            },
            Err(e) => error!(%id, error = %e, "failed to serialize review history"),
        }
        items
    }

    /// Looks up one item by id.
    pub async fn get(&self, id: &str) -> Option<HistoryItem> {
        self.load().await.into_iter().find(|item| item.id == id)
    }

    /// Removes the whole history.
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        match self.store.remove(HISTORY_KEY).await {
            Ok(()) => info!("review history cleared"),
            Err(e) => error!(error = %e, "failed to clear review history"),
        }
    }
}
