//! Saving and restoring the shopping list through a [`BlobStore`]
//!
//! The whole list is written as one JSON array under [`STORAGE_KEY`]. Nothing
//! here runs by itself: the application calls [`PersistenceBridge::save`]
//! after mutating the store and [`PersistenceBridge::load`] once at startup.
//!
//! Overlapping saves are not sequenced, the last one to complete wins.

use crate::blob::BlobStore;
use crate::error::{PersistenceError, Result};
use crate::item::ShoppingItem;
use crate::store::ItemStore;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key the shopping list is stored under
pub const STORAGE_KEY: &str = "SHOPPING_ITEMS";

/// How [`PersistenceBridge::load`] populated the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved list with this many items was restored
    Restored(usize),
    /// Some saved items were unreadable and dropped, the rest were restored
    Partial { restored: usize, skipped: usize },
    /// Nothing was saved yet, the store starts empty
    FirstRun,
    /// The saved list could not be parsed and was discarded
    Corrupted(String),
}

/// Moves item snapshots between an [`ItemStore`] and a [`BlobStore`]
#[derive(Clone)]
pub struct PersistenceBridge {
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersistenceBridge {{ key: {} }}", STORAGE_KEY)
    }
}

impl PersistenceBridge {
    /// Create a bridge over a blob store
    ///
    /// # Example
    ///
    /// ```
    /// use shopping_list::{MemoryBlobStore, PersistenceBridge};
    ///
    /// let bridge = PersistenceBridge::new(MemoryBlobStore::new());
    /// ```
    pub fn new(blobs: impl BlobStore + 'static) -> Self {
        Self {
            blobs: Arc::new(blobs),
        }
    }

    /// Create a bridge over a blob store that is shared with other users
    pub fn from_shared(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Write the full collection, replacing whatever was stored before
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be serialized or the blob store
    /// rejects the write. The in-memory store is not affected either way.
    pub async fn save(&self, items: &[ShoppingItem]) -> Result<()> {
        let document = serde_json::to_string(items).map_err(PersistenceError::Encode)?;
        self.blobs.set(STORAGE_KEY, document).await?;
        debug!(count = items.len(), "saved shopping items");
        Ok(())
    }

    /// Read and parse the stored collection without touching any store
    ///
    /// Returns `Ok(None)` when nothing (or only whitespace) is stored.
    /// Items are read one by one; an entry that cannot be read even
    /// leniently (see [`ShoppingItem`]) is dropped with a warning. Per-item
    /// invariants are not checked beyond that.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Storage`] if the blob store cannot be read
    /// and [`PersistenceError::Corrupt`] if the stored document is not a
    /// JSON array.
    pub async fn read_items(&self) -> Result<Option<Vec<ShoppingItem>>> {
        Ok(self.read_document().await?.map(|(items, _)| items))
    }

    async fn read_document(&self) -> Result<Option<(Vec<ShoppingItem>, usize)>> {
        let document = match self.blobs.get(STORAGE_KEY).await? {
            Some(document) if !document.trim().is_empty() => document,
            _ => return Ok(None),
        };

        parse_items(&document).map(Some)
    }

    /// Hydrate `store` from storage through [`ItemStore::set_items`]
    ///
    /// A missing list starts the store empty. A document that is not a list
    /// also starts it empty and is reported as [`LoadOutcome::Corrupted`].
    /// Unreadable entries inside a list only drop themselves.
    ///
    /// # Errors
    ///
    /// Returns an error only if the blob store itself fails, in which case
    /// `store` is left as it was.
    pub async fn load(&self, store: &mut ItemStore) -> Result<LoadOutcome> {
        match self.read_document().await {
            Ok(Some((items, skipped))) => {
                let restored = items.len();
                store.set_items(items);
                debug!(restored, skipped, "restored shopping items");
                if skipped == 0 {
                    Ok(LoadOutcome::Restored(restored))
                } else {
                    Ok(LoadOutcome::Partial { restored, skipped })
                }
            }
            Ok(None) => {
                store.set_items(Vec::new());
                Ok(LoadOutcome::FirstRun)
            }
            Err(PersistenceError::Corrupt(e)) => {
                warn!(key = STORAGE_KEY, error = %e, "discarding corrupt shopping list");
                store.set_items(Vec::new());
                Ok(LoadOutcome::Corrupted(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

/// Parse the stored array entry by entry, returning the readable items and
/// the number of dropped ones
fn parse_items(document: &str) -> Result<(Vec<ShoppingItem>, usize)> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(document).map_err(PersistenceError::Corrupt)?;

    let mut items = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ShoppingItem>(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(index, error = %e, "dropping unreadable shopping item");
                skipped += 1;
            }
        }
    }
    Ok((items, skipped))
}
