//! Application-side pairing of an [`ItemStore`] with its [`PersistenceBridge`]

use crate::error::Result;
use crate::messages::{ShoppingInput, ShoppingOutput};
use crate::persistence::{LoadOutcome, PersistenceBridge};
use crate::store::ItemStore;
use tracing::warn;

/// An item store loaded from storage, plus whether it has unsaved changes
///
/// Mutating and saving stay two separate calls. A failed save keeps the
/// in-memory changes and leaves the session dirty so the next save retries.
///
/// # Example
///
/// ```ignore
/// use shopping_list::{MemoryBlobStore, PersistenceBridge, ShoppingInput, ShoppingSession};
///
/// let bridge = PersistenceBridge::new(MemoryBlobStore::new());
/// let (mut session, _) = ShoppingSession::open(bridge).await?;
/// session.apply(ShoppingInput::add("Milk", 1, "Dairy"));
/// session.save().await?;
/// ```
#[derive(Debug)]
pub struct ShoppingSession {
    store: ItemStore,
    bridge: PersistenceBridge,
    dirty: bool,
}

impl ShoppingSession {
    /// Load the saved list into a fresh store
    ///
    /// # Errors
    ///
    /// Returns an error if the blob store cannot be read. A missing or
    /// unreadable list is not an error, see [`LoadOutcome`].
    pub async fn open(bridge: PersistenceBridge) -> Result<(Self, LoadOutcome)> {
        Self::open_with(bridge, ItemStore::new()).await
    }

    /// Load the saved list into the given store
    ///
    /// # Errors
    ///
    /// Returns an error if the blob store cannot be read.
    pub async fn open_with(
        bridge: PersistenceBridge,
        mut store: ItemStore,
    ) -> Result<(Self, LoadOutcome)> {
        let outcome = bridge.load(&mut store).await?;
        let session = Self {
            store,
            bridge,
            dirty: false,
        };
        Ok((session, outcome))
    }

    /// Apply an intent to the store, marking the session dirty if it changed
    pub fn apply(&mut self, input: ShoppingInput) -> Option<ShoppingOutput> {
        let output = self.store.apply(input);
        if output.is_some() {
            self.dirty = true;
        }
        output
    }

    /// Persist the current snapshot
    pub async fn save(&mut self) -> Result<()> {
        match self.bridge.save(self.store.items()).await {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save shopping list, keeping unsaved changes");
                Err(e)
            }
        }
    }

    /// Persist only when something changed since the last successful save
    ///
    /// Returns whether a save happened.
    pub async fn save_if_dirty(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }
}
