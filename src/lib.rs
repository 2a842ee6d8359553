//! Shopping list store
//!
//! An ordered, single-user shopping list with explicit JSON persistence.
//!
//! # Overview
//!
//! - [`ItemStore`] owns the items, newest first, and is the only way to
//!   change them. Bad input is coerced rather than rejected: a non-positive
//!   quantity becomes `1`, a blank name turns the add into a no-op.
//! - [`PersistenceBridge`] writes the whole list as one JSON array under
//!   [`STORAGE_KEY`] in a [`BlobStore`] and reads it back at startup.
//! - [`ShoppingSession`] pairs the two for applications and tracks unsaved
//!   changes.
//!
//! Saving is never automatic. The application mutates the store, then decides
//! when to save, so storage failures are visible where they happen.
//!
//! # Example
//!
//! ```ignore
//! use shopping_list::{ItemDraft, ItemStore, MemoryBlobStore, PersistenceBridge};
//!
//! let bridge = PersistenceBridge::new(MemoryBlobStore::new());
//! let mut store = ItemStore::new();
//! bridge.load(&mut store).await?;
//!
//! if let Some(id) = store.add(ItemDraft::new("Milk", 2).with_category("Dairy")) {
//!     store.toggle_purchased(&id);
//! }
//! bridge.save(store.items()).await?;
//!
//! println!("{}", store.summary()); // "1 of 1 purchased"
//! ```

mod blob;
mod error;
mod item;
pub mod logging;
mod messages;
mod persistence;
mod session;
mod store;

pub use blob::{BlobStore, MemoryBlobStore};
pub use error::{BlobError, PersistenceError, Result};
pub use item::{
    DEFAULT_CATEGORY, ItemDraft, ItemId, ItemState, ShoppingItem, normalize_name,
    normalize_quantity, parse_quantity,
};
pub use messages::{ShoppingInput, ShoppingOutput};
pub use persistence::{LoadOutcome, PersistenceBridge, STORAGE_KEY};
pub use session::ShoppingSession;
pub use store::{IdGenerator, ItemStore, PurchaseSummary, UuidGenerator};
