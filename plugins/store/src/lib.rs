//! File-backed storage for the shopping list
//!
//! Persists blobs as entries of JSON group files in the per-application
//! config directory.
//!
//! # Features
//!
//! - [`FileBlobStore`], a [`BlobStore`](shopping_list::BlobStore) for
//!   [`PersistenceBridge`](shopping_list::PersistenceBridge)
//! - Group-based organization, one `<group>.json` file per group
//! - Platform storage directories derived from an [`AppName`]
//! - A standalone helper for reading typed values back
//!
//! # Example
//!
//! ```ignore
//! use shopping_list::{ItemStore, PersistenceBridge};
//! use shopping_list_store::{AppName, FileBlobStore};
//!
//! let app_name = AppName::new("com", "example", "groceries");
//! let bridge = PersistenceBridge::new(FileBlobStore::new(&app_name));
//!
//! let mut store = ItemStore::new();
//! bridge.load(&mut store).await?;
//! ```

mod app_name;
mod file;
mod helpers;
mod storage;

pub use app_name::AppName;
pub use file::{DEFAULT_GROUP, FileBlobStore};
pub use helpers::read_value;
pub use storage::{Group, group_path, load_group, modify_group, save_group, storage_dir};
