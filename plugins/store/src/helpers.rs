//! Standalone helper for typed values in group files
//!
//! Reads a JSON-encoded value directly, without going through a
//! [`PersistenceBridge`](shopping_list::PersistenceBridge). Useful for
//! inspecting what an application has stored.

use crate::storage::{group_path, load_group};
use serde::de::DeserializeOwned;
use shopping_list::BlobError;
use std::path::Path;

/// Read and deserialize a value
///
/// Returns `Ok(None)` if the key is not present.
///
/// # Errors
///
/// Returns an error if the group cannot be loaded or the value does not
/// deserialize into `T`.
///
/// # Example
///
/// ```ignore
/// use shopping_list::{STORAGE_KEY, ShoppingItem};
/// use shopping_list_store::{AppName, read_value};
///
/// let dir = AppName::new("com", "example", "groceries").storage_dir();
/// let items: Option<Vec<ShoppingItem>> = read_value(&dir, "shopping", STORAGE_KEY).await?;
/// ```
pub async fn read_value<T>(dir: &Path, group: &str, key: &str) -> Result<Option<T>, BlobError>
where
    T: DeserializeOwned,
{
    let path = group_path(dir, group);
    let data = load_group(&path).await?;

    let Some(value) = data.get(key) else {
        return Ok(None);
    };

    serde_json::from_str(value)
        .map(Some)
        .map_err(|source| BlobError::Format { path, source })
}
