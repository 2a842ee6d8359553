//! [`BlobStore`] backed by a group file

use crate::app_name::AppName;
use crate::storage::{group_path, load_group, modify_group, storage_dir};
use async_trait::async_trait;
use shopping_list::{BlobError, BlobStore};
use std::path::{Path, PathBuf};

/// Group file used unless another one is configured
pub const DEFAULT_GROUP: &str = "shopping";

/// Stores every blob as a string entry of `<dir>/<group>.json`
///
/// Each write reads the group file, replaces one entry and writes the whole
/// file back, so other keys in the same group are preserved.
///
/// # Example
///
/// ```ignore
/// use shopping_list::PersistenceBridge;
/// use shopping_list_store::{AppName, FileBlobStore};
///
/// let blobs = FileBlobStore::new(&AppName::new("com", "example", "groceries"));
/// let bridge = PersistenceBridge::new(blobs);
/// ```
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
    group: String,
}

impl FileBlobStore {
    /// Store in the platform storage directory of the application
    pub fn new(app_name: &AppName) -> Self {
        Self::at(storage_dir(app_name))
    }

    /// Store in an explicit directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            group: DEFAULT_GROUP.to_string(),
        }
    }

    /// Use a different group file name
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the group file
    pub fn path(&self) -> PathBuf {
        group_path(&self.dir, &self.group)
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let mut data = load_group(&self.path()).await?;
        Ok(data.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BlobError> {
        let path = self.path();
        modify_group(&path, |data| {
            data.insert(key.to_string(), value);
            true
        })
        .await?;

        tracing::debug!(path = %path.display(), key, "wrote blob");
        Ok(())
    }
}
