//! Key-value blob storage the shopping list is persisted into

use crate::error::BlobError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Opaque string storage addressed by key
///
/// Writes fully overwrite the previous value. Durability and atomicity are
/// whatever the implementation provides.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever written
    async fn get(&self, key: &str) -> Result<Option<String>, BlobError>;

    /// Store `value` under `key`
    async fn set(&self, key: &str, value: String) -> Result<(), BlobError>;
}

/// Process-local blob store, mostly useful for tests and previews
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value before handing the store out
    ///
    /// The store is owned here, so a poisoned lock is recovered and the value
    /// is always inserted.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let entries = self.entries.lock()?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), BlobError> {
        let mut entries = self.entries.lock()?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
