//! In-memory key-value store for tests.

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| StorageError::backend(std::io::Error::other(err.to_string())))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| StorageError::backend(std::io::Error::other(err.to_string())))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
