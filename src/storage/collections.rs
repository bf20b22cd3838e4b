//! Typed access to the JSON collections held in a key-value store.

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Mutex, MutexGuard};

/// Flag value written once first-run seeding has completed.
const FLAG_SET: &str = "true";

/// Typed gateway over a [`KeyValueStore`].
///
/// Each collection is persisted as one JSON array under its key. The
/// gateway also owns the exclusive section that repository adapters hold
/// while a lifecycle commit touches several collections, so the task
/// write and the balance writes it entails land as one unit.
#[derive(Debug)]
pub struct CollectionStore<S> {
    store: S,
    guard: Mutex<()>,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Wraps a key-value store.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            guard: Mutex::new(()),
        }
    }

    /// Acquires the store-wide exclusive section.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the guard is poisoned.
    pub fn exclusive(&self) -> StorageResult<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|err| StorageError::backend(std::io::Error::other(err.to_string())))
    }

    /// Loads every record of a collection, or an empty list when the key
    /// has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] when the stored payload cannot
    /// be decoded, or [`StorageError::Backend`] when the store fails.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        self.store.get(key)?.map_or_else(
            || Ok(Vec::new()),
            |raw| serde_json::from_str(&raw).map_err(|err| StorageError::corrupt(key, err)),
        )
    }

    /// Replaces a collection with the given records.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] when the records cannot be
    /// encoded, or [`StorageError::Backend`] when the store fails.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> StorageResult<()> {
        let raw =
            serde_json::to_string(records).map_err(|err| StorageError::corrupt(key, err))?;
        self.store.set(key, &raw)
    }

    /// Returns whether the given flag key has been set.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the store fails.
    pub fn flag(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .store
            .get(key)?
            .is_some_and(|value| value == FLAG_SET))
    }

    /// Sets the given flag key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the store fails.
    pub fn set_flag(&self, key: &str) -> StorageResult<()> {
        self.store.set(key, FLAG_SET)
    }
}
