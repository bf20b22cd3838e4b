//! Directory-backed key-value store.
//!
//! Persists each key as one file inside a capability-scoped directory.
//! Writes go through a temporary file followed by a rename so a crashed
//! write never leaves a torn value behind.

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

/// Key-value store persisting each key as a file under one directory.
#[derive(Debug)]
pub struct DirKeyValueStore {
    root: Dir,
}

impl DirKeyValueStore {
    /// Opens a store rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be
    /// opened.
    pub fn open_ambient(root: impl AsRef<Utf8Path>) -> StorageResult<Self> {
        let dir = Dir::open_ambient_dir(root.as_ref(), ambient_authority())
            .map_err(StorageError::backend)?;
        Ok(Self { root: dir })
    }
}

impl KeyValueStore for DirKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.root.read_to_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::backend(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let staged = format!("{key}.tmp");
        self.root
            .write(&staged, value)
            .map_err(StorageError::backend)?;
        self.root
            .rename(&staged, &self.root, key)
            .map_err(StorageError::backend)
    }
}
