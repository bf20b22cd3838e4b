//! Synchronous key-value persistence contract.

use std::sync::Arc;
use thiserror::Error;

/// Result type for storage substrate operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string key-value persistence surface.
///
/// Individual `get` and `set` calls are atomic; read-modify-write
/// sequences spanning several keys must be serialised by the caller (see
/// [`crate::storage::CollectionStore::exclusive`]).
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the underlying store fails.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the underlying store fails.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Errors returned by the persistence substrate.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backing store failed.
    #[error("storage backend failure: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),

    /// A stored collection payload could not be decoded.
    #[error("malformed payload under '{key}': {source}")]
    Corrupt {
        /// Collection key holding the malformed payload.
        key: String,
        /// Decoding failure reported by the JSON codec.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

impl StorageError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Wraps a JSON codec error for the given collection key.
    #[must_use]
    pub fn corrupt(key: &str, source: serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.to_owned(),
            source: Arc::new(source),
        }
    }
}
