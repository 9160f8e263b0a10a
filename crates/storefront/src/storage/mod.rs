//! Client-local persisted storage.
//!
//! A synchronous, string-keyed, string-valued store scoped to one client,
//! with no server-side component. The cart store reads one fixed key at
//! startup and rewrites it after every mutation.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - shared in-process map with an optional byte quota
//! - [`FileStorage`] - one JSON file per key under a directory
//!
//! All operations are best-effort from the caller's point of view: the cart
//! store logs and swallows every [`StorageError`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors that can occur when reading or writing client-local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the storage quota.
    #[error("quota exceeded writing {key} (limit {limit} bytes)")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Quota in bytes.
        limit: usize,
    },

    /// The backend can no longer be used.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Synchronous key-value storage, modelled on a browser's local storage.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails; the previous value is kept.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
