//! Storage backend abstraction for `Leadgate`.
//!
//! This crate defines the [`StorageBackend`] trait, a string-valued key-value
//! interface modelled on the browser's local storage: flat string keys, string
//! values, overwrite-on-put. The session gate and the lead store in
//! `leadgate-core` are constructed over a backend instead of reaching for
//! ambient global state, so tests can substitute an in-memory implementation.
//!
//! Two implementations are provided:
//!
//! - [`RedbBackend`] — persistent single-file store, backed by redb
//!   (feature `redb-backend`, on by default)
//! - [`MemoryBackend`] — in-memory, for testing and ephemeral use

mod error;
mod memory;
#[cfg(feature = "redb-backend")]
mod redb_backend;

pub use error::StorageError;
pub use memory::MemoryBackend;
#[cfg(feature = "redb-backend")]
pub use redb_backend::RedbBackend;

/// A pluggable string-valued key-value storage backend.
///
/// Keys are flat UTF-8 strings (e.g. `leads`, `authenticated-session-flag`)
/// and values are UTF-8 strings, typically JSON documents or literal
/// sentinels. There is no directory structure and no listing; callers own a
/// fixed, known set of keys.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a key-value pair, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. This is idempotent — deleting a non-existent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Delete`] if the underlying backend fails.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
