//! In-memory storage backend for testing.
//!
//! This backend stores all data in a `BTreeMap` behind a `RwLock`. It is not
//! persistent — all data is lost when the process exits. Use this for unit
//! tests and integration tests where you need a real storage backend without
//! touching disk.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{StorageBackend, StorageError};

/// An in-memory storage backend backed by a `BTreeMap`.
///
/// Thread-safe and async-compatible. Cloning is cheap and clones share the
/// same underlying map, which mirrors how every component of a page sees the
/// same local storage.
///
/// # Examples
///
/// ```
/// # use leadgate_storage::{MemoryBackend, StorageBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.put("leads", "[]").await.unwrap();
/// let val = backend.get("leads").await.unwrap();
/// assert_eq!(val, Some("[]".to_owned()));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    data: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let backend = MemoryBackend::new();
        let result = backend.get("does-not-exist").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn put_and_get_roundtrip() {
        let backend = MemoryBackend::new();
        backend.put("leads", "[1,2]").await.unwrap();
        let val = backend.get("leads").await.unwrap();
        assert_eq!(val, Some("[1,2]".to_owned()));
    }

    #[tokio::test]
    async fn put_overwrites_existing() {
        let backend = MemoryBackend::new();
        backend.put("key", "v1").await.unwrap();
        backend.put("key", "v2").await.unwrap();
        let val = backend.get("key").await.unwrap();
        assert_eq!(val, Some("v2".to_owned()));
    }

    #[tokio::test]
    async fn delete_existing_key() {
        let backend = MemoryBackend::new();
        backend.put("key", "val").await.unwrap();
        backend.delete("key").await.unwrap();
        let val = backend.get("key").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn delete_nonexistent_is_noop() {
        let backend = MemoryBackend::new();
        // Should not error.
        backend.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        backend.put("key", "val").await.unwrap();
        let val = clone.get("key").await.unwrap();
        assert_eq!(val, Some("val".to_owned()));
    }
}
