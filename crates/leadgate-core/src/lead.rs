//! Lead store for `Leadgate`.
//!
//! Contact submissions are kept as one JSON-serialized array under a single
//! storage key, the way a browser page keeps them in local storage. Every
//! write rewrites the whole collection; there is no per-record key and no
//! update-in-place operation.
//!
//! Reads are lenient: an absent key is an empty collection, and a stored
//! value that fails to parse is treated as empty with a logged warning. The
//! next successful `create` overwrites the corrupt value. Concurrent writers
//! interleave at whole-collection granularity (last writer wins) — the
//! accepted hazard of the storage model this mirrors.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use leadgate_storage::StorageBackend;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::LeadStoreError;
use crate::validate::LeadDraft;

/// Storage key holding the lead collection.
pub const LEADS_KEY: &str = "leads";

/// A stored contact submission.
///
/// `id` is unique within the collection and monotonically increasing,
/// derived from the creation time in milliseconds since the Unix epoch.
/// The collection preserves insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Record count and stored size of the collection, for dashboard display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    /// Number of parseable records.
    pub count: usize,
    /// Byte length of the stored JSON document (0 when the key is absent).
    pub stored_bytes: usize,
}

/// Manages the persisted lead collection.
///
/// The store performs no field validation — that belongs to the caller,
/// before [`create`](LeadStore::create) is invoked (see [`crate::validate`]).
#[derive(Clone)]
pub struct LeadStore {
    storage: Arc<dyn StorageBackend>,
}

impl LeadStore {
    /// Create a lead store over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Read the full collection in insertion order.
    ///
    /// Returns an empty vector when the key is absent or when the stored
    /// value fails to parse as JSON (logged as a warning — corrupt data
    /// never surfaces as an error).
    ///
    /// # Errors
    ///
    /// Returns [`LeadStoreError::Storage`] if the storage read itself fails.
    pub async fn list(&self) -> Result<Vec<Lead>, LeadStoreError> {
        let Some(raw) = self.storage.get(LEADS_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(leads) => Ok(leads),
            Err(e) => {
                warn!(error = %e, "stored lead collection is not valid JSON, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Append a new lead and return it.
    ///
    /// The id is the current time in milliseconds, bumped past the largest
    /// stored id when the clock has not advanced beyond it, so ids stay
    /// unique and monotonic even for same-millisecond calls or a stored
    /// collection whose ids are out of order. Saturates at `i64::MAX`.
    ///
    /// Field values are stored exactly as submitted — validate first.
    ///
    /// # Errors
    ///
    /// - [`LeadStoreError::Serialization`] if the collection cannot be
    ///   re-serialized.
    /// - [`LeadStoreError::Storage`] if the write fails.
    pub async fn create(&self, draft: &LeadDraft) -> Result<Lead, LeadStoreError> {
        let mut leads = self.list().await?;

        let now = Utc::now();
        let mut id = now.timestamp_millis();
        if let Some(max_id) = leads.iter().map(|lead| lead.id).max() {
            if id <= max_id {
                id = max_id.saturating_add(1);
            }
        }

        let lead = Lead {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            message: draft.message.clone(),
            created_at: now,
        };
        leads.push(lead.clone());
        self.write_collection(&leads).await?;

        info!(id = lead.id, total = leads.len(), "lead created");
        Ok(lead)
    }

    /// Remove the lead with the given id, preserving the order of the rest.
    ///
    /// No-op when the id is absent.
    ///
    /// # Errors
    ///
    /// - [`LeadStoreError::Serialization`] if the collection cannot be
    ///   re-serialized.
    /// - [`LeadStoreError::Storage`] if the rewrite fails.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), LeadStoreError> {
        let mut leads = self.list().await?;
        let before = leads.len();
        leads.retain(|lead| lead.id != id);
        if leads.len() == before {
            return Ok(());
        }
        self.write_collection(&leads).await?;

        info!(id, remaining = leads.len(), "lead deleted");
        Ok(())
    }

    /// Remove the whole collection by deleting its storage key. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`LeadStoreError::Storage`] if the delete fails.
    pub async fn clear_all(&self) -> Result<(), LeadStoreError> {
        self.storage.delete(LEADS_KEY).await?;
        info!("lead collection cleared");
        Ok(())
    }

    /// Report the record count and the stored document size.
    ///
    /// Uses the same lenient read as [`list`](LeadStore::list): a corrupt
    /// value counts zero records but still reports its stored size.
    ///
    /// # Errors
    ///
    /// Returns [`LeadStoreError::Storage`] if the storage read fails.
    pub async fn stats(&self) -> Result<LeadStats, LeadStoreError> {
        let Some(raw) = self.storage.get(LEADS_KEY).await? else {
            return Ok(LeadStats {
                count: 0,
                stored_bytes: 0,
            });
        };
        let count = match serde_json::from_str::<Vec<Lead>>(&raw) {
            Ok(leads) => leads.len(),
            Err(e) => {
                warn!(error = %e, "stored lead collection is not valid JSON, counting zero records");
                0
            }
        };
        Ok(LeadStats {
            count,
            stored_bytes: raw.len(),
        })
    }

    async fn write_collection(&self, leads: &[Lead]) -> Result<(), LeadStoreError> {
        let raw = serde_json::to_string(leads).map_err(|e| LeadStoreError::Serialization {
            reason: e.to_string(),
        })?;
        self.storage.put(LEADS_KEY, &raw).await?;
        Ok(())
    }
}

impl std::fmt::Debug for LeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use leadgate_storage::{MemoryBackend, StorageError};

    fn make_store() -> (LeadStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let store = LeadStore::new(Arc::new(backend.clone()));
        (store, backend)
    }

    fn draft(name: &str, email: &str, message: &str) -> LeadDraft {
        LeadDraft {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        }
    }

    /// A backend standing in for storage that has gone bad.
    struct FailingBackend;

    #[async_trait::async_trait]
    impl StorageBackend for FailingBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_owned(),
                reason: "backend offline".to_owned(),
            })
        }

        async fn put(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_owned(),
                reason: "backend offline".to_owned(),
            })
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Delete {
                key: key.to_owned(),
                reason: "backend offline".to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn list_is_empty_without_stored_data() {
        let (store, _) = make_store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_then_list_roundtrip() {
        let (store, _) = make_store();
        let before = store.list().await.unwrap().len();

        let lead = store
            .create(&draft("Ada", "ada@example.com", "Interested in a demo."))
            .await
            .unwrap();

        let leads = store.list().await.unwrap();
        assert_eq!(leads.len(), before + 1);
        assert_eq!(leads.last().unwrap(), &lead);
        assert_eq!(lead.name, "Ada");
        assert_eq!(lead.email, "ada@example.com");
        assert_eq!(lead.message, "Interested in a demo.");
        assert!(lead.id > 0);
    }

    #[tokio::test]
    async fn create_preserves_insertion_order() {
        let (store, _) = make_store();
        for name in ["first", "second", "third"] {
            store
                .create(&draft(name, "a@b.co", "a message long enough"))
                .await
                .unwrap();
        }
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|lead| lead.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn ids_stay_unique_and_increasing() {
        let (store, _) = make_store();
        let mut last_id = 0;
        // Same-millisecond creations must still mint distinct ids.
        for _ in 0..5 {
            let lead = store
                .create(&draft("Ada", "ada@example.com", "a message long enough"))
                .await
                .unwrap();
            assert!(lead.id > last_id);
            last_id = lead.id;
        }
    }

    #[tokio::test]
    async fn id_bumps_past_a_stored_future_id() {
        let (store, backend) = make_store();
        // A stored collection whose last id is far in the future (clock skew).
        let future_id: i64 = 99_999_999_999_999;
        backend
            .put(
                LEADS_KEY,
                &format!(
                    r#"[{{"id":{future_id},"name":"Ada","email":"a@b.co","message":"ten chars!!","createdAt":"2026-01-01T00:00:00Z"}}]"#
                ),
            )
            .await
            .unwrap();

        let lead = store
            .create(&draft("Bob", "b@b.co", "another message"))
            .await
            .unwrap();
        assert_eq!(lead.id, future_id + 1);
    }

    #[tokio::test]
    async fn id_bumps_past_an_out_of_order_stored_id() {
        let (store, backend) = make_store();
        // Largest id first — a hand-edited collection no longer sorted by id.
        let future_id: i64 = 99_999_999_999_999;
        backend
            .put(
                LEADS_KEY,
                &format!(
                    r#"[{{"id":{future_id},"name":"Ada","email":"a@b.co","message":"ten chars!!","createdAt":"2026-01-01T00:00:00Z"}},{{"id":50,"name":"Bob","email":"b@b.co","message":"ten chars!!","createdAt":"2026-01-01T00:00:01Z"}}]"#
                ),
            )
            .await
            .unwrap();

        let lead = store
            .create(&draft("Cyd", "c@b.co", "another message"))
            .await
            .unwrap();
        assert_eq!(lead.id, future_id + 1);
    }

    #[tokio::test]
    async fn id_saturates_instead_of_overflowing() {
        let (store, backend) = make_store();
        let max = i64::MAX;
        backend
            .put(
                LEADS_KEY,
                &format!(
                    r#"[{{"id":{max},"name":"Ada","email":"a@b.co","message":"ten chars!!","createdAt":"2026-01-01T00:00:00Z"}}]"#
                ),
            )
            .await
            .unwrap();

        let lead = store
            .create(&draft("Bob", "b@b.co", "another message"))
            .await
            .unwrap();
        assert_eq!(lead.id, i64::MAX);
    }

    #[tokio::test]
    async fn delete_by_id_removes_exactly_one() {
        let (store, _) = make_store();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let lead = store
                .create(&draft(name, "a@b.co", "a message long enough"))
                .await
                .unwrap();
            ids.push(lead.id);
        }

        store.delete_by_id(ids[1]).await.unwrap();

        let remaining: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|lead| lead.id)
            .collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);
    }

    #[tokio::test]
    async fn delete_absent_id_is_noop() {
        let (store, _) = make_store();
        store
            .create(&draft("Ada", "a@b.co", "a message long enough"))
            .await
            .unwrap();

        store.delete_by_id(-1).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_all_empties_the_collection() {
        let (store, backend) = make_store();
        store
            .create(&draft("Ada", "a@b.co", "a message long enough"))
            .await
            .unwrap();

        store.clear_all().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(backend.get(LEADS_KEY).await.unwrap(), None);
        // Idempotent.
        store.clear_all().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_collection_lists_as_empty() {
        let (store, backend) = make_store();
        backend.put(LEADS_KEY, "{not json").await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_overwrites_a_corrupt_collection() {
        let (store, backend) = make_store();
        backend.put(LEADS_KEY, "[[[").await.unwrap();

        let lead = store
            .create(&draft("Ada", "a@b.co", "a message long enough"))
            .await
            .unwrap();

        let leads = store.list().await.unwrap();
        assert_eq!(leads, vec![lead]);
    }

    #[tokio::test]
    async fn stats_reports_count_and_stored_bytes() {
        let (store, backend) = make_store();
        assert_eq!(
            store.stats().await.unwrap(),
            LeadStats {
                count: 0,
                stored_bytes: 0
            }
        );

        store
            .create(&draft("Ada", "a@b.co", "a message long enough"))
            .await
            .unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.count, 1);
        let stored = backend.get(LEADS_KEY).await.unwrap().unwrap();
        assert_eq!(stats.stored_bytes, stored.len());

        // A corrupt value counts zero records but still reports its size.
        backend.put(LEADS_KEY, "{not json").await.unwrap();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.stored_bytes, "{not json".len());
    }

    #[tokio::test]
    async fn list_surfaces_storage_read_failures() {
        let store = LeadStore::new(Arc::new(FailingBackend));

        let err = store.list().await.unwrap_err();
        assert!(matches!(
            err,
            LeadStoreError::Storage(StorageError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn serialized_form_matches_the_persisted_shape() {
        let (store, backend) = make_store();
        store
            .create(&draft("Ada", "ada@example.com", "Interested in a demo."))
            .await
            .unwrap();

        let raw = backend.get(LEADS_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value.as_array().unwrap()[0];
        assert!(record["id"].is_i64());
        assert_eq!(record["name"], "Ada");
        assert_eq!(record["email"], "ada@example.com");
        assert_eq!(record["message"], "Interested in a demo.");
        assert!(record["createdAt"].is_string());
    }
}
