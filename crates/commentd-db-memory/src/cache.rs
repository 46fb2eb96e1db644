//! In-memory cache backend using a concurrent map.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use commentd_storage::{CommentCache, StoreError};

/// In-memory cache of opaque payloads keyed by string.
///
/// Per-key operations are atomic; overwrites are last-writer-wins. Entries
/// never expire, matching the production cache contract. Fault toggles let
/// tests fail individual operations as if the backend were unreachable.
#[derive(Debug, Default)]
pub struct MemoryCommentCache {
    entries: DashMap<String, Vec<u8>>,
    gets: AtomicU64,
    sets: AtomicU64,
    fail_gets: AtomicBool,
    fail_sets: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryCommentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups served so far (hits and misses).
    #[must_use]
    pub fn get_count(&self) -> u64 {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of payloads stored so far.
    #[must_use]
    pub fn set_count(&self) -> u64 {
        self.sets.load(Ordering::SeqCst)
    }

    /// Number of entries currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the key currently has an entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the raw payload under a key, if present.
    #[must_use]
    pub fn payload(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// When set, lookups fail as if the cache were unreachable.
    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// When set, stores fail as if the cache were unreachable.
    pub fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }

    /// When set, deletes fail as if the cache were unreachable.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommentCache for MemoryCommentCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("cache unreachable"));
        }
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("cache unreachable"));
        }
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries.insert(key.to_string(), payload);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("cache unreachable"));
        }
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_delete_round_trip() {
        let cache = MemoryCommentCache::new();
        assert_eq!(cache.get("k").await.expect("get"), None);

        cache.set("k", b"payload".to_vec()).await.expect("set");
        assert_eq!(cache.get("k").await.expect("get"), Some(b"payload".to_vec()));

        cache.delete("k").await.expect("delete");
        assert_eq!(cache.get("k").await.expect("get"), None);

        // Deleting an absent key is not an error.
        cache.delete("k").await.expect("delete");
    }

    #[tokio::test]
    async fn overwrite_is_last_writer_wins() {
        let cache = MemoryCommentCache::new();
        cache.set("k", b"one".to_vec()).await.expect("set");
        cache.set("k", b"two".to_vec()).await.expect("set");
        assert_eq!(cache.get("k").await.expect("get"), Some(b"two".to_vec()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.set_count(), 2);
    }

    #[tokio::test]
    async fn fault_toggles_fail_the_selected_operation() {
        let cache = MemoryCommentCache::new();
        cache.set("k", b"v".to_vec()).await.expect("set");

        cache.fail_gets(true);
        assert!(cache.get("k").await.unwrap_err().is_unavailable());
        cache.fail_gets(false);

        cache.fail_sets(true);
        assert!(cache.set("k2", vec![]).await.unwrap_err().is_unavailable());
        assert!(!cache.contains("k2"));
        cache.fail_sets(false);

        cache.fail_deletes(true);
        assert!(cache.delete("k").await.unwrap_err().is_unavailable());
        // The entry survives a failed delete.
        assert!(cache.contains("k"));
    }
}
