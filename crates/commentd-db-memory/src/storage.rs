//! In-memory comment database using a concurrent map.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use commentd_core::Comment;
use commentd_storage::{CommentDatabase, StoreError};

/// In-memory comment database.
///
/// Rows live in a `DashMap` keyed by comment id. Iteration order is
/// arbitrary, which matches the contract: list order is whatever the backing
/// query returns.
#[derive(Debug, Default)]
pub struct MemoryCommentDatabase {
    rows: DashMap<String, Comment>,
    queries: AtomicU64,
    inserts: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryCommentDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of select queries (list and single-row) served so far.
    /// Tests use this to prove a read was answered from cache.
    #[must_use]
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of rows inserted so far.
    #[must_use]
    pub fn insert_count(&self) -> u64 {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of rows currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// When set, every operation fails as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("database unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentDatabase for MemoryCommentDatabase {
    async fn list_by_video(&self, video_id: &str) -> Result<Vec<Comment>, StoreError> {
        self.check_available()?;
        self.queries.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .rows
            .iter()
            .filter(|entry| entry.value().video_id == video_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get_single(&self, id: &str) -> Result<Option<Comment>, StoreError> {
        self.check_available()?;
        self.queries.fetch_add(1, Ordering::SeqCst);

        Ok(self.rows.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        self.check_available()?;

        // Mimics the primary-key constraint of the relational table.
        if self.rows.contains_key(&comment.id) {
            return Err(StoreError::unavailable(format!(
                "duplicate key value violates unique constraint: {}",
                comment.id
            )));
        }

        self.rows.insert(comment.id.clone(), comment.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, video_id: &str) -> Comment {
        Comment {
            id: id.into(),
            video_id: video_id.into(),
            user_id: "u1".into(),
            content: "hello".into(),
            date_created: "2026-01-01T00:00:00Z".into(),
            likes: 0,
            dislikes: 0,
        }
    }

    #[tokio::test]
    async fn insert_then_get_single() {
        let db = MemoryCommentDatabase::new();
        db.insert(&comment("a", "v1")).await.expect("insert");

        let found = db.get_single("a").await.expect("query");
        assert_eq!(found.expect("present").video_id, "v1");
        assert!(db.get_single("missing").await.expect("query").is_none());
        assert_eq!(db.query_count(), 2);
        assert_eq!(db.insert_count(), 1);
    }

    #[tokio::test]
    async fn list_filters_by_video() {
        let db = MemoryCommentDatabase::new();
        db.insert(&comment("a", "v1")).await.expect("insert");
        db.insert(&comment("b", "v2")).await.expect("insert");
        db.insert(&comment("c", "v1")).await.expect("insert");

        let mut ids: Vec<String> = db
            .list_by_video("v1")
            .await
            .expect("query")
            .into_iter()
            .map(|c| c.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);

        assert!(db.list_by_video("v3").await.expect("query").is_empty());
    }

    #[tokio::test]
    async fn duplicate_insert_fails_and_leaves_first_row() {
        let db = MemoryCommentDatabase::new();
        db.insert(&comment("a", "v1")).await.expect("insert");

        let err = db.insert(&comment("a", "v2")).await.unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(db.len(), 1);
        let kept = db.get_single("a").await.expect("query").expect("present");
        assert_eq!(kept.video_id, "v1");
    }

    #[tokio::test]
    async fn unavailable_fails_every_operation() {
        let db = MemoryCommentDatabase::new();
        db.set_unavailable(true);

        assert!(db.list_by_video("v1").await.unwrap_err().is_unavailable());
        assert!(db.get_single("a").await.unwrap_err().is_unavailable());
        assert!(db.insert(&comment("a", "v1")).await.unwrap_err().is_unavailable());
        assert_eq!(db.query_count(), 0);
    }
}
