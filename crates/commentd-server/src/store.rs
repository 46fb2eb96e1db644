//! Cache-aside data access for comments.
//!
//! `CommentStore` is the single component that touches both backends: the
//! relational store holding the authoritative rows and the cache holding
//! serialized derived payloads. Reads go cache-first and populate on miss;
//! writes insert the authoritative row, populate the comment's own cache
//! entry, and invalidate the per-video list entry.
//!
//! ## Cache Key Format
//!
//! `<video_id>_comments` — serialized [`CommentList`] for one video
//! `comment_<id>` — serialized single [`Comment`]
//!
//! ## Failure policy
//!
//! Every backend failure propagates to the caller, with one exception: once
//! the relational insert of a write has succeeded, cache population and list
//! invalidation failures are logged and counted, never returned — the
//! authoritative write already happened.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use commentd_core::{Comment, CommentList, WriteRequest, comment_id, submission_timestamp};
use commentd_storage::{
    CommentCache, CommentDatabase, StoreError, decode_comment, decode_list, encode_comment,
    encode_list,
};

fn video_comments_key(video_id: &str) -> String {
    format!("{video_id}_comments")
}

fn comment_key(id: &str) -> String {
    format!("comment_{id}")
}

/// The comment store data-access layer.
///
/// Holds no locks and no state beyond the two shared backend handles; all
/// concurrency control belongs to the backends. Clone the `Arc`s freely
/// across request tasks.
pub struct CommentStore {
    db: Arc<dyn CommentDatabase>,
    cache: Arc<dyn CommentCache>,
}

impl CommentStore {
    /// Creates a store over the given backends.
    pub fn new(db: Arc<dyn CommentDatabase>, cache: Arc<dyn CommentCache>) -> Self {
        Self { db, cache }
    }

    /// Returns all comments for a video, cache-first.
    ///
    /// A video with no comments yields an empty list, never an error. On a
    /// miss the list is fetched from the relational store and cached without
    /// expiration; concurrent misses may both do so, which is harmless —
    /// the payload is derived data and the last writer wins.
    #[instrument(skip(self))]
    pub async fn list_by_video(&self, video_id: &str) -> Result<CommentList, StoreError> {
        let key = video_comments_key(video_id);

        if let Some(payload) = self.cache.get(&key).await? {
            crate::metrics::record_cache_hit("list");
            return decode_list(&payload);
        }
        crate::metrics::record_cache_miss("list");

        let comments = self.db.list_by_video(video_id).await?;
        let list = CommentList::new(comments);
        debug!(video_id, count = list.len(), "list fetched from database");

        let payload = encode_list(&list)?;
        self.cache.set(&key, payload).await?;

        Ok(list)
    }

    /// Returns one comment by identifier, cache-first.
    ///
    /// A missing row is [`StoreError::NotFound`], distinct from backend
    /// failures.
    #[instrument(skip(self))]
    pub async fn get_single(&self, id: &str) -> Result<Comment, StoreError> {
        let key = comment_key(id);

        if let Some(payload) = self.cache.get(&key).await? {
            crate::metrics::record_cache_hit("comment");
            return decode_comment(&payload);
        }
        crate::metrics::record_cache_miss("comment");

        let comment = self
            .db
            .get_single(id)
            .await?
            .ok_or_else(|| StoreError::not_found(id))?;

        let payload = encode_comment(&comment)?;
        self.cache.set(&key, payload).await?;

        Ok(comment)
    }

    /// Creates a comment and returns it with its assigned identifier.
    ///
    /// The identifier is derived from the submission timestamp, the video id
    /// and the content; an insert failure (including an identifier
    /// collision) aborts the whole operation with no row and no cache entry.
    /// After a successful insert the comment is cached under its own key and
    /// the video's list entry is invalidated so the next list read reflects
    /// the new comment.
    #[instrument(skip(self, request), fields(video_id = %request.video_id))]
    pub async fn write(&self, request: &WriteRequest) -> Result<Comment, StoreError> {
        validate(request)?;

        let date_created = submission_timestamp();
        let id = comment_id(&date_created, &request.video_id, &request.content);

        let comment = Comment {
            id,
            video_id: request.video_id.clone(),
            user_id: request.user_id.clone(),
            content: request.content.clone(),
            date_created,
            likes: 0,
            dislikes: 0,
        };

        self.db.insert(&comment).await?;
        crate::metrics::record_comment_written();
        debug!(id = %comment.id, "comment row inserted");

        // The relational row is authoritative from here on; cache upkeep
        // failures are reported out of band, never to the caller.
        match encode_comment(&comment) {
            Ok(payload) => {
                if let Err(e) = self.cache.set(&comment_key(&comment.id), payload).await {
                    warn!(id = %comment.id, error = %e, "failed to cache new comment");
                    crate::metrics::record_cache_write_failure();
                }
            }
            Err(e) => {
                warn!(id = %comment.id, error = %e, "failed to encode new comment for cache");
                crate::metrics::record_cache_write_failure();
            }
        }

        // A list entry cached before this write no longer matches the table.
        if let Err(e) = self
            .cache
            .delete(&video_comments_key(&comment.video_id))
            .await
        {
            warn!(video_id = %comment.video_id, error = %e, "failed to invalidate list entry");
            crate::metrics::record_cache_write_failure();
        }

        Ok(comment)
    }
}

fn validate(request: &WriteRequest) -> Result<(), StoreError> {
    if request.video_id.is_empty() {
        return Err(StoreError::validation("video_id is required"));
    }
    if request.user_id.is_empty() {
        return Err(StoreError::validation("user_id is required"));
    }
    if request.content.is_empty() {
        return Err(StoreError::validation("content is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_families() {
        assert_eq!(video_comments_key("v1"), "v1_comments");
        assert_eq!(comment_key("abc123"), "comment_abc123");
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let ok = WriteRequest {
            video_id: "v1".into(),
            user_id: "u1".into(),
            content: "hello".into(),
        };
        assert!(validate(&ok).is_ok());

        for (video_id, user_id, content) in [
            ("", "u1", "hello"),
            ("v1", "", "hello"),
            ("v1", "u1", ""),
        ] {
            let req = WriteRequest {
                video_id: video_id.into(),
                user_id: user_id.into(),
                content: content.into(),
            };
            let err = validate(&req).unwrap_err();
            assert!(matches!(err, StoreError::Validation { .. }));
        }
    }
}
