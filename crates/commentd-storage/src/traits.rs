//! Storage traits for the comment store backends.
//!
//! The data-access layer talks to its relational store and its cache only
//! through these traits. Implementations must be thread-safe (`Send + Sync`);
//! every in-flight request shares the same backend instances.

use async_trait::async_trait;

use commentd_core::Comment;

use crate::error::StoreError;

/// The relational backend holding the authoritative comment rows.
///
/// Implementations perform no caching and no retries; a query failure is a
/// terminal result for that call.
#[async_trait]
pub trait CommentDatabase: Send + Sync {
    /// Fetches all comments for a video, in whatever order the backing query
    /// returns them.
    ///
    /// Zero matching rows is an empty vector, not an error.
    async fn list_by_video(&self, video_id: &str) -> Result<Vec<Comment>, StoreError>;

    /// Fetches a single comment by identifier.
    ///
    /// Returns `None` if no row matches. Errors are reserved for
    /// infrastructure failures, not for missing rows.
    async fn get_single(&self, id: &str) -> Result<Option<Comment>, StoreError>;

    /// Inserts a freshly created comment row.
    ///
    /// The identifier is already assigned; a uniqueness violation surfaces
    /// as an error and must leave no row behind.
    async fn insert(&self, comment: &Comment) -> Result<(), StoreError>;
}

/// The cache backend holding serialized derived payloads keyed by string.
///
/// Entries carry no expiration set by this system — they live until
/// overwritten, deleted, or evicted by an external policy. Per-key
/// operations are atomic in the backing store; concurrent writers of the
/// same key resolve last-writer-wins.
#[async_trait]
pub trait CommentCache: Send + Sync {
    /// Looks up a payload. A miss is `Ok(None)`; `Err` is reserved for
    /// backend failures.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores a payload under a key, overwriting any existing entry, with no
    /// expiration.
    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), StoreError>;

    /// Removes a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that CommentDatabase is object-safe
    fn _assert_database_object_safe(_: &dyn CommentDatabase) {}

    // Compile-time test that CommentCache is object-safe
    fn _assert_cache_object_safe(_: &dyn CommentCache) {}
}
