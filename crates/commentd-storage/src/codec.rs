//! Canonical binary codec for cache payloads.
//!
//! Every cache entry — a single comment or a full per-video list — is
//! MessagePack, encoded and decoded by this module and nothing else. Keeping
//! one codec on both sides of the cache is a hard invariant: a payload
//! written on a miss must decode on the next hit.

use commentd_core::{Comment, CommentList};

use crate::error::StoreError;

/// Encodes a single comment for the `comment_<id>` key family.
pub fn encode_comment(comment: &Comment) -> Result<Vec<u8>, StoreError> {
    rmp_serde::to_vec(comment).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Decodes a `comment_<id>` payload.
pub fn decode_comment(payload: &[u8]) -> Result<Comment, StoreError> {
    rmp_serde::from_slice(payload).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Encodes a per-video list for the `<video_id>_comments` key family.
pub fn encode_list(list: &CommentList) -> Result<Vec<u8>, StoreError> {
    rmp_serde::to_vec(list).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Decodes a `<video_id>_comments` payload.
pub fn decode_list(payload: &[u8]) -> Result<CommentList, StoreError> {
    rmp_serde::from_slice(payload).map_err(|e| StoreError::serialization(e.to_string()))
}
