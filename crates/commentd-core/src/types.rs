//! Record types shared by the storage backends and the data-access layer.

use serde::{Deserialize, Serialize};

/// A single comment attached to a video.
///
/// The identifier is assigned once at write time and never changes. Like and
/// dislike counts are always zero on a freshly created comment; this core
/// never mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Opaque identifier, derived from the submission (see [`crate::id`]).
    pub id: String,
    /// The video this comment belongs to.
    pub video_id: String,
    /// The author of the comment.
    pub user_id: String,
    /// The comment text.
    pub content: String,
    /// Submission timestamp, stored as rendered text.
    pub date_created: String,
    pub likes: u64,
    pub dislikes: u64,
}

/// All comments for one video, in whatever order the backing query returned
/// them. The order is not stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentList {
    pub comments: Vec<Comment>,
}

impl CommentList {
    /// Creates a list from already-fetched comments.
    #[must_use]
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }

    /// Creates an empty list. Videos with no comments yield this, never an
    /// error.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// A request to create a new comment. The identifier is assigned by the
/// store, not the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub video_id: String,
    pub user_id: String,
    pub content: String,
}
