//! PostgreSQL implementation of the comment database trait.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;

use commentd_core::Comment;
use commentd_storage::{CommentDatabase, StoreError};

const SELECT_BY_VIDEO: &str = "SELECT id, user_id, date_created, content, likes, dislikes \
     FROM comments WHERE video_id = $1";

const SELECT_BY_ID: &str = "SELECT video_id, user_id, date_created, content, likes, dislikes \
     FROM comments WHERE id = $1";

const INSERT_COMMENT: &str = "INSERT INTO comments(id, video_id, user_id, date_created, content, likes, dislikes) \
     VALUES ($1, $2, $3, $4, $5, $6, $7)";

/// Row shape of [`SELECT_BY_VIDEO`]: the video id is the filter, not a column.
type VideoRow = (String, String, String, String, i64, i64);

/// Row shape of [`SELECT_BY_ID`]: the comment id is the filter, not a column.
type SingleRow = (String, String, String, String, i64, i64);

/// Comment database backed by a pooled PostgreSQL connection.
pub struct PostgresCommentDatabase {
    pool: PgPool,
}

impl PostgresCommentDatabase {
    /// Creates a new database over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool, for health checks.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CommentDatabase for PostgresCommentDatabase {
    async fn list_by_video(&self, video_id: &str) -> Result<Vec<Comment>, StoreError> {
        let rows: Vec<VideoRow> = query_as(SELECT_BY_VIDEO)
            .bind(video_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(format!("list query failed: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| video_row_to_comment(video_id, row))
            .collect())
    }

    async fn get_single(&self, id: &str) -> Result<Option<Comment>, StoreError> {
        let row: Option<SingleRow> = query_as(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(format!("single-row query failed: {e}")))?;

        Ok(row.map(|row| single_row_to_comment(id, row)))
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        query(INSERT_COMMENT)
            .bind(&comment.id)
            .bind(&comment.video_id)
            .bind(&comment.user_id)
            .bind(&comment.date_created)
            .bind(&comment.content)
            .bind(comment.likes as i64)
            .bind(comment.dislikes as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(format!("insert failed: {e}")))?;

        Ok(())
    }
}

fn video_row_to_comment(video_id: &str, row: VideoRow) -> Comment {
    let (id, user_id, date_created, content, likes, dislikes) = row;
    Comment {
        id,
        video_id: video_id.to_string(),
        user_id,
        content,
        date_created,
        likes: likes as u64,
        dislikes: dislikes as u64,
    }
}

fn single_row_to_comment(id: &str, row: SingleRow) -> Comment {
    let (video_id, user_id, date_created, content, likes, dislikes) = row;
    Comment {
        id: id.to_string(),
        video_id,
        user_id,
        content,
        date_created,
        likes: likes as u64,
        dislikes: dislikes as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_row_mapping_fills_in_filter_column() {
        let comment = video_row_to_comment(
            "v1",
            (
                "abc".into(),
                "u1".into(),
                "2026-01-01T00:00:00Z".into(),
                "hello".into(),
                3,
                1,
            ),
        );
        assert_eq!(comment.id, "abc");
        assert_eq!(comment.video_id, "v1");
        assert_eq!(comment.user_id, "u1");
        assert_eq!(comment.content, "hello");
        assert_eq!(comment.likes, 3);
        assert_eq!(comment.dislikes, 1);
    }

    #[test]
    fn single_row_mapping_fills_in_filter_column() {
        let comment = single_row_to_comment(
            "abc",
            (
                "v1".into(),
                "u1".into(),
                "2026-01-01T00:00:00Z".into(),
                "hello".into(),
                0,
                0,
            ),
        );
        assert_eq!(comment.id, "abc");
        assert_eq!(comment.video_id, "v1");
        assert_eq!(comment.date_created, "2026-01-01T00:00:00Z");
    }
}
