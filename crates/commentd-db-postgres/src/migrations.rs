//! Startup schema management for the comments table.

use sqlx_core::query::query;
use sqlx_postgres::PgPool;
use tracing::{debug, instrument};

use commentd_storage::StoreError;

const CREATE_COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id           TEXT PRIMARY KEY,
    video_id     TEXT NOT NULL,
    user_id      TEXT NOT NULL,
    date_created TEXT NOT NULL,
    content      TEXT NOT NULL,
    likes        BIGINT NOT NULL DEFAULT 0 CHECK (likes >= 0),
    dislikes     BIGINT NOT NULL DEFAULT 0 CHECK (dislikes >= 0)
)"#;

const CREATE_VIDEO_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS comments_video_id_idx ON comments (video_id)";

/// Ensures the comments table and its video index exist.
///
/// Idempotent; safe to run on every startup.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    query(CREATE_COMMENTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("failed to create comments table: {e}")))?;

    query(CREATE_VIDEO_INDEX)
        .execute(pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("failed to create video index: {e}")))?;

    debug!("comments schema ensured");

    Ok(())
}
