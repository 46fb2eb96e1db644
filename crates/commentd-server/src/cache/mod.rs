//! Cache backends for the comment store.
//!
//! Production runs against Redis; with Redis disabled in config the service
//! falls back to an in-process map, which only makes sense for a single
//! instance.

pub mod redis;

use std::sync::Arc;

use commentd_db_memory::MemoryCommentCache;
use commentd_storage::{CommentCache, StoreError};

use crate::config::RedisConfig;

pub use redis::RedisCommentCache;

/// Creates the cache backend selected by configuration.
///
/// With Redis enabled, an unreachable Redis is a startup failure rather than
/// a silent fallback — the read path is specified against one shared cache,
/// and a per-instance map quietly taking its place would change semantics.
pub async fn create_cache(config: &RedisConfig) -> Result<Arc<dyn CommentCache>, StoreError> {
    if !config.enabled {
        tracing::info!("Redis disabled, using in-process cache");
        return Ok(Arc::new(MemoryCommentCache::new()));
    }

    let cache = RedisCommentCache::connect(config).await?;
    Ok(Arc::new(cache))
}
