//! HTTP service and cache-aside data access for the commentd comment store.

pub mod cache;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod store;

pub use cache::{RedisCommentCache, create_cache};
pub use config::{AppConfig, LoggingConfig, RedisConfig, ServerConfig};
pub use observability::{apply_logging_level, init_tracing};
pub use server::{AppState, CommentdServer, build_app};
pub use store::CommentStore;
