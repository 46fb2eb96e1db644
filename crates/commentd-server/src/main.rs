use std::{env, process, sync::Arc};

use commentd_db_postgres::{PostgresCommentDatabase, create_pool, run_migrations};
use commentd_server::config::loader::load_config;
use commentd_server::server::{AppState, CommentdServer};
use commentd_server::store::CommentStore;
use commentd_server::{AppConfig, apply_logging_level, create_cache, init_tracing, metrics};
use commentd_storage::StoreError;

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From COMMENTD_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (commentd.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (COMMENTD_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present, before anything reads the environment.
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    // Initialize tracing early with the default level
    init_tracing("info");

    let (config_path, source) = resolve_config_path();

    let cfg = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        path = %config_path.as_deref().unwrap_or("commentd.toml"),
        source = %source,
        "Configuration loaded"
    );

    apply_logging_level(&cfg.logging.level);
    metrics::init_metrics();

    let store = match bootstrap_store(&cfg).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Backend initialization failed: {e}");
            process::exit(2);
        }
    };

    let server = CommentdServer::new(cfg.addr(), AppState { store });
    if let Err(err) = server.run().await {
        eprintln!("Server error: {err}");
    }
}

/// Connects both backends and assembles the store.
async fn bootstrap_store(cfg: &AppConfig) -> Result<Arc<CommentStore>, StoreError> {
    let pool = create_pool(&cfg.postgres).await?;
    if cfg.postgres.run_migrations {
        run_migrations(&pool).await?;
    }
    let db = Arc::new(PostgresCommentDatabase::new(pool));
    let cache = create_cache(&cfg.redis).await?;
    Ok(Arc::new(CommentStore::new(db, cache)))
}

/// Resolve the configuration file path.
///
/// Priority order:
/// 1. CLI argument: --config <path>
/// 2. Environment variable: COMMENTD_CONFIG
/// 3. Default: commentd.toml (loader falls back to defaults if absent)
fn resolve_config_path() -> (Option<String>, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config"
            && let Some(path) = args.next()
        {
            return (Some(path), ConfigSource::CliArgument);
        }
    }

    if let Ok(path) = env::var("COMMENTD_CONFIG") {
        return (Some(path), ConfigSource::EnvironmentVariable);
    }

    (None, ConfigSource::Default)
}
