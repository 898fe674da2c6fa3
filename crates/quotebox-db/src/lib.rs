use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use thiserror::Error;

use crate::policy::propagate;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

// Path relative to crates/quotebox-db/Cargo.toml; resolves to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &quotebox_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
            busy_timeout_secs: config.db_busy_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    /// The write transaction failed and was rolled back; nothing from the
    /// call was persisted.
    #[error("quote write failed and was rolled back: {0}")]
    Write(#[source] sqlx::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect to a SQLite pool using an explicit URL and config.
///
/// The database file is created if missing. Connections use WAL journaling so
/// readers do not block the writer, and wait at most `busy_timeout_secs` on a
/// locked database.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the URL is invalid or the connection cannot be
/// established.
pub async fn connect_pool(
    database_url: &str,
    config: PoolConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Run all pending migrations against the pool.
///
/// Returns the number of migrations that were applied.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, sqlx::migrate::MigrateError> {
    // The _sqlx_migrations table does not exist yet on a fresh database;
    // treat absence as zero applied.
    let applied_before: i64 =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await
            .unwrap_or(0);

    MIGRATOR.run(pool).await?;

    let applied_after: i64 =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await
            .unwrap_or(0);

    let delta = (applied_after - applied_before).max(0);
    Ok(usize::try_from(delta).unwrap_or(0))
}

/// Ensure the quote store exists and is migrated, then return a pool to it.
///
/// Safe to call on every startup: the parent directory and database file are
/// created only when missing, and migrations never drop existing data.
///
/// # Errors
///
/// Returns [`DbError::Io`] if the database directory cannot be created,
/// [`DbError::Sqlx`] if the connection fails, or [`DbError::Migration`] if the
/// schema cannot be applied.
pub async fn initialize(database_url: &str, config: PoolConfig) -> Result<SqlitePool, DbError> {
    propagate(
        StoreOperation::Initialize,
        open_and_migrate(database_url, config).await,
    )
}

async fn open_and_migrate(database_url: &str, config: PoolConfig) -> Result<SqlitePool, DbError> {
    let file = database_file(database_url);

    if let Some(dir) = file
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            tracing::info!(path = %dir.display(), "created database directory");
        }
    }

    let existed = file.as_deref().is_some_and(Path::exists);
    let pool = connect_pool(database_url, config).await?;
    let applied = run_migrations(&pool).await?;

    tracing::info!(
        existed,
        in_memory = file.is_none(),
        migrations_applied = applied,
        "quote store initialized"
    );
    Ok(pool)
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Run a full health check: ping the pool and return a typed error on failure.
///
/// # Errors
///
/// Returns [`DbError`] if the ping fails.
pub async fn health_check(pool: &SqlitePool) -> Result<(), DbError> {
    ping(pool).await?;
    Ok(())
}

/// Path of the database file named by a `sqlite:` URL, or `None` for an
/// in-memory database.
fn database_file(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    if path.is_empty() || path == ":memory:" || query.contains("mode=memory") {
        return None;
    }
    Some(PathBuf::from(path))
}

pub mod policy;
pub mod quotes;

pub use policy::{FailurePolicy, StoreOperation};
pub use quotes::{
    count_quotes, read_all_quotes, read_quote_by_id, read_random_quote, write_quotes, QuoteLookup,
    QuoteRow,
};
