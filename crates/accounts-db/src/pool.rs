//! SQLite connection pool for the account service.
//!
//! The pool always targets a database file. Every pooled connection gets
//! foreign keys and a busy timeout applied on open; WAL journaling is a
//! property of the file and is switched on once, when the pool is built.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use thiserror::Error;

/// Pool and per-connection tunables, usually taken from the `[database]`
/// section of the server config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Upper bound on open connections.
    pub pool_max_size: u32,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 8,
        }
    }
}

/// Shared handle to the account database.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors raised while opening the account database.
#[derive(Debug, Error)]
pub enum PoolError {
    /// `:memory:` gives each pooled connection its own empty database.
    #[error("in-memory databases cannot be pooled; configure a database file")]
    InMemory,

    /// The pool could not open or hand out a connection.
    #[error("database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// SQLite refused to switch the file to WAL journaling.
    #[error("database at {path} is in '{mode}' journal mode, expected 'wal'")]
    JournalMode {
        /// Database file path.
        path: String,
        /// Journal mode SQLite reported instead.
        mode: String,
    },

    /// A pragma statement failed on the first connection.
    #[error("failed to configure database: {0}")]
    Pragma(#[from] rusqlite::Error),
}

/// Opens the account database at `db_path` and builds a connection pool.
///
/// # Errors
///
/// Returns `PoolError::InMemory` for `:memory:`, `PoolError::JournalMode`
/// if the file cannot use WAL, and `PoolError::Pool` if connections cannot
/// be opened.
pub fn create_pool(
    db_path: impl AsRef<Path>,
    settings: DbRuntimeSettings,
) -> Result<DbPool, PoolError> {
    let db_path = db_path.as_ref();
    if db_path.as_os_str() == ":memory:" {
        return Err(PoolError::InMemory);
    }

    let busy_timeout = Duration::from_millis(settings.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.pragma_update(None, "foreign_keys", true)
        });

    let pool = Pool::builder()
        .max_size(settings.pool_max_size)
        .build(manager)?;

    let conn = pool.get()?;
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "wal", |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        return Err(PoolError::JournalMode {
            path: db_path.display().to_string(),
            mode,
        });
    }

    tracing::debug!(
        path = %db_path.display(),
        max_size = settings.pool_max_size,
        busy_timeout_ms = settings.busy_timeout_ms,
        "database pool ready"
    );

    Ok(pool)
}
