//! Embedded SQL migration runner.
//!
//! Migrations are SQL files embedded at compile time. They run sequentially
//! on startup, tracked by the `_accounts_migrations` table. Each migration
//! runs exactly once; if it has already been applied, it is skipped.

use std::collections::HashSet;

use rusqlite::Connection;
use thiserror::Error;

const TRACKING_TABLE_SQL: &str = include_str!("migrations/000_init.sql");

/// A single embedded migration.
struct Migration {
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. New migrations are appended here.
const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "000_init",
        sql: include_str!("migrations/000_init.sql"),
    },
    Migration {
        name: "001_accounts",
        sql: include_str!("migrations/001_accounts.sql"),
    },
];

/// Errors that can occur during migration execution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to create or read the tracking table.
    #[error("failed to check migration state: {0}")]
    StateQuery(rusqlite::Error),
}

/// Runs all pending migrations against the given connection.
///
/// Returns the number of migrations applied by this call.
///
/// # Errors
///
/// Returns `MigrationError` if any migration fails to execute or if the
/// tracking table cannot be queried.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    run_migrations_from_list(conn, MIGRATIONS)
}

fn run_migrations_from_list(
    conn: &Connection,
    migrations: &[Migration],
) -> Result<usize, MigrationError> {
    let applied = applied_names(conn)?;
    let pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !applied.contains(m.name))
        .collect();

    if pending.is_empty() {
        tracing::debug!(known = applied.len(), "schema is up to date");
        return Ok(0);
    }

    for migration in &pending {
        apply(conn, migration).map_err(|source| MigrationError::ExecutionFailed {
            name: migration.name.to_string(),
            source,
        })?;
        tracing::info!(migration = migration.name, "applied migration");
    }

    Ok(pending.len())
}

/// Names already recorded in the tracking table, creating it on first use.
fn applied_names(conn: &Connection) -> Result<HashSet<String>, MigrationError> {
    conn.execute_batch(TRACKING_TABLE_SQL)
        .map_err(MigrationError::StateQuery)?;

    let mut stmt = conn
        .prepare("SELECT name FROM _accounts_migrations")
        .map_err(MigrationError::StateQuery)?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .and_then(|rows| rows.collect::<Result<HashSet<String>, _>>())
        .map_err(MigrationError::StateQuery)?;
    Ok(names)
}

/// Runs one migration and records it, both inside a single transaction.
fn apply(conn: &Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute(
        "INSERT INTO _accounts_migrations (name) VALUES (?1)",
        [migration.name],
    )?;
    tx.commit()
}
