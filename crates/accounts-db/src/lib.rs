//! Database layer for the account service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization
//! and embedded SQL migrations. The `accounts` table is created through the
//! versioned migrations managed by this crate.
//!
//! A pool is created once at startup and shared by every request handler.
//! Handlers check out a single connection per request; the guard returns it
//! to the pool when dropped.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
