//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::{apply_migrations, reset_schema};
use super::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// What to do when the on-disk schema is newer than this binary understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMismatchPolicy {
    /// Drop every record table and rebuild the schema from scratch.
    ///
    /// Data stored under the unknown version is lost.
    #[default]
    DestructiveReset,
    /// Refuse to open and return `DbError::UnsupportedSchemaVersion`.
    Reject,
}

/// Opens a SQLite database file with the default mismatch policy.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with(path, SchemaMismatchPolicy::default())
}

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db_with(path: impl AsRef<Path>, policy: SchemaMismatchPolicy) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, policy, "file", started_at)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, SchemaMismatchPolicy::default(), "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    policy: SchemaMismatchPolicy,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    match bootstrap_connection(&mut conn, policy) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, policy: SchemaMismatchPolicy) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;

    match apply_migrations(conn) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) if policy == SchemaMismatchPolicy::DestructiveReset => {
            warn!(
                "event=db_reset module=db status=start db_version={} latest_supported={}",
                db_version, latest_supported
            );
            reset_schema(conn)?;
            apply_migrations(conn)?;
            warn!("event=db_reset module=db status=ok");
            Ok(())
        }
        other => other.map(|_| ()),
    }
}
