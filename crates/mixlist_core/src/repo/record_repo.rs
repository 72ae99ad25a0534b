//! Generic record repository over one SQLite table per kind.
//!
//! # Responsibility
//! - Provide insert/update/delete/get-by-id/get-all for each record kind.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Each call is a single SQL statement, so no partial record writes.
//! - `get_all` returns rows in insertion order (`id ASC`).
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::kind::RecordKind;
use crate::model::record::RecordId;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::marker::PhantomData;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{kind} record not found: {id}")]
    NotFound { kind: RecordKind, id: RecordId },
    #[error("invalid persisted record data: {0}")]
    InvalidData(String),
    #[error("connection schema version {actual_version} does not match expected {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Column mapping between one record kind and its table.
pub trait TableRecord: Sized {
    /// Insert payload without an id.
    type Draft;

    const KIND: RecordKind;
    const TABLE: &'static str;
    /// Data columns, excluding `id`, in bind order.
    const COLUMNS: &'static [&'static str];

    fn record_id(&self) -> RecordId;
    fn draft_values(draft: &Self::Draft) -> Vec<Value>;
    fn record_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Repository interface for one record kind.
pub trait RecordRepository {
    type Record;
    type Draft;

    /// Persists a new record and returns the issued id.
    fn insert(&self, draft: &Self::Draft) -> RepoResult<RecordId>;
    /// Replaces every attribute of the record with the same id.
    fn update(&self, record: &Self::Record) -> RepoResult<()>;
    /// Removes the record with the same id.
    fn delete(&self, record: &Self::Record) -> RepoResult<()>;
    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Self::Record>>;
    fn get_all(&self) -> RepoResult<Vec<Self::Record>>;
}

/// SQLite-backed repository for the record type `R`.
pub struct SqliteRecordRepository<'conn, R> {
    conn: &'conn Connection,
    _record: PhantomData<R>,
}

impl<'conn, R: TableRecord> SqliteRecordRepository<'conn, R> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` differs from the latest
    ///   migration.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the table shape is
    ///   not what this binary writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready::<R>(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    /// Wraps a connection that the caller has already checked with `try_new`.
    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }
}

impl<R: TableRecord> RecordRepository for SqliteRecordRepository<'_, R> {
    type Record = R;
    type Draft = R::Draft;

    fn insert(&self, draft: &R::Draft) -> RepoResult<RecordId> {
        let placeholders = (1..=R::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            R::TABLE,
            R::COLUMNS.join(", ")
        );

        self.conn
            .execute(&sql, params_from_iter(R::draft_values(draft)))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, record: &R) -> RepoResult<()> {
        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            R::TABLE,
            R::COLUMNS.len() + 1
        );

        let mut values = record.record_values();
        values.push(Value::Integer(record.record_id()));
        let changed = self.conn.execute(&sql, params_from_iter(values))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: R::KIND,
                id: record.record_id(),
            });
        }

        Ok(())
    }

    fn delete(&self, record: &R) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", R::TABLE),
            [record.record_id()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: R::KIND,
                id: record.record_id(),
            });
        }

        Ok(())
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<R>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(R::from_row(row)?));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<R>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }

        Ok(records)
    }
}

/// Reads an INTEGER column that must fit into `i32`.
pub(crate) fn get_i32(row: &Row<'_>, table: &str, column: &str) -> RepoResult<i32> {
    let raw: i64 = row.get(column)?;
    i32::try_from(raw).map_err(|_| {
        RepoError::InvalidData(format!("value `{raw}` out of range in {table}.{column}"))
    })
}

fn ensure_connection_ready<R: TableRecord>(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, R::TABLE)? {
        return Err(RepoError::MissingRequiredTable(R::TABLE));
    }

    for &column in std::iter::once(&"id").chain(R::COLUMNS.iter()) {
        if !table_has_column(conn, R::TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: R::TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
