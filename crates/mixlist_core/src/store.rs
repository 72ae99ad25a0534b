//! Owned record store over one SQLite connection.
//!
//! # Responsibility
//! - Own the connection lifecycle: open at startup, `close` at shutdown.
//! - Expose per-kind CRUD with store-level logging.
//! - Turn update/delete on a missing id into a logged no-op.
//!
//! # Invariants
//! - The wrapped connection is migrated and has all three record tables.
//! - No operation spans more than one record kind, except `clear_all`.

use crate::db::migrations::RECORD_TABLES;
use crate::db::{open_db_in_memory, open_db_with, DbError, DbResult, SchemaMismatchPolicy};
use crate::model::kind::RecordKind;
use crate::model::record::{FoodItem, ListItem, Person, Quote, RecordId, RecordRef};
use crate::repo::record_repo::{
    RecordRepository, RepoError, RepoResult, SqliteRecordRepository, TableRecord,
};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Result of an update or delete against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// No row had the given id; state is unchanged.
    NotFound,
}

/// Explicitly owned record store.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>, policy: SchemaMismatchPolicy) -> RepoResult<Self> {
        Self::from_connection(open_db_with(path, policy)?)
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection after checking every record table.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        SqliteRecordRepository::<Person>::try_new(&conn)?;
        SqliteRecordRepository::<FoodItem>::try_new(&conn)?;
        SqliteRecordRepository::<Quote>::try_new(&conn)?;
        Ok(Self { conn })
    }

    /// Borrows the underlying connection, mostly for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the repository for record type `R`.
    pub fn repo<R: TableRecord>(&self) -> SqliteRecordRepository<'_, R> {
        SqliteRecordRepository::new_unchecked(&self.conn)
    }

    pub fn insert<R: TableRecord>(&self, draft: &R::Draft) -> RepoResult<RecordId> {
        let id = self.repo::<R>().insert(draft)?;
        info!(
            "event=record_insert module=store status=ok kind={} id={}",
            R::KIND,
            id
        );
        Ok(id)
    }

    /// Replaces a record wholesale; a missing id is logged and ignored.
    pub fn update<R: TableRecord>(&self, record: &R) -> RepoResult<WriteOutcome> {
        let outcome = absorb_not_found(self.repo::<R>().update(record))?;
        log_write("record_update", R::KIND, record.record_id(), outcome);
        Ok(outcome)
    }

    /// Deletes a record by its id; a missing id is logged and ignored.
    pub fn delete<R: TableRecord>(&self, record: &R) -> RepoResult<WriteOutcome> {
        let outcome = absorb_not_found(self.repo::<R>().delete(record))?;
        log_write("record_delete", R::KIND, record.record_id(), outcome);
        Ok(outcome)
    }

    pub fn get_by_id<R: TableRecord>(&self, id: RecordId) -> RepoResult<Option<R>> {
        let record = self.repo::<R>().get_by_id(id)?;
        debug!(
            "event=record_get module=store status=ok kind={} id={} found={}",
            R::KIND,
            id,
            record.is_some()
        );
        Ok(record)
    }

    pub fn get_all<R: TableRecord>(&self) -> RepoResult<Vec<R>> {
        self.repo::<R>().get_all()
    }

    /// Loads one record of any kind as a list item.
    pub fn get_item(&self, record: RecordRef) -> RepoResult<Option<ListItem>> {
        let item = match record.kind {
            RecordKind::Person => self.get_by_id::<Person>(record.id)?.map(ListItem::from),
            RecordKind::Food => self.get_by_id::<FoodItem>(record.id)?.map(ListItem::from),
            RecordKind::Quote => self.get_by_id::<Quote>(record.id)?.map(ListItem::from),
        };
        Ok(item)
    }

    /// Deletes the record behind a list item.
    pub fn delete_item(&self, item: &ListItem) -> RepoResult<WriteOutcome> {
        match item {
            ListItem::Person(person) => self.delete(person),
            ListItem::Food(food) => self.delete(food),
            ListItem::Quote(quote) => self.delete(quote),
        }
    }

    /// Removes every quote and returns how many rows were deleted.
    pub fn delete_all_quotes(&self) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute(&format!("DELETE FROM {};", Quote::TABLE), [])?;
        info!(
            "event=quotes_clear module=store status=ok removed={}",
            removed
        );
        Ok(removed)
    }

    /// Empties all record tables in one transaction.
    pub fn clear_all(&mut self) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        for table in RECORD_TABLES {
            tx.execute(&format!("DELETE FROM {table};"), [])?;
        }
        tx.commit()?;
        info!("event=store_clear module=store status=ok");
        Ok(())
    }

    /// Closes the connection, reporting any error SQLite raises on shutdown.
    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=store_close module=store status=ok");
        Ok(())
    }
}

fn absorb_not_found(result: RepoResult<()>) -> RepoResult<WriteOutcome> {
    match result {
        Ok(()) => Ok(WriteOutcome::Applied),
        Err(RepoError::NotFound { .. }) => Ok(WriteOutcome::NotFound),
        Err(err) => Err(err),
    }
}

fn log_write(event: &str, kind: RecordKind, id: RecordId, outcome: WriteOutcome) {
    match outcome {
        WriteOutcome::Applied => info!(
            "event={} module=store status=ok kind={} id={}",
            event, kind, id
        ),
        WriteOutcome::NotFound => warn!(
            "event={} module=store status=not_found kind={} id={}",
            event, kind, id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordStore, WriteOutcome};
    use crate::model::record::{NewQuote, Person, Quote};

    #[test]
    fn update_of_missing_record_is_a_noop() {
        let store = RecordStore::open_in_memory().unwrap();
        let ghost = Person {
            id: 42,
            name: "ghost".to_string(),
            age: 1,
        };

        assert_eq!(store.update(&ghost).unwrap(), WriteOutcome::NotFound);
        assert!(store.get_all::<Person>().unwrap().is_empty());
    }

    #[test]
    fn delete_all_quotes_reports_removed_rows() {
        let store = RecordStore::open_in_memory().unwrap();
        for text in ["a", "b"] {
            store
                .insert::<Quote>(&NewQuote {
                    text: text.to_string(),
                    author: "anon".to_string(),
                })
                .unwrap();
        }

        assert_eq!(store.delete_all_quotes().unwrap(), 2);
        assert!(store.get_all::<Quote>().unwrap().is_empty());
    }
}
