//! Application controller: store, presenter, editor, and quote fetch wiring.
//!
//! # Responsibility
//! - Own the record store for the whole session (open at startup, `close`
//!   at shutdown).
//! - Rebuild the aggregated list after every mutation and hand it to the
//!   presenter.
//!
//! # Invariants
//! - Every successful write is followed by a full rebuild.
//! - Network failures never escape `refresh_from_network`.

use crate::config::AppConfig;
use crate::db::DbResult;
use crate::images::ImageStore;
use crate::model::kind::RecordKind;
use crate::model::record::{Quote, RecordRef};
use crate::presenter::{ListPresenter, RowAction};
use crate::remote::quote_client::{FetchError, HttpQuoteSource};
use crate::repo::record_repo::{RepoError, RepoResult};
use crate::service::editor_service::{
    EditorError, EditorNotice, EditorOptions, EditorSession, SaveOutcome,
};
use crate::service::list_service::rebuild;
use crate::service::quote_service::QuoteFetcher;
use crate::store::{RecordStore, WriteOutcome};
use log::error;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("failed to build quote client: {0}")]
    QuoteClient(#[from] FetchError),
    #[error("failed to create data directory `{path}`: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of dispatching a presenter row action.
#[derive(Debug)]
pub enum Dispatched {
    Editor(EditorSession, Option<EditorNotice>),
    Deleted(WriteOutcome),
}

pub struct App {
    store: RecordStore,
    images: ImageStore,
    quotes: QuoteFetcher,
    presenter: ListPresenter,
    editor_options: EditorOptions,
}

impl App {
    pub fn new(
        store: RecordStore,
        images: ImageStore,
        quotes: QuoteFetcher,
        editor_options: EditorOptions,
    ) -> Self {
        Self {
            store,
            images,
            quotes,
            presenter: ListPresenter::new(),
            editor_options,
        }
    }

    /// Opens the store and HTTP client described by `config`.
    pub fn open(config: &AppConfig) -> Result<Self, AppError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| AppError::DataDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let store = RecordStore::open(&config.db_path, config.schema_mismatch)?;
        let source = HttpQuoteSource::new(
            &config.quote_base_url,
            Duration::from_secs(config.http_timeout_secs),
        )?;
        Ok(Self::new(
            store,
            ImageStore::new(&config.image_dir),
            QuoteFetcher::new(source),
            EditorOptions {
                numeric_policy: config.numeric_policy,
                image_retention: config.image_retention,
            },
        ))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn presenter(&self) -> &ListPresenter {
        &self.presenter
    }

    /// Rebuilds the aggregated list and shows it.
    pub fn refresh(&mut self) -> RepoResult<&ListPresenter> {
        let items = rebuild(&self.store)?;
        self.presenter.show(items);
        Ok(&self.presenter)
    }

    /// Starts a Create session for `kind`.
    pub fn begin_create(&self, kind: RecordKind) -> EditorSession {
        EditorSession::create(kind, self.editor_options)
    }

    /// Starts an Edit session for an existing record.
    pub fn begin_edit(
        &self,
        record: RecordRef,
    ) -> RepoResult<(EditorSession, Option<EditorNotice>)> {
        EditorSession::open(
            &self.store,
            record.kind,
            Some(record.id),
            self.editor_options,
        )
    }

    /// Saves the session, then rebuilds the list.
    pub fn save(&mut self, session: EditorSession) -> Result<SaveOutcome, EditorError> {
        let outcome = session.save(&self.store, &self.images)?;
        self.refresh()?;
        Ok(outcome)
    }

    /// Deletes one record, then rebuilds the list.
    pub fn delete_record(&mut self, record: RecordRef) -> RepoResult<WriteOutcome> {
        let outcome = match self.store.get_item(record)? {
            Some(item) => self.store.delete_item(&item)?,
            None => WriteOutcome::NotFound,
        };
        self.refresh()?;
        Ok(outcome)
    }

    /// Deletes the record shown at `index`, removing its row first.
    ///
    /// Returns `None` when the index does not point at a row.
    pub fn delete_row(&mut self, index: usize) -> RepoResult<Option<WriteOutcome>> {
        let Some(item) = self.presenter.remove_row(index) else {
            return Ok(None);
        };
        let deleted = self.store.delete_item(&item);
        self.refresh()?;
        deleted.map(Some)
    }

    /// Handles an edit or delete intent coming from the presenter.
    pub fn dispatch(&mut self, action: RowAction) -> RepoResult<Dispatched> {
        match action {
            RowAction::Edit(record) => {
                let (session, notice) = self.begin_edit(record)?;
                Ok(Dispatched::Editor(session, notice))
            }
            RowAction::Delete(record) => Ok(Dispatched::Deleted(self.delete_record(record)?)),
        }
    }

    /// Fetches one remote quote; failures are logged and yield `None`.
    pub fn refresh_from_network(&mut self) -> Option<Quote> {
        let quote = self.quotes.fetch_one(&self.store).ok()?;
        if let Err(err) = self.refresh() {
            error!(
                "event=list_rebuild module=app status=error after=quote_fetch error={}",
                err
            );
        }
        Some(quote)
    }

    /// Empties every record table and the displayed list.
    pub fn clear_all(&mut self) -> RepoResult<()> {
        self.store.clear_all()?;
        self.refresh()?;
        Ok(())
    }

    /// Disposes the store.
    pub fn close(self) -> DbResult<()> {
        self.store.close()
    }
}
