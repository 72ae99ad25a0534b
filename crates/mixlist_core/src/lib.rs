//! Core domain logic for mixlist.
//! This crate owns record storage, the merged list, and the editor flow.

pub mod app;
pub mod config;
pub mod db;
pub mod images;
pub mod logging;
pub mod model;
pub mod policy;
pub mod presenter;
pub mod remote;
pub mod repo;
pub mod service;
pub mod store;

pub use app::{App, AppError, Dispatched};
pub use config::{AppConfig, ConfigError};
pub use images::{ImageName, ImageStore, ImageStoreError};
pub use logging::{
    default_log_level, init_logging, logging_status, normalize_log_level, LoggingError,
};
pub use model::kind::{EditorField, RecordKind, UnknownKind};
pub use model::record::{
    FoodItem, ListItem, NewFoodItem, NewPerson, NewQuote, Person, Quote, RecordId, RecordRef,
};
pub use policy::{ImageRetention, InvalidNumber, NumericPolicy};
pub use presenter::{ImageSlot, ListPresenter, ListRow, RowAction, RowActionKind};
pub use remote::quote_client::{FetchError, HttpQuoteSource, QuotePayload, QuoteSource};
pub use repo::record_repo::{
    RecordRepository, RepoError, RepoResult, SqliteRecordRepository, TableRecord,
};
pub use repo::tables::{FoodRepository, PersonRepository, QuoteRepository};
pub use service::editor_service::{
    EditorError, EditorFields, EditorMode, EditorNotice, EditorOptions, EditorSession,
    SaveAction, SaveOutcome,
};
pub use service::list_service::{kind_counts, rebuild, KindCounts};
pub use service::quote_service::QuoteFetcher;
pub use store::{RecordStore, WriteOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
