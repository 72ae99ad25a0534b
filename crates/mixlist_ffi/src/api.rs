//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list, editor, delete and quote-fetch use-cases to Dart via FRB.
//! - Flatten core results into plain envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call opens the store, runs one use-case, and closes it again.
//! - Configuration is resolved from `MIXLIST_*` once per process.

use log::warn;
use mixlist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, App, AppConfig,
    EditorField, EditorMode, EditorSession, ImageSlot, RecordKind, RecordRef, SaveAction,
    WriteOutcome,
};
use std::sync::OnceLock;

static FFI_CONFIG: OnceLock<Result<AppConfig, String>> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    if log_dir.trim().is_empty() {
        return "log_dir must not be empty".to_string();
    }
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of the aggregated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    /// Kind tag (`user|food|quote`).
    pub kind: String,
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    /// Image file to show; `None` renders no image.
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    pub ok: bool,
    pub items: Vec<ListItemView>,
    pub message: String,
}

/// One editor form field with its current raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFieldView {
    /// Stable key (`name|age|calories|image|text|author`).
    pub key: String,
    pub value: String,
}

/// State for opening the editor screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorLoadResponse {
    pub ok: bool,
    /// True when editing an existing id, even if the record was not found.
    pub is_edit: bool,
    /// Visible fields, in form order.
    pub fields: Vec<EditorFieldView>,
    /// Transient message to show (for example `User not found`).
    pub notice: Option<String>,
    pub message: String,
}

/// Raw editor input from the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorInput {
    pub name: String,
    pub age: String,
    pub calories: String,
    pub quote_text: String,
    pub author: String,
    /// File chosen by the image picker, if any.
    pub image_source: Option<String>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected record ID, when there is one.
    pub record_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, record_id: i64) -> Self {
        Self {
            ok: true,
            record_id: Some(record_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Rebuilds and returns the aggregated list: people, food, then quotes.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_items() -> ListResponse {
    let rows = with_app(|app| {
        let presenter = app.refresh().map_err(|err| err.to_string())?;
        Ok(presenter.rows().iter().map(to_list_item_view).collect::<Vec<_>>())
    });

    match rows {
        Ok(items) => {
            let message = if items.is_empty() {
                "No records.".to_string()
            } else {
                format!("Found {} record(s).", items.len())
            };
            ListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => ListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("list_items failed: {err}"),
        },
    }
}

/// Opens the editor for `kind`; `id = None` creates, `Some` edits.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A missing record is not a failure: `ok` stays true, fields are empty,
///   and `notice` carries the message.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_load(kind: String, id: Option<i64>) -> EditorLoadResponse {
    let loaded = parse_kind(&kind).and_then(|kind| {
        with_app(|app| match id {
            None => Ok((app.begin_create(kind), None)),
            Some(id) => app
                .begin_edit(RecordRef { kind, id })
                .map_err(|err| err.to_string()),
        })
    });

    match loaded {
        Ok((session, notice)) => EditorLoadResponse {
            ok: true,
            is_edit: matches!(session.mode(), EditorMode::Edit(_)),
            fields: to_field_views(&session),
            notice: notice.map(|notice| notice.message()),
            message: "Editor ready.".to_string(),
        },
        Err(err) => EditorLoadResponse {
            ok: false,
            is_edit: id.is_some(),
            fields: Vec::new(),
            notice: None,
            message: format!("editor_load failed: {err}"),
        },
    }
}

/// Saves editor input as one insert (`id = None`) or one update.
///
/// # FFI contract
/// - Sync call, DB-backed execution; copies the picked image when present.
/// - Never panics.
/// - Returns the record ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_save(kind: String, id: Option<i64>, input: EditorInput) -> ActionResponse {
    let saved = parse_kind(&kind).and_then(|kind| {
        with_app(|app| {
            let mut session = match id {
                None => app.begin_create(kind),
                Some(id) => {
                    app.begin_edit(RecordRef { kind, id })
                        .map_err(|err| err.to_string())?
                        .0
                }
            };
            apply_input(&mut session, input);
            app.save(session).map_err(|err| err.to_string())
        })
    });

    match saved {
        Ok(outcome) => match outcome.action {
            SaveAction::Inserted => ActionResponse::success("Record created.", outcome.record.id),
            SaveAction::Updated => ActionResponse::success("Record updated.", outcome.record.id),
            SaveAction::UpdateSkipped => ActionResponse::failure(format!(
                "{} #{} not found; nothing saved.",
                outcome.record.kind, outcome.record.id
            )),
        },
        Err(err) => ActionResponse::failure(format!("editor_save failed: {err}")),
    }
}

/// Deletes one record.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Deleting a missing record is a no-op reported with `ok = false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_item(kind: String, id: i64) -> ActionResponse {
    let deleted = parse_kind(&kind).and_then(|kind| {
        with_app(|app| {
            app.delete_record(RecordRef { kind, id })
                .map_err(|err| err.to_string())
        })
    });

    match deleted {
        Ok(WriteOutcome::Applied) => ActionResponse::success("Record deleted.", id),
        Ok(WriteOutcome::NotFound) => {
            ActionResponse::failure(format!("{kind} #{id} not found; nothing deleted."))
        }
        Err(err) => ActionResponse::failure(format!("delete_item failed: {err}")),
    }
}

/// Fetches one random quote and stores it.
///
/// # FFI contract
/// - Sync call; blocks on one HTTP request (bounded by the configured timeout).
/// - Network failures are logged in core and reported with `ok = false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn fetch_quote() -> ActionResponse {
    match with_app(|app| Ok(app.refresh_from_network())) {
        Ok(Some(quote)) => ActionResponse::success("Quote fetched.", quote.id),
        Ok(None) => ActionResponse::failure("Could not fetch a quote."),
        Err(err) => ActionResponse::failure(format!("fetch_quote failed: {err}")),
    }
}

fn resolve_config() -> Result<&'static AppConfig, String> {
    FFI_CONFIG
        .get_or_init(|| AppConfig::from_env().map_err(|err| err.to_string()))
        .as_ref()
        .map_err(Clone::clone)
}

fn with_app<T>(f: impl FnOnce(&mut App) -> Result<T, String>) -> Result<T, String> {
    let config = resolve_config()?;
    let mut app = App::open(config).map_err(|err| format!("store open failed: {err}"))?;
    let result = f(&mut app);
    if let Err(err) = app.close() {
        warn!("event=store_close module=ffi status=error error={}", err);
    }
    result
}

fn parse_kind(kind: &str) -> Result<RecordKind, String> {
    kind.parse().map_err(|err: mixlist_core::UnknownKind| err.to_string())
}

fn apply_input(session: &mut EditorSession, input: EditorInput) {
    let fields = session.fields_mut();
    fields.name = input.name;
    fields.age = input.age;
    fields.calories = input.calories;
    fields.quote_text = input.quote_text;
    fields.author = input.author;
    if let Some(source) = input.image_source.filter(|source| !source.trim().is_empty()) {
        session.select_image(source);
    }
}

fn to_field_views(session: &EditorSession) -> Vec<EditorFieldView> {
    session
        .visible_fields()
        .iter()
        .map(|&field| EditorFieldView {
            key: field.label().to_string(),
            value: match field {
                EditorField::Image => session
                    .preview_image()
                    .map(|path| path.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                other => session.fields().get(other).unwrap_or_default().to_string(),
            },
        })
        .collect()
}

fn to_list_item_view(row: &mixlist_core::ListRow) -> ListItemView {
    ListItemView {
        kind: row.record.kind.tag().to_string(),
        id: row.record.id,
        title: row.title.clone(),
        subtitle: row.subtitle.clone(),
        image_path: match &row.image {
            ImageSlot::Path(path) => Some(path.to_string_lossy().into_owned()),
            ImageSlot::None | ImageSlot::Missing(_) => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, delete_item, editor_load, editor_save, init_logging, list_items,
        EditorInput,
    };
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static DATA_DIR: OnceLock<TempDir> = OnceLock::new();

    /// Points the bridge at a private data directory before its config is
    /// resolved; every store-backed test calls this first.
    fn isolated_data_dir() {
        DATA_DIR.get_or_init(|| {
            let dir = tempfile::Builder::new()
                .prefix("mixlist-ffi")
                .tempdir()
                .expect("create test data dir");
            for var in ["MIXLIST_DB_PATH", "MIXLIST_IMAGE_DIR", "MIXLIST_QUOTE_BASE_URL"] {
                std::env::remove_var(var);
            }
            std::env::set_var("MIXLIST_DATA_DIR", dir.path());
            dir
        });
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn editor_save_then_list_contains_person() {
        isolated_data_dir();
        let name = unique_token("ffi-person");
        let saved = editor_save(
            "user".to_string(),
            None,
            EditorInput {
                name: name.clone(),
                age: "30".to_string(),
                ..EditorInput::default()
            },
        );
        assert!(saved.ok, "{}", saved.message);
        let id = saved.record_id.expect("insert should return record_id");

        let list = list_items();
        assert!(list.ok, "{}", list.message);
        assert!(list
            .items
            .iter()
            .any(|item| item.kind == "user" && item.id == id && item.title == name));
    }

    #[test]
    fn editor_load_prefills_existing_food() {
        isolated_data_dir();
        let name = unique_token("ffi-food");
        let saved = editor_save(
            "food".to_string(),
            None,
            EditorInput {
                name: name.clone(),
                calories: "120".to_string(),
                ..EditorInput::default()
            },
        );
        let id = saved.record_id.expect("insert should return record_id");

        let loaded = editor_load("food".to_string(), Some(id));
        assert!(loaded.ok, "{}", loaded.message);
        assert!(loaded.is_edit);
        assert!(loaded.notice.is_none());
        let keys: Vec<_> = loaded.fields.iter().map(|field| field.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "calories", "image"]);
        assert_eq!(loaded.fields[0].value, name);
        assert_eq!(loaded.fields[1].value, "120");
        assert_eq!(loaded.fields[2].value, "");
    }

    #[test]
    fn editor_load_missing_record_returns_notice() {
        isolated_data_dir();
        let loaded = editor_load("quote".to_string(), Some(i64::MAX));
        assert!(loaded.ok, "{}", loaded.message);
        assert!(loaded.is_edit);
        assert_eq!(loaded.notice.as_deref(), Some("Quote not found"));
        assert!(loaded.fields.iter().all(|field| field.value.is_empty()));
    }

    #[test]
    fn unknown_kind_fails_without_panicking() {
        isolated_data_dir();
        let loaded = editor_load("car".to_string(), None);
        assert!(!loaded.ok);
        assert!(loaded.message.contains("unknown record kind"));

        let deleted = delete_item("car".to_string(), 1);
        assert!(!deleted.ok);
    }

    #[test]
    fn delete_item_removes_then_reports_missing() {
        isolated_data_dir();
        let saved = editor_save(
            "quote".to_string(),
            None,
            EditorInput {
                quote_text: unique_token("ffi-quote"),
                author: "Anon".to_string(),
                ..EditorInput::default()
            },
        );
        let id = saved.record_id.expect("insert should return record_id");

        let first = delete_item("quote".to_string(), id);
        assert!(first.ok, "{}", first.message);
        let second = delete_item("quote".to_string(), id);
        assert!(!second.ok);
        assert!(second.message.contains("not found"));
    }

    #[test]
    fn list_items_reads_from_configured_data_dir() {
        isolated_data_dir();
        let list = list_items();
        assert!(list.ok, "{}", list.message);

        let db_path = DATA_DIR.get().expect("data dir set").path().join("mixlist.sqlite3");
        assert!(db_path.is_file());
    }

    #[test]
    fn editor_save_on_missing_food_leaves_no_image_file() {
        isolated_data_dir();
        let picked = DATA_DIR.get().expect("data dir set").path().join("picked.png");
        std::fs::write(&picked, b"png").expect("write picked image");

        let response = editor_save(
            "food".to_string(),
            Some(i64::MAX),
            EditorInput {
                name: "ghost".to_string(),
                calories: "1".to_string(),
                image_source: Some(picked.to_string_lossy().into_owned()),
                ..EditorInput::default()
            },
        );

        assert!(!response.ok);
        let image_dir = DATA_DIR.get().expect("data dir set").path().join("images");
        assert!(!image_dir.join(format!("food_{}.png", i64::MAX)).exists());
    }

    #[test]
    fn editor_save_on_missing_id_writes_nothing() {
        isolated_data_dir();
        let response = editor_save(
            "user".to_string(),
            Some(i64::MAX),
            EditorInput {
                name: "ghost".to_string(),
                age: "1".to_string(),
                ..EditorInput::default()
            },
        );
        assert!(!response.ok);
        assert!(response.message.contains("not found"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
