//! Create-or-update editor flow for a single record.
//!
//! # Responsibility
//! - Load a record into raw form fields (Edit) or start blank (Create).
//! - Persist an optional picked image for food records.
//! - Perform exactly one store write on save.
//!
//! # Invariants
//! - A missing record on Edit yields a notice and empty fields; the session
//!   stays in Edit mode.
//! - Numeric fields go through the configured `NumericPolicy`.
//! - Without a newly picked image, an edit follows `ImageRetention`.
//! - A failed image write never blocks the save; the reference becomes empty.

use crate::images::{ImageName, ImageStore};
use crate::model::kind::{EditorField, RecordKind};
use crate::model::record::{
    FoodItem, NewFoodItem, NewPerson, NewQuote, Person, Quote, RecordId, RecordRef,
};
use crate::policy::{ImageRetention, InvalidNumber, NumericPolicy};
use crate::repo::record_repo::{RepoError, RepoResult, TableRecord};
use crate::store::{RecordStore, WriteOutcome};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("invalid {} value: {source}", .field.label())]
    InvalidNumber {
        field: EditorField,
        source: InvalidNumber,
    },
}

/// Whether the session creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RecordId),
}

/// Transient, user-visible message raised while opening a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorNotice {
    NotFound(RecordRef),
}

impl EditorNotice {
    pub fn message(&self) -> String {
        match self {
            Self::NotFound(record) => {
                let label = match record.kind {
                    RecordKind::Person => "User",
                    RecordKind::Food => "Food",
                    RecordKind::Quote => "Quote",
                };
                format!("{label} not found")
            }
        }
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorFields {
    pub name: String,
    pub age: String,
    pub calories: String,
    pub quote_text: String,
    pub author: String,
}

impl EditorFields {
    pub fn get(&self, field: EditorField) -> Option<&str> {
        match field {
            EditorField::Name => Some(&self.name),
            EditorField::Age => Some(&self.age),
            EditorField::Calories => Some(&self.calories),
            EditorField::QuoteText => Some(&self.quote_text),
            EditorField::Author => Some(&self.author),
            EditorField::Image => None,
        }
    }

    /// Sets a text field; `EditorField::Image` is not a text field and is ignored.
    pub fn set(&mut self, field: EditorField, value: impl Into<String>) {
        let slot = match field {
            EditorField::Name => &mut self.name,
            EditorField::Age => &mut self.age,
            EditorField::Calories => &mut self.calories,
            EditorField::QuoteText => &mut self.quote_text,
            EditorField::Author => &mut self.author,
            EditorField::Image => return,
        };
        *slot = value.into();
    }
}

/// Policies applied on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    pub numeric_policy: NumericPolicy,
    pub image_retention: ImageRetention,
}

/// What the single store write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Inserted,
    Updated,
    /// The edited record no longer exists; nothing changed.
    UpdateSkipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub record: RecordRef,
    pub action: SaveAction,
}

/// One open editor screen.
#[derive(Debug, Clone)]
pub struct EditorSession {
    kind: RecordKind,
    mode: EditorMode,
    fields: EditorFields,
    stored_image: String,
    picked_image: Option<PathBuf>,
    options: EditorOptions,
    /// Edit mode only: whether `open` found the record.
    loaded: bool,
}

impl EditorSession {
    /// Starts a blank Create session.
    pub fn create(kind: RecordKind, options: EditorOptions) -> Self {
        Self {
            kind,
            mode: EditorMode::Create,
            fields: EditorFields::default(),
            stored_image: String::new(),
            picked_image: None,
            options,
            loaded: false,
        }
    }

    /// Opens a session: Create when `id` is `None`, Edit otherwise.
    ///
    /// A missing record is not an error; it comes back as a notice.
    pub fn open(
        store: &RecordStore,
        kind: RecordKind,
        id: Option<RecordId>,
        options: EditorOptions,
    ) -> RepoResult<(Self, Option<EditorNotice>)> {
        let mut session = Self::create(kind, options);
        let Some(id) = id else {
            return Ok((session, None));
        };
        session.mode = EditorMode::Edit(id);

        let found = match kind {
            RecordKind::Person => store.get_by_id::<Person>(id)?.map(|person| {
                session.fields.name = person.name;
                session.fields.age = person.age.to_string();
            }),
            RecordKind::Food => store.get_by_id::<FoodItem>(id)?.map(|food| {
                session.fields.name = food.name;
                session.fields.calories = food.calories.to_string();
                session.stored_image = food.image;
            }),
            RecordKind::Quote => store.get_by_id::<Quote>(id)?.map(|quote| {
                session.fields.quote_text = quote.text;
                session.fields.author = quote.author;
            }),
        };

        if found.is_some() {
            session.loaded = true;
            return Ok((session, None));
        }

        warn!(
            "event=editor_open module=service status=not_found kind={} id={}",
            kind, id
        );
        Ok((session, Some(EditorNotice::NotFound(RecordRef { kind, id }))))
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn fields(&self) -> &EditorFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EditorFields {
        &mut self.fields
    }

    pub fn visible_fields(&self) -> &'static [EditorField] {
        self.kind.visible_fields()
    }

    /// Image the editor should preview: the picked file, else the stored one.
    pub fn preview_image(&self) -> Option<&Path> {
        match &self.picked_image {
            Some(path) => Some(path.as_path()),
            None if !self.stored_image.is_empty() => Some(Path::new(&self.stored_image)),
            None => None,
        }
    }

    /// Records an image chosen by the external picker.
    pub fn select_image(&mut self, source: impl Into<PathBuf>) {
        self.picked_image = Some(source.into());
    }

    /// Performs the single insert or update and closes the session.
    ///
    /// An Edit session whose record was not found writes nothing, not even
    /// the picked image.
    pub fn save(self, store: &RecordStore, images: &ImageStore) -> Result<SaveOutcome, EditorError> {
        if let EditorMode::Edit(id) = self.mode {
            if !self.loaded {
                warn!(
                    "event=editor_save module=service status=skipped kind={} id={} error_code=not_found",
                    self.kind, id
                );
                return Ok(SaveOutcome {
                    record: RecordRef {
                        kind: self.kind,
                        id,
                    },
                    action: SaveAction::UpdateSkipped,
                });
            }
        }

        let outcome = match self.kind {
            RecordKind::Person => {
                let age = self.parse_number(EditorField::Age, &self.fields.age)?;
                let draft = NewPerson {
                    name: self.fields.name.clone(),
                    age,
                };
                self.write(store, draft, NewPerson::into_record)?
            }
            RecordKind::Food => {
                let calories = self.parse_number(EditorField::Calories, &self.fields.calories)?;
                let draft = NewFoodItem {
                    name: self.fields.name.clone(),
                    calories,
                    image: self.resolve_image(images),
                };
                self.write(store, draft, NewFoodItem::into_record)?
            }
            RecordKind::Quote => {
                let draft = NewQuote {
                    text: self.fields.quote_text.clone(),
                    author: self.fields.author.clone(),
                };
                self.write(store, draft, NewQuote::into_record)?
            }
        };

        info!(
            "event=editor_save module=service status=ok kind={} id={} action={:?}",
            outcome.record.kind, outcome.record.id, outcome.action
        );
        Ok(outcome)
    }

    fn write<R, D>(
        &self,
        store: &RecordStore,
        draft: D,
        into_record: impl FnOnce(D, RecordId) -> R,
    ) -> RepoResult<SaveOutcome>
    where
        R: TableRecord<Draft = D>,
    {
        let (id, action) = match self.mode {
            EditorMode::Create => (store.insert::<R>(&draft)?, SaveAction::Inserted),
            EditorMode::Edit(id) => {
                let action = match store.update(&into_record(draft, id))? {
                    WriteOutcome::Applied => SaveAction::Updated,
                    WriteOutcome::NotFound => SaveAction::UpdateSkipped,
                };
                (id, action)
            }
        };

        Ok(SaveOutcome {
            record: RecordRef {
                kind: self.kind,
                id,
            },
            action,
        })
    }

    fn parse_number(&self, field: EditorField, raw: &str) -> Result<i32, EditorError> {
        self.options
            .numeric_policy
            .parse(raw)
            .map_err(|source| EditorError::InvalidNumber { field, source })
    }

    fn resolve_image(&self, images: &ImageStore) -> String {
        let Some(picked) = &self.picked_image else {
            return match (self.mode, self.options.image_retention) {
                (EditorMode::Edit(_), ImageRetention::Preserve) => self.stored_image.clone(),
                _ => String::new(),
            };
        };

        let name = match self.mode {
            EditorMode::Create => ImageName::now(),
            EditorMode::Edit(id) => ImageName::Record(id),
        };
        match images.persist(picked, name) {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(err) => {
                error!(
                    "event=editor_image module=service status=error kind={} error={}",
                    self.kind, err
                );
                String::new()
            }
        }
    }
}
