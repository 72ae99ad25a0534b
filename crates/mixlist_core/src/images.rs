//! Private image storage for food records.
//!
//! # Responsibility
//! - Copy a picked image into the app-private image directory.
//! - Derive stable file names from a record id or a creation timestamp.
//!
//! # Invariants
//! - Stored file names are `food_<id>.<ext>` or `food_<epoch_ms>.<ext>`.
//! - The source extension is kept; `png` is used when it has none.
//! - Image writes are not transactional with record writes.

use crate::model::record::RecordId;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("picked image `{0}` does not exist")]
    MissingSource(PathBuf),
    #[error("failed to write image `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How the stored file is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageName {
    /// Existing record being edited.
    Record(RecordId),
    /// Record not created yet; named by creation time in epoch milliseconds.
    Timestamp(u128),
}

impl ImageName {
    /// Timestamp name for "now".
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        Self::Timestamp(millis)
    }

    pub fn stem(self) -> String {
        match self {
            Self::Record(id) => format!("food_{id}"),
            Self::Timestamp(millis) => format!("food_{millis}"),
        }
    }
}

/// Directory-backed image store.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` into the store and returns the stored path.
    pub fn persist(&self, source: &Path, name: ImageName) -> Result<PathBuf, ImageStoreError> {
        if !source.is_file() {
            error!("event=image_persist module=images status=error error_code=missing_source");
            return Err(ImageStoreError::MissingSource(source.to_path_buf()));
        }

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_EXTENSION)
            .to_ascii_lowercase();
        let target = self.dir.join(format!("{}.{extension}", name.stem()));

        std::fs::create_dir_all(&self.dir).map_err(|err| io_error(&self.dir, err))?;

        // Re-picking the already stored file must not truncate it.
        if !same_file(source, &target) {
            std::fs::copy(source, &target).map_err(|err| io_error(&target, err))?;
        }

        info!(
            "event=image_persist module=images status=ok file={}",
            target
                .file_name()
                .map(|file| file.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        Ok(target)
    }
}

fn same_file(left: &Path, right: &Path) -> bool {
    match (left.canonicalize(), right.canonicalize()) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ImageStoreError {
    error!(
        "event=image_persist module=images status=error error_code=io_failed error={}",
        source
    );
    ImageStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageName, ImageStore, ImageStoreError};

    #[test]
    fn persist_names_file_after_record_and_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("picked.JPG");
        std::fs::write(&source, b"jpeg-bytes").unwrap();

        let store = ImageStore::new(dir.path().join("images"));
        let stored = store.persist(&source, ImageName::Record(7)).unwrap();

        assert_eq!(stored.file_name().unwrap(), "food_7.jpg");
        assert_eq!(std::fs::read(&stored).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn persist_defaults_to_png_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("picked");
        std::fs::write(&source, b"raw").unwrap();

        let store = ImageStore::new(dir.path());
        let stored = store.persist(&source, ImageName::Timestamp(1700)).unwrap();
        assert_eq!(stored.file_name().unwrap(), "food_1700.png");
    }

    #[test]
    fn persisting_the_stored_file_onto_itself_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let stored = dir.path().join("food_3.png");
        std::fs::write(&stored, b"original").unwrap();

        let again = store.persist(&stored, ImageName::Record(3)).unwrap();
        assert_eq!(std::fs::read(again).unwrap(), b"original");
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        let err = store
            .persist(&dir.path().join("nope.png"), ImageName::Record(1))
            .unwrap_err();
        assert!(matches!(err, ImageStoreError::MissingSource(_)));
    }
}
