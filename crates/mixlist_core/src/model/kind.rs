//! Record kind tags and per-kind editor field layout.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Closed set of record kinds, in aggregated display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[serde(rename = "user", alias = "person")]
    Person,
    Food,
    Quote,
}

/// Editable form field shown for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorField {
    Name,
    Age,
    Calories,
    Image,
    QuoteText,
    Author,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record kind `{0}`; expected user|food|quote")]
pub struct UnknownKind(pub String);

impl RecordKind {
    /// All kinds in the fixed aggregation order: people, food, quotes.
    pub const ALL: [RecordKind; 3] = [RecordKind::Person, RecordKind::Food, RecordKind::Quote];

    /// Stable string tag used by editor entry points.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Person => "user",
            Self::Food => "food",
            Self::Quote => "quote",
        }
    }

    /// Fields the editor shows for this kind, in form order.
    pub fn visible_fields(self) -> &'static [EditorField] {
        match self {
            Self::Person => &[EditorField::Name, EditorField::Age],
            Self::Food => &[EditorField::Name, EditorField::Calories, EditorField::Image],
            Self::Quote => &[EditorField::QuoteText, EditorField::Author],
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "person" => Ok(Self::Person),
            "food" => Ok(Self::Food),
            "quote" => Ok(Self::Quote),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

impl EditorField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Calories => "calories",
            Self::Image => "image",
            Self::QuoteText => "text",
            Self::Author => "author",
        }
    }
}
