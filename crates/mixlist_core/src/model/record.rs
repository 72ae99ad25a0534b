//! Stored record shapes, insert drafts, and the merged list union.
//!
//! # Invariants
//! - `id` is issued by the store on insert and never changes afterwards.
//! - An empty `FoodItem::image` means "no image".

use super::kind::RecordKind;
use serde::{Deserialize, Serialize};

/// Store-issued identifier, unique within one record kind.
pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: RecordId,
    pub name: String,
    /// Expected to be non-negative; not validated.
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: RecordId,
    pub name: String,
    pub calories: i32,
    /// Path of the persisted image, or empty for none.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: RecordId,
    pub text: String,
    pub author: String,
}

/// Person fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub age: i32,
}

/// Food fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFoodItem {
    pub name: String,
    pub calories: i32,
    pub image: String,
}

/// Quote fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
}

impl NewPerson {
    pub fn into_record(self, id: RecordId) -> Person {
        Person {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

impl NewFoodItem {
    pub fn into_record(self, id: RecordId) -> FoodItem {
        FoodItem {
            id,
            name: self.name,
            calories: self.calories,
            image: self.image,
        }
    }
}

impl NewQuote {
    pub fn into_record(self, id: RecordId) -> Quote {
        Quote {
            id,
            text: self.text,
            author: self.author,
        }
    }
}

impl FoodItem {
    /// Returns the image path when one is set.
    pub fn image_path(&self) -> Option<&str> {
        let trimmed = self.image.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Address of one stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub kind: RecordKind,
    pub id: RecordId,
}

/// One entry of the aggregated display collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListItem {
    #[serde(rename = "user", alias = "person")]
    Person(Person),
    Food(FoodItem),
    Quote(Quote),
}

impl ListItem {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Person(_) => RecordKind::Person,
            Self::Food(_) => RecordKind::Food,
            Self::Quote(_) => RecordKind::Quote,
        }
    }

    pub fn id(&self) -> RecordId {
        match self {
            Self::Person(person) => person.id,
            Self::Food(food) => food.id,
            Self::Quote(quote) => quote.id,
        }
    }

    pub fn record_ref(&self) -> RecordRef {
        RecordRef {
            kind: self.kind(),
            id: self.id(),
        }
    }
}

impl From<Person> for ListItem {
    fn from(value: Person) -> Self {
        Self::Person(value)
    }
}

impl From<FoodItem> for ListItem {
    fn from(value: FoodItem) -> Self {
        Self::Food(value)
    }
}

impl From<Quote> for ListItem {
    fn from(value: Quote) -> Self {
        Self::Quote(value)
    }
}
