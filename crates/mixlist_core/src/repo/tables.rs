//! Table mappings for the three record kinds.

use super::record_repo::{get_i32, RepoResult, SqliteRecordRepository, TableRecord};
use crate::model::kind::RecordKind;
use crate::model::record::{FoodItem, NewFoodItem, NewPerson, NewQuote, Person, Quote, RecordId};
use rusqlite::types::Value;
use rusqlite::Row;

pub type PersonRepository<'conn> = SqliteRecordRepository<'conn, Person>;
pub type FoodRepository<'conn> = SqliteRecordRepository<'conn, FoodItem>;
pub type QuoteRepository<'conn> = SqliteRecordRepository<'conn, Quote>;

impl TableRecord for Person {
    type Draft = NewPerson;

    const KIND: RecordKind = RecordKind::Person;
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["name", "age"];

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn draft_values(draft: &NewPerson) -> Vec<Value> {
        vec![
            Value::Text(draft.name.clone()),
            Value::Integer(i64::from(draft.age)),
        ]
    }

    fn record_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(i64::from(self.age)),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: get_i32(row, Self::TABLE, "age")?,
        })
    }
}

impl TableRecord for FoodItem {
    type Draft = NewFoodItem;

    const KIND: RecordKind = RecordKind::Food;
    const TABLE: &'static str = "food";
    const COLUMNS: &'static [&'static str] = &["name", "calories", "image"];

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn draft_values(draft: &NewFoodItem) -> Vec<Value> {
        vec![
            Value::Text(draft.name.clone()),
            Value::Integer(i64::from(draft.calories)),
            Value::Text(draft.image.clone()),
        ]
    }

    fn record_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(i64::from(self.calories)),
            Value::Text(self.image.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            calories: get_i32(row, Self::TABLE, "calories")?,
            image: row.get("image")?,
        })
    }
}

impl TableRecord for Quote {
    type Draft = NewQuote;

    const KIND: RecordKind = RecordKind::Quote;
    const TABLE: &'static str = "quotes";
    const COLUMNS: &'static [&'static str] = &["text", "author"];

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn draft_values(draft: &NewQuote) -> Vec<Value> {
        vec![
            Value::Text(draft.text.clone()),
            Value::Text(draft.author.clone()),
        ]
    }

    fn record_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.text.clone()),
            Value::Text(self.author.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            text: row.get("text")?,
            author: row.get("author")?,
        })
    }
}
