//! Aggregated list rebuild.
//!
//! # Invariants
//! - Kind order is fixed: people, then food, then quotes.
//! - Within a kind, order is the store's retrieval order.
//! - Every call builds a fresh collection; nothing is diffed or cached.

use crate::model::kind::RecordKind;
use crate::model::record::{FoodItem, ListItem, Person, Quote};
use crate::repo::record_repo::RepoResult;
use crate::store::RecordStore;
use log::debug;

/// Per-kind totals of one rebuilt collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub people: usize,
    pub food: usize,
    pub quotes: usize,
}

impl KindCounts {
    pub fn total(&self) -> usize {
        self.people + self.food + self.quotes
    }
}

/// Rebuilds the aggregated display collection from the store.
pub fn rebuild(store: &RecordStore) -> RepoResult<Vec<ListItem>> {
    let people = store.get_all::<Person>()?;
    let food = store.get_all::<FoodItem>()?;
    let quotes = store.get_all::<Quote>()?;

    let mut items = Vec::with_capacity(people.len() + food.len() + quotes.len());
    items.extend(people.into_iter().map(ListItem::Person));
    items.extend(food.into_iter().map(ListItem::Food));
    items.extend(quotes.into_iter().map(ListItem::Quote));

    let counts = kind_counts(&items);
    debug!(
        "event=list_rebuild module=service status=ok people={} food={} quotes={}",
        counts.people, counts.food, counts.quotes
    );
    Ok(items)
}

/// Counts items per kind.
pub fn kind_counts(items: &[ListItem]) -> KindCounts {
    items
        .iter()
        .fold(KindCounts::default(), |mut counts, item| {
            match item.kind() {
                RecordKind::Person => counts.people += 1,
                RecordKind::Food => counts.food += 1,
                RecordKind::Quote => counts.quotes += 1,
            }
            counts
        })
}
