//! List presenter over the aggregated collection.
//!
//! # Responsibility
//! - Turn list items into display rows.
//! - Map per-row edit/delete taps into `RowAction`s for the caller.
//!
//! # Invariants
//! - Rows always mirror the last collection passed to `show`, except for rows
//!   removed optimistically with `remove_row`.
//! - An empty or dangling image reference renders without an image; it is
//!   never an error.

use crate::model::record::{ListItem, RecordRef};
use log::warn;
use serde::Serialize;
use std::path::PathBuf;

/// Image part of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "path", rename_all = "snake_case")]
pub enum ImageSlot {
    None,
    Path(PathBuf),
    /// Reference set, but the file is gone.
    Missing(PathBuf),
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub record: RecordRef,
    pub title: String,
    pub subtitle: String,
    pub image: ImageSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Edit,
    Delete,
}

/// Intent dispatched back to the caller for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(RecordRef),
    Delete(RecordRef),
}

#[derive(Debug, Clone, Default)]
pub struct ListPresenter {
    items: Vec<ListItem>,
    rows: Vec<ListRow>,
}

impl ListPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything shown with a freshly rebuilt collection.
    pub fn show(&mut self, items: Vec<ListItem>) {
        self.rows = items.iter().map(render_row).collect();
        self.items = items;
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a tap on row `index`; `None` when the index is stale.
    pub fn row_action(&self, index: usize, kind: RowActionKind) -> Option<RowAction> {
        let record = self.rows.get(index)?.record;
        Some(match kind {
            RowActionKind::Edit => RowAction::Edit(record),
            RowActionKind::Delete => RowAction::Delete(record),
        })
    }

    /// Drops a row before its delete completes.
    pub fn remove_row(&mut self, index: usize) -> Option<ListItem> {
        if index >= self.items.len() {
            return None;
        }
        self.rows.remove(index);
        Some(self.items.remove(index))
    }

    /// Formats rows as numbered terminal lines.
    pub fn render_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut line = format!(
                    "{index:>3}. [{} #{}] {} | {}",
                    row.record.kind, row.record.id, row.title, row.subtitle
                );
                match &row.image {
                    ImageSlot::None => {}
                    ImageSlot::Path(path) => line.push_str(&format!(" | image: {}", path.display())),
                    ImageSlot::Missing(_) => line.push_str(" | image: missing"),
                }
                line
            })
            .collect()
    }
}

/// Builds the display row for one item.
pub fn render_row(item: &ListItem) -> ListRow {
    let record = item.record_ref();
    match item {
        ListItem::Person(person) => ListRow {
            record,
            title: person.name.clone(),
            subtitle: person.age.to_string(),
            image: ImageSlot::None,
        },
        ListItem::Food(food) => ListRow {
            record,
            title: food.name.clone(),
            subtitle: format!("{} kcal", food.calories),
            image: match food.image_path() {
                None => ImageSlot::None,
                Some(path) => {
                    let path = PathBuf::from(path);
                    if path.is_file() {
                        ImageSlot::Path(path)
                    } else {
                        warn!(
                            "event=row_image module=presenter status=missing kind=food id={}",
                            food.id
                        );
                        ImageSlot::Missing(path)
                    }
                }
            },
        },
        ListItem::Quote(quote) => ListRow {
            record,
            title: quote.text.clone(),
            subtitle: quote.author.clone(),
            image: ImageSlot::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{render_row, ImageSlot, ListPresenter, RowAction, RowActionKind};
    use crate::model::kind::RecordKind;
    use crate::model::record::{FoodItem, ListItem, Person, Quote, RecordRef};

    fn sample_items() -> Vec<ListItem> {
        vec![
            ListItem::Person(Person {
                id: 1,
                name: "Alice".to_string(),
                age: 30,
            }),
            ListItem::Food(FoodItem {
                id: 1,
                name: "Pizza".to_string(),
                calories: 285,
                image: String::new(),
            }),
            ListItem::Quote(Quote {
                id: 4,
                text: "Less is more.".to_string(),
                author: "Mies".to_string(),
            }),
        ]
    }

    #[test]
    fn food_without_image_renders_no_image() {
        let row = render_row(&sample_items()[1]);
        assert_eq!(row.image, ImageSlot::None);
        assert_eq!(row.subtitle, "285 kcal");
    }

    #[test]
    fn dangling_image_reference_renders_as_missing() {
        let item = ListItem::Food(FoodItem {
            id: 9,
            name: "Soup".to_string(),
            calories: 90,
            image: "/definitely/not/here/food_9.png".to_string(),
        });
        assert!(matches!(render_row(&item).image, ImageSlot::Missing(_)));
    }

    #[test]
    fn row_action_maps_index_to_record() {
        let mut presenter = ListPresenter::new();
        presenter.show(sample_items());

        assert_eq!(
            presenter.row_action(2, RowActionKind::Delete),
            Some(RowAction::Delete(RecordRef {
                kind: RecordKind::Quote,
                id: 4
            }))
        );
        assert_eq!(presenter.row_action(3, RowActionKind::Edit), None);
    }

    #[test]
    fn remove_row_drops_item_and_row_together() {
        let mut presenter = ListPresenter::new();
        presenter.show(sample_items());

        let removed = presenter.remove_row(0).unwrap();
        assert_eq!(removed.kind(), RecordKind::Person);
        assert_eq!(presenter.len(), 2);
        assert_eq!(presenter.items().len(), 2);
        assert!(presenter.remove_row(5).is_none());
    }

    #[test]
    fn render_lines_number_each_row() {
        let mut presenter = ListPresenter::new();
        presenter.show(sample_items());
        let lines = presenter.render_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[user #1] Alice | 30"));
        assert!(lines[1].contains("285 kcal"));
    }
}
