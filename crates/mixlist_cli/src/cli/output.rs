//! Output formatting utilities

use mixlist_core::{EditorNotice, ListItem, RecordKind, RecordRef, SaveAction, SaveOutcome};

/// Format presenter lines for display
pub fn format_list(lines: &[String]) -> String {
    if lines.is_empty() {
        return "No records".to_string();
    }

    let mut output = String::new();
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// Format one record as `field: value` lines.
pub fn format_item(item: &ListItem) -> String {
    let mut output = format!("{} #{}\n", item.kind(), item.id());
    match item {
        ListItem::Person(person) => {
            output.push_str(&format!("name: {}\n", person.name));
            output.push_str(&format!("age: {}\n", person.age));
        }
        ListItem::Food(food) => {
            output.push_str(&format!("name: {}\n", food.name));
            output.push_str(&format!("calories: {}\n", food.calories));
            output.push_str(&format!(
                "image: {}\n",
                food.image_path().unwrap_or("(none)")
            ));
        }
        ListItem::Quote(quote) => {
            output.push_str(&format!("text: {}\n", quote.text));
            output.push_str(&format!("author: {}\n", quote.author));
        }
    }
    output
}

pub fn format_save(outcome: &SaveOutcome) -> String {
    let record = outcome.record;
    match outcome.action {
        SaveAction::Inserted => format!("Created {} #{}", record.kind, record.id),
        SaveAction::Updated => format!("Updated {} #{}", record.kind, record.id),
        SaveAction::UpdateSkipped => format!("Nothing saved: {}", not_found(record)),
    }
}

pub fn format_notice(notice: &EditorNotice) -> String {
    format!("Notice: {}", notice.message())
}

pub fn not_found(record: RecordRef) -> String {
    format!("{} #{} not found", record.kind, record.id)
}

/// Format the editor layout of a kind.
pub fn format_fields(kind: RecordKind) -> String {
    let mut output = String::new();
    for field in kind.visible_fields() {
        output.push_str(field.label());
        output.push('\n');
    }
    output
}
