//! Integration tests for add/edit/show/delete/list

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::mixlist_cmd;

#[test]
fn test_list_empty_store() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records"));
}

#[test]
fn test_add_user_then_list() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Alice", "--age", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user #1"));

    mixlist_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[user #1] Alice | 30"));
}

#[test]
fn test_list_orders_people_food_quotes() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "quote", "--text", "Less is more.", "--author", "Mies"])
        .assert()
        .success();
    mixlist_cmd(temp.path())
        .args(["add", "food", "--name", "Pizza", "--calories", "285"])
        .assert()
        .success();
    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Bob", "--age", "41"])
        .assert()
        .success();

    let output = mixlist_cmd(temp.path()).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("[user #1] Bob"));
    assert!(lines[1].contains("[food #1] Pizza | 285 kcal"));
    assert!(lines[2].contains("[quote #1] Less is more. | Mies"));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "food", "--name", "Apple", "--calories", "52"])
        .assert()
        .success();

    let output = mixlist_cmd(temp.path())
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["kind"], "food");
    assert_eq!(items[0]["name"], "Apple");
    assert_eq!(items[0]["image"], "");
}

#[test]
fn test_lenient_number_becomes_zero() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Eve", "--age", "old"])
        .assert()
        .success();

    mixlist_cmd(temp.path())
        .args(["show", "user", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("age: 0"));
}

#[test]
fn test_strict_number_fails_without_writing() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Eve", "--age", "old", "--numeric", "strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid age value"));

    mixlist_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records"));
}

#[test]
fn test_edit_keeps_omitted_fields() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Alice", "--age", "30"])
        .assert()
        .success();

    mixlist_cmd(temp.path())
        .args(["edit", "user", "1", "--age", "31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated user #1"));

    mixlist_cmd(temp.path())
        .args(["show", "user", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Alice"))
        .stdout(predicate::str::contains("age: 31"));
}

#[test]
fn test_edit_missing_record_reports_notice() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["edit", "quote", "5", "--text", "x", "--author", "y"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Quote not found"))
        .stdout(predicate::str::contains("Nothing saved: quote #5 not found"));

    mixlist_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records"));
}

#[test]
fn test_flag_for_other_kind_is_ignored() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "quote", "--text", "t", "--author", "a", "--age", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--age does not apply"));
}

#[test]
fn test_food_image_is_copied() {
    let temp = TempDir::new().unwrap();
    let picked = temp.path().join("picked.jpg");
    fs::write(&picked, b"jpeg").unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "food", "--name", "Toast", "--calories", "80", "--image"])
        .arg(&picked)
        .assert()
        .success();

    let copied: Vec<_> = fs::read_dir(temp.path().join("images"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(copied.len(), 1);
    assert!(copied[0].starts_with("food_"));
    assert!(copied[0].ends_with(".jpg"));

    mixlist_cmd(temp.path())
        .args(["show", "food", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".jpg"));
}

#[test]
fn test_show_missing_record() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["show", "food", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("food #3 not found"));
}

#[test]
fn test_delete_record() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Alice", "--age", "30"])
        .assert()
        .success();

    mixlist_cmd(temp.path())
        .args(["delete", "user", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted user #1"));

    mixlist_cmd(temp.path())
        .args(["delete", "user", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing deleted"));
}

#[test]
fn test_clear_removes_everything() {
    let temp = TempDir::new().unwrap();

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Alice", "--age", "30"])
        .assert()
        .success();
    mixlist_cmd(temp.path())
        .args(["add", "quote", "--text", "t", "--author", "a"])
        .assert()
        .success();

    mixlist_cmd(temp.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all records"));

    mixlist_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records"));
}

#[test]
fn test_db_flag_overrides_data_dir() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("custom.sqlite3");

    mixlist_cmd(temp.path())
        .args(["add", "user", "--name", "Alice", "--age", "30", "--db"])
        .arg(&db)
        .assert()
        .success();

    assert!(db.is_file());
    assert!(!temp.path().join("mixlist.sqlite3").exists());
}
