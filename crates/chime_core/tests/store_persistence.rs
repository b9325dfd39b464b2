//! File-backed store behavior: wholesale read/write, fail-soft loads and
//! atomic replacement.

use chime_core::{AlarmStore, AlarmTime, JsonFileStore, MemoryStore};
use std::fs;
use tempfile::tempdir;

fn time(value: &str) -> AlarmTime {
    AlarmTime::parse(value).unwrap()
}

#[test]
fn absent_file_loads_as_empty() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    assert!(store.load().is_empty());
}

#[test]
fn append_then_load_preserves_order() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    store.append(&time("7:05:00 AM")).unwrap();
    store.append(&time("12:00:00 PM")).unwrap();
    store.append(&time("11:59:59 PM")).unwrap();

    let listed: Vec<String> = store.load().into_iter().map(String::from).collect();
    assert_eq!(listed, ["7:05:00 AM", "12:00:00 PM", "11:59:59 PM"]);
}

#[test]
fn corrupt_file_loads_as_empty_without_error() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    fs::write(store.path(), "not json").unwrap();

    assert!(store.load().is_empty());
}

#[test]
fn corrupt_memory_value_loads_as_empty_without_error() {
    let store = MemoryStore::with_raw_value("not json");
    assert!(store.load().is_empty());
}

#[test]
fn non_canonical_entries_are_dropped_on_load() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    fs::write(store.path(), r#"["7:05:00 AM", "late for work", "9:30:00 PM"]"#).unwrap();

    let listed: Vec<String> = store.load().into_iter().map(String::from).collect();
    assert_eq!(listed, ["7:05:00 AM", "9:30:00 PM"]);
}

#[test]
fn remove_deletes_first_value_match_and_missing_is_noop() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.append(&time("7:05:00 AM")).unwrap();
    store.append(&time("7:05:00 AM")).unwrap();

    store.remove(&time("7:05:00 AM")).unwrap();
    assert_eq!(store.load().len(), 1);

    store.remove(&time("3:33:33 AM")).unwrap();
    assert_eq!(store.load().len(), 1);
}

#[test]
fn writes_leave_no_temp_file_behind() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.append(&time("7:05:00 AM")).unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "stale temp files: {leftovers:?}");
}

#[test]
fn persisted_value_is_a_plain_json_array_of_strings() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.append(&time("7:05:00 AM")).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, r#"["7:05:00 AM"]"#);
}
