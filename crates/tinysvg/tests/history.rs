// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tinysvg::history::{FileStorage, History, Storage};
use tinysvg::Session;

fn optimized_session(name: &str) -> Session {
    let input_svg = std::fs::read_to_string(format!("tests/files/{}.svg", name)).unwrap();
    let mut session = Session::new();
    session.set_original(input_svg, format!("{}.svg", name));
    session.optimize().unwrap();
    session
}

#[test]
fn file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().join("history"));

    assert_eq!(storage.get_item("entries").unwrap(), None);
    storage.set_item("entries", "[]").unwrap();
    assert_eq!(storage.get_item("entries").unwrap().as_deref(), Some("[]"));
    assert!(dir.path().join("history/entries.json").exists());

    storage.remove_item("entries").unwrap();
    assert_eq!(storage.get_item("entries").unwrap(), None);
    storage.remove_item("entries").unwrap();
}

#[test]
fn persisted_between_instances() {
    let dir = tempfile::tempdir().unwrap();

    let session = optimized_session("close-icon");
    let id = {
        let mut history = History::new(FileStorage::new(dir.path()));
        history.save(session.history_entry().unwrap()).unwrap()
    };

    let history = History::new(FileStorage::new(dir.path()));
    let entry = history.get(&id).unwrap().unwrap();
    assert_eq!(entry.file_name, "close-icon.svg");
    assert_eq!(entry.compressed_svg, session.compressed);
    assert_eq!(entry.original_size, session.original.len());
    assert_eq!(entry.config, session.options());
}

#[test]
fn camel_case_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = History::new(FileStorage::new(dir.path()));
    history.save(optimized_session("close-icon").history_entry().unwrap()).unwrap();

    let json = std::fs::read_to_string(dir.path().join("entries.json")).unwrap();
    assert!(json.contains("\"fileName\":\"close-icon.svg\""));
    assert!(json.contains("\"compressedSize\":"));
    assert!(json.contains("\"floatPrecision\":2"));
}

#[test]
fn duplicate_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = History::new(FileStorage::new(dir.path()));

    let session = optimized_session("close-icon");
    history.save(session.history_entry().unwrap()).unwrap();
    history.save(session.history_entry().unwrap()).unwrap();
    history.save(optimized_session("two-colors").history_entry().unwrap()).unwrap();

    let names: Vec<_> = history.all().unwrap().into_iter().map(|e| e.file_name).collect();
    assert_eq!(names, ["two-colors.svg", "close-icon.svg"]);

    history.clear().unwrap();
    assert_eq!(history.count().unwrap(), 0);
    assert!(!dir.path().join("entries.json").exists());
}
