//! End-to-end integration tests
//!
//! Exercises the complete flow: file on disk -> load -> typed reads ->
//! merge-write -> reload.

use chrono::NaiveDate;
use lineconf_format::{Document, Value};
use lineconf_fs::{ConfPath, ConfStore, Error};
use lineconf_test_utils::TestConf;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Barrier};
use std::thread;

const LEGACY: &str = "\
# Legacy settings written by an older release
title: Example
lines: 11

authors:
- Ada
- Grace
notes: \"first line
second line\"
released: 2019-12-31
";

fn setup() -> (TestConf, ConfPath) {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.write("settings.lconf", LEGACY)).unwrap();
    (conf, path)
}

#[test]
fn test_legacy_file_read_and_extended() {
    let (conf, path) = setup();
    let store = ConfStore::new();

    let doc = store.load(&path).unwrap();
    assert_eq!(doc.get_list("authors").unwrap(), vec!["Ada", "Grace"]);
    assert_eq!(doc.get_str("notes").unwrap(), "first line\nsecond line");
    assert_eq!(
        doc.get_date("released").unwrap(),
        NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()
    );

    let mut pending = Document::new();
    pending.insert("reviewers", vec!["Linus"]);
    pending.insert("lines", 12_i64);
    let report = store.write(&path, &pending).unwrap();

    assert_eq!(report.appended, vec!["reviewers"]);
    assert_eq!(report.skipped, vec!["lines"]);

    // Legacy lines untouched, new entry in the current one-line format
    assert_eq!(conf.read("settings.lconf"), format!("{LEGACY}reviewers: Linus,\n"));

    let reloaded = store.load(&path).unwrap();
    assert_eq!(reloaded.get_int("lines").unwrap(), 11);
    assert_eq!(reloaded.get("reviewers"), Some(&Value::from(vec!["Linus"])));
    for (key, value) in doc.iter() {
        assert_eq!(reloaded.get(key), Some(value), "key {key}");
    }
}

#[test]
fn test_read_modify_write_under_contention() {
    let (_conf, path) = setup();
    let path = Arc::new(path);
    let store = Arc::new(ConfStore::new());

    let num_threads = 6;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let path = Arc::clone(&path);
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                // Each caller claims the next free counter slot
                store
                    .update(&path, |current| {
                        let next = (0..).find(|i| !current.contains_key(&format!("slot{i}"))).unwrap();
                        [(format!("slot{next}"), "taken")].into_iter().collect()
                    })
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let report = handle.join().expect("Thread should not panic");
        assert_eq!(report.appended.len(), 1);
    }

    let doc = store.load(&path).unwrap();
    for i in 0..num_threads {
        assert_eq!(doc.get_str(&format!("slot{i}")).unwrap(), "taken");
    }
}

#[test]
fn test_error_taxonomy() {
    let conf = TestConf::new();
    let store = ConfStore::new();

    assert!(matches!(
        ConfPath::new(conf.path("settings.txt")),
        Err(Error::UnsupportedExtension { .. })
    ));

    let missing = ConfPath::new(conf.path("missing.lconf")).unwrap();
    assert!(store.load(&missing).unwrap_err().is_not_found());

    let bad = ConfPath::new(conf.write("bad.lconf", "fine: 1\nnot fine\n")).unwrap();
    assert!(matches!(store.load(&bad), Err(Error::Parse { .. })));

    let (_conf, path) = setup();
    assert!(matches!(
        store.get_int(&path, "title"),
        Err(Error::Value(lineconf_format::Error::TypeConversion { .. }))
    ));
    assert!(matches!(
        store.get_int(&path, "absent"),
        Err(Error::Value(lineconf_format::Error::KeyNotFound { .. }))
    ));
}
