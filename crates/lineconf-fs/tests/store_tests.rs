//! Tests for ConfStore entry points

use chrono::NaiveDate;
use lineconf_format::{Document, TargetType, TypedValue, Value};
use lineconf_fs::{ConfPath, ConfStore, Error};
use lineconf_test_utils::TestConf;
use pretty_assertions::assert_eq;

const SAMPLE: &str = "# sample\ntitle: Example\nlines: 11\ncollection: item1, item2\nreleased: 2021-04-05\n";

fn setup() -> (TestConf, ConfPath) {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.write("app.lconf", SAMPLE)).unwrap();
    (conf, path)
}

#[test]
fn test_load_parses_file() {
    let (_conf, path) = setup();
    let doc = ConfStore::new().load(&path).unwrap();

    assert_eq!(doc.get("title"), Some(&Value::from("Example")));
    assert_eq!(doc.get("lines"), Some(&Value::from("11")));
    assert_eq!(doc.get("collection"), Some(&Value::from(vec!["item1", "item2"])));
}

#[test]
fn test_load_missing_file_is_not_found() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.path("missing.lconf")).unwrap();

    let err = ConfStore::new().load(&path).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}

#[test]
fn test_load_malformed_file_is_parse_error() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.write("bad.lconf", "a: 1\nbroken line\n")).unwrap();

    let err = ConfStore::new().load(&path).unwrap_err();
    match err {
        Error::Parse { source, .. } => {
            assert!(matches!(source, lineconf_format::Error::Format { line: 2, .. }));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_exists() {
    let (conf, path) = setup();
    let store = ConfStore::new();

    assert!(store.exists(&path));
    let missing = ConfPath::new(conf.path("other.lconf")).unwrap();
    assert!(!store.exists(&missing));
}

#[test]
fn test_typed_reads() {
    let (_conf, path) = setup();
    let store = ConfStore::new();

    assert_eq!(store.get_int(&path, "lines").unwrap(), 11);
    assert_eq!(store.get_float(&path, "lines").unwrap(), 11.0);
    assert_eq!(store.get_str(&path, "title").unwrap(), "Example");
    assert_eq!(store.get_list(&path, "collection").unwrap(), vec!["item1", "item2"]);
    assert_eq!(
        store.get_date(&path, "released").unwrap(),
        NaiveDate::from_ymd_opt(2021, 4, 5).unwrap()
    );
    assert_eq!(
        store.get_datetime(&path, "released").unwrap(),
        NaiveDate::from_ymd_opt(2021, 4, 5).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert_eq!(
        store.get_as(&path, "lines", TargetType::Int).unwrap(),
        TypedValue::Int(11)
    );
}

#[test]
fn test_typed_read_failures() {
    let (_conf, path) = setup();
    let store = ConfStore::new();

    let err = store.get_int(&path, "title").unwrap_err();
    assert!(matches!(
        err,
        Error::Value(lineconf_format::Error::TypeConversion { .. })
    ));

    let err = store.get_bool(&path, "absent").unwrap_err();
    assert!(matches!(
        err,
        Error::Value(lineconf_format::Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_each_read_sees_fresh_content() {
    let (conf, path) = setup();
    let store = ConfStore::new();

    assert_eq!(store.get_int(&path, "lines").unwrap(), 11);
    conf.write("app.lconf", "lines: 12\n");
    assert_eq!(store.get_int(&path, "lines").unwrap(), 12);
}

#[test]
fn test_write_appends_and_preserves() {
    let (conf, path) = setup();
    let store = ConfStore::new();

    let mut pending = Document::new();
    pending.insert("newKey", "v");
    pending.insert("title", "Changed");

    let report = store.write(&path, &pending).unwrap();

    assert_eq!(report.appended, vec!["newKey"]);
    assert_eq!(report.skipped, vec!["title"]);
    assert_eq!(conf.read("app.lconf"), format!("{SAMPLE}newKey: v\n"));
    assert_eq!(store.get_str(&path, "title").unwrap(), "Example");
}

#[test]
fn test_write_twice_does_not_duplicate() {
    let (conf, path) = setup();
    let store = ConfStore::new();
    let pending: Document = [("extra", "1")].into_iter().collect();

    store.write(&path, &pending).unwrap();
    let after_first = conf.read("app.lconf");
    let report = store.write(&path, &pending).unwrap();

    assert!(report.is_unchanged());
    assert_eq!(conf.read("app.lconf"), after_first);
}

#[test]
fn test_write_creates_missing_file() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.path("nested/dir/new.lconf")).unwrap();
    let store = ConfStore::new();

    let mut pending = Document::new();
    pending.insert("body", "line one\nline two");
    pending.insert("tags", vec!["a", "b"]);
    store.write(&path, &pending).unwrap();

    assert_eq!(
        conf.read("nested/dir/new.lconf"),
        "body: \"line one\nline two\"\ntags: a, b\n"
    );
    assert_eq!(store.load(&path).unwrap(), pending);
}

#[test]
fn test_write_of_nothing_to_missing_file_creates_empty_file() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.path("empty.lconf")).unwrap();

    ConfStore::new().write(&path, &Document::new()).unwrap();

    conf.assert_file_exists("empty.lconf");
    assert_eq!(conf.read("empty.lconf"), "");
}

#[test]
fn test_update_reads_and_writes_under_one_guard() {
    let (conf, path) = setup();
    let store = ConfStore::new();

    let report = store
        .update(&path, |current| {
            let lines = current.get_int("lines").unwrap();
            [("lines_doubled", lines * 2)].into_iter().collect()
        })
        .unwrap();

    assert_eq!(report.appended, vec!["lines_doubled"]);
    conf.assert_file_contains("app.lconf", "lines_doubled: 22");
}

#[test]
fn test_update_on_missing_file_starts_empty() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.path("fresh.lconf")).unwrap();

    ConfStore::new()
        .update(&path, |current| {
            assert!(current.is_empty());
            [("created", true)].into_iter().collect()
        })
        .unwrap();

    assert_eq!(conf.read("fresh.lconf"), "created: true\n");
}

#[test]
fn test_write_refuses_value_that_would_not_load() {
    let (conf, path) = setup();
    let store = ConfStore::new();

    let mut pending = Document::new();
    pending.insert("broken", "x\"\ny");
    pending.insert("other", "fine");

    let err = store.write(&path, &pending).unwrap_err();
    assert!(
        matches!(err, Error::Value(lineconf_format::Error::Unwritable { .. })),
        "got {err:?}"
    );
    assert_eq!(conf.read("app.lconf"), SAMPLE);
    assert_eq!(store.load(&path).unwrap().len(), 4);
}

#[test]
fn test_write_refused_list_leaves_missing_file_absent() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.path("new.lconf")).unwrap();

    let mut pending = Document::new();
    pending.insert("a", vec!["\"x", "y"]);
    pending.insert("b", "kept");

    assert!(ConfStore::new().write(&path, &pending).is_err());
    conf.assert_file_not_exists("new.lconf");
}

#[test]
fn test_write_refuses_invalid_key() {
    let (conf, path) = setup();
    let pending: Document = [("a:b", "v")].into_iter().collect();

    let err = ConfStore::new().write(&path, &pending).unwrap_err();
    assert!(
        matches!(err, Error::Value(lineconf_format::Error::Unwritable { .. })),
        "got {err:?}"
    );
    assert_eq!(conf.read("app.lconf"), SAMPLE);
}

#[test]
fn test_write_keeps_crlf_line_endings() {
    let conf = TestConf::new();
    let path = ConfPath::new(conf.write("win.lconf", "# dos\r\ntitle: Example\r\n")).unwrap();

    let pending: Document = [("added", "yes")].into_iter().collect();
    ConfStore::new().write(&path, &pending).unwrap();

    assert_eq!(
        conf.read("win.lconf"),
        "# dos\r\ntitle: Example\r\nadded: yes\r\n"
    );
}
