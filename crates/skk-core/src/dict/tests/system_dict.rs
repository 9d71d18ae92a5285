use redb::Database;

use crate::dict::store::{self, TABLE};
use crate::dict::{DictError, Lookup, SystemDictionary};

fn sample_dict() -> SystemDictionary {
    SystemDictionary::from_entries(vec![
        ("みず", vec!["水", "瑞"]),
        ("みずうみ", vec!["湖"]),
        ("みずk", vec!["見ず"]),
        ("みずぎ", vec!["水着"]),
        ("みずいろ", vec!["水色"]),
        ("もり", vec!["森", "守"]),
    ])
    .unwrap()
}

#[test]
fn test_lookup_hit_and_miss() {
    let dict = sample_dict();
    let c = dict.lookup("みず").unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c[0].text, "水");
    assert!(dict.lookup("かわ").is_none());
}

#[test]
fn test_scan_from_is_ordered() {
    let dict = sample_dict();
    let keys: Vec<String> = dict
        .scan_from("みず", 10)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys[0], "みず");
    assert_eq!(keys.last().unwrap(), "もり");
}

#[test]
fn test_scan_from_respects_limit_and_start() {
    let dict = sample_dict();
    let scanned = dict.scan_from("みずい", 2);
    assert_eq!(scanned.len(), 2);
    assert_eq!(scanned[0].0, "みずいろ");
    assert_eq!(scanned[0].1, "/水色/");
}

#[test]
fn test_missing_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let dict = SystemDictionary::open(&dir.path().join("absent"));
    assert!(!dict.is_available());
    assert!(dict.lookup("みず").is_none());
    assert!(dict.scan_from("", 5).is_empty());
}

#[test]
fn test_file_without_table_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.redb");
    drop(Database::create(&path).unwrap());

    let err = SystemDictionary::try_open(&path).unwrap_err();
    assert!(matches!(err, DictError::MissingTable("skk_dict")));
    assert!(!SystemDictionary::open(&path).is_available());
}

#[test]
fn test_garbage_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage");
    std::fs::write(&path, b"this is not a database").unwrap();
    assert!(!SystemDictionary::open(&path).is_available());
}

#[test]
fn test_invalid_value_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.redb");
    {
        let db = Database::create(&path).unwrap();
        store::write_all(&db, [("いし", "/石/"), ("かわ", "川")]).unwrap();
        let txn = db.begin_read().unwrap();
        assert!(txn.open_table(TABLE).is_ok());
    }
    let dict = SystemDictionary::open(&path);
    assert!(dict.lookup("いし").is_some());
    assert!(dict.lookup("かわ").is_none());
}
