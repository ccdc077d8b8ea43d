// Cross-container behaviour against a real temp directory

use budget_store::{
    Entry, EntryIdentity, Intrinsic, MemorySink, PersistentMapping, PersistentSequence,
    PersistentSet, StoreConfig, StoreError, StoreEvent,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, StoreConfig, MemorySink) {
    let dir = TempDir::new().unwrap();
    let sink = MemorySink::new();
    let config = StoreConfig::new(dir.path().join(".data")).with_sink(sink.clone());
    (dir, config, sink)
}

fn entry(code: &str, category: &str, amount: f64, day: u32) -> Entry {
    Entry::new(
        code,
        category,
        "",
        amount,
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
    )
}

fn codes(set: &PersistentSet<Entry, EntryIdentity>) -> BTreeSet<String> {
    set.iter().map(|e| e.bank_code.clone()).collect()
}

#[test]
fn test_set_round_trip() {
    let (_dir, config, _sink) = setup();
    let a = entry("TX-A", "Food", -12.5, 3);
    let b = entry("TX-B", "Rent", -950.0, 1);

    let set = PersistentSet::open(&config, "entries", EntryIdentity, vec![a, b]);
    set.save().unwrap();

    let reopened = PersistentSet::open(&config, "entries", EntryIdentity, Vec::new());
    assert_eq!(reopened.len(), 2);
    assert_eq!(
        codes(&reopened),
        ["TX-A", "TX-B"]
            .iter()
            .map(|s| s.to_string())
            .collect::<BTreeSet<_>>()
    );
    let stored_b = reopened.get(&entry("TX-B", "", -950.0, 1)).unwrap();
    assert_eq!(stored_b.category, "Rent");
}

#[test]
fn test_garbage_file_yields_defaults_and_warning() {
    let (_dir, config, sink) = setup();
    fs::create_dir_all(config.data_dir()).unwrap();
    fs::write(config.path_for("tags", "json"), [0x00u8, 0x9f, 0x92, 0x96, 0xff]).unwrap();

    let set = PersistentSet::open(&config, "tags", Intrinsic, vec!["x".to_string()]);

    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec!["x".to_string()]);
    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path(), config.path_for("tags", "json"));
}

#[test]
fn test_missing_files_yield_defaults() {
    let (_dir, config, sink) = setup();

    let set = PersistentSet::open(
        &config,
        "entries",
        EntryIdentity,
        vec![entry("TX-1", "Food", -1.0, 1)],
    );
    let seq = PersistentSequence::open(&config, "history", vec![1u8, 2]);
    let map = PersistentMapping::open(&config, "settings", vec![("theme".to_string(), 1u8)]);

    assert_eq!(set.len(), 1);
    assert_eq!(seq.as_slice(), &[1, 2]);
    assert_eq!(map.len(), 1);
    assert!(sink.events().iter().all(|e| matches!(e, StoreEvent::Missing { .. })));
    assert_eq!(sink.events().len(), 3);
    assert!(!config.data_dir().exists());
}

#[test]
fn test_sequence_order_survives_reopen() {
    let (_dir, config, _sink) = setup();
    let original = vec![
        entry("TX-3", "Fuel", -60.0, 9),
        entry("TX-1", "Food", -12.0, 2),
        entry("TX-2", "Salary", 2500.0, 15),
    ];

    let seq = PersistentSequence::open(&config, "imports", original.clone());
    seq.save().unwrap();

    let reopened: PersistentSequence<Entry> =
        PersistentSequence::open(&config, "imports", Vec::new());
    assert_eq!(reopened.as_slice(), original.as_slice());
}

#[test]
fn test_mapping_file_value_wins() {
    let (_dir, config, _sink) = setup();
    let mut map = PersistentMapping::open(&config, "budgets", vec![("Food".to_string(), 300.0)]);
    map.set("Food".to_string(), 450.0);
    map.save_to_disk().unwrap();

    let reopened = PersistentMapping::open(
        &config,
        "budgets",
        vec![("Food".to_string(), 300.0), ("Fuel".to_string(), 120.0)],
    );
    assert_eq!(*reopened.get(&"Food".to_string()).unwrap(), 450.0);
    assert_eq!(*reopened.get(&"Fuel".to_string()).unwrap(), 120.0);
}

#[test]
fn test_mapping_absent_key_errors() {
    let (_dir, config, _sink) = setup();
    let mut map: PersistentMapping<String, f64> =
        PersistentMapping::open(&config, "budgets", Vec::new());

    let err = map.get(&"Travel".to_string()).unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound(ref k) if k.contains("Travel")));
    assert!(matches!(
        map.delete(&"Travel".to_string()),
        Err(StoreError::KeyNotFound(_))
    ));
}

#[test]
fn test_persist_failure_propagates() {
    let (dir, _config, _sink) = setup();
    // data_dir points at a regular file, so the directory cannot be created
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    let config = StoreConfig::new(&blocker).with_sink(MemorySink::new());

    let seq = PersistentSequence::open(&config, "history", vec![1u32]);
    assert!(matches!(seq.save(), Err(StoreError::Io { .. })));
}

proptest! {
    #[test]
    fn prop_category_is_not_identity(
        code in "[A-Z]{2}-[0-9]{1,6}",
        day in 1u32..=28,
        cents in -1_000_000i64..1_000_000,
        first in "[a-z]{1,10}",
        second in "[a-z]{1,10}",
    ) {
        let (_dir, config, _sink) = setup();
        let amount = cents as f64 / 100.0;
        let mut set = PersistentSet::open(&config, "entries", EntryIdentity, Vec::new());

        set.add(entry(&code, &first, amount, day));
        set.add(entry(&code, &second, amount, day));

        prop_assert_eq!(set.len(), 1);
        let stored = set.iter().next().unwrap();
        prop_assert_eq!(&stored.category, &first);
    }
}
