mod common;

use std::fs;

use common::{new_year_clock, setup_input, setup_test_env, temp_storage};
use qada_core::{
    core::LedgerManager,
    ledger::{Prayer, CURRENT_SCHEMA_VERSION},
    storage::{decode_record, encode_record, LedgerStore, MemoryStorage},
};
use serde_json::Value;

#[test]
fn record_is_written_under_the_versioned_key() {
    let (mut manager, storage) = setup_test_env();
    manager.create(&setup_input(&[(Prayer::Fajr, 40.0)])).unwrap();

    let path = storage.record_path();
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("qada_state_v1.json")
    );
    let json: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["schema_version"], u64::from(CURRENT_SCHEMA_VERSION));
    assert_eq!(json["birth_date"], "2000-01-01");
    assert_eq!(json["totals"]["FAJR"], 1754);
    assert!(json.get("goal_date").is_none());
}

#[test]
fn unsupported_schema_version_loads_as_absent() {
    let (mut manager, storage) = setup_test_env();
    manager.create(&setup_input(&[(Prayer::Asr, 10.0)])).unwrap();

    let path = storage.record_path();
    let mut json: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    json["schema_version"] = Value::from(99);
    fs::write(path, json.to_string()).unwrap();
    assert!(storage.load().unwrap().is_none());

    json.as_object_mut().unwrap().remove("schema_version");
    fs::write(path, json.to_string()).unwrap();
    assert!(storage.load().unwrap().is_none());
}

#[test]
fn corrupt_record_is_an_error_for_the_store_but_absent_for_the_manager() {
    let storage = temp_storage();
    fs::write(storage.record_path(), "{\"schema_version\": 1, \"birth_date\": ").unwrap();
    assert!(storage.load().is_err());

    let manager = LedgerManager::open(Box::new(storage), Box::new(new_year_clock()));
    assert!(!manager.is_set_up());
}

#[test]
fn failed_atomic_save_preserves_previous_record() {
    let (mut manager, storage) = setup_test_env();
    manager.create(&setup_input(&[(Prayer::Isha, 30.0)])).unwrap();
    let path = storage.record_path().to_path_buf();
    let original = fs::read_to_string(&path).unwrap();

    // A directory where the temp file should go makes the write fail.
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    fs::create_dir_all(&tmp).unwrap();

    let ledger = manager.apply_delta(Prayer::Isha, -7).expect("in-memory change kept");
    assert_eq!(ledger.remaining[Prayer::Isha], ledger.totals[Prayer::Isha] - 7);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn memory_storage_round_trips_through_the_codec() {
    let storage = MemoryStorage::new();
    assert!(storage.load().unwrap().is_none());

    let mut manager = LedgerManager::new(Box::new(MemoryStorage::new()), Box::new(new_year_clock()));
    let ledger = manager
        .create(&setup_input(&[(Prayer::Witr, 25.0)]))
        .unwrap()
        .clone();

    storage.save(&ledger).unwrap();
    let raw = storage.raw().expect("raw record held");
    assert_eq!(raw, encode_record(&ledger).unwrap());
    assert_eq!(storage.load().unwrap(), Some(ledger.clone()));
    assert_eq!(decode_record(&raw).unwrap(), Some(ledger));

    storage.clear().unwrap();
    assert!(storage.raw().is_none());
}

#[test]
fn seeded_memory_record_opens_in_manager() {
    let (mut source, _storage) = setup_test_env();
    let ledger = source.create(&setup_input(&[(Prayer::Dhuhr, 60.0)])).unwrap();
    let raw = encode_record(ledger).unwrap();

    let manager = LedgerManager::open(
        Box::new(MemoryStorage::with_raw(raw)),
        Box::new(new_year_clock()),
    );
    assert_eq!(manager.get().unwrap().totals[Prayer::Dhuhr], 2630);
}
