#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use qada_core::{
    core::{FixedClock, LedgerManager},
    ledger::{Prayer, PrayerMap, SetupInput},
    storage::JsonStorage,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Clock pinned to 2024-01-01 08:00 UTC.
pub fn new_year_clock() -> FixedClock {
    FixedClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        ymd(2024, 1, 1),
    )
}

/// Creates a JSON store rooted in a unique directory for each test.
pub fn temp_storage() -> JsonStorage {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonStorage::new(Some(base), None).expect("create json storage backend")
}

/// Creates an isolated manager and the store it writes through.
pub fn setup_test_env() -> (LedgerManager, JsonStorage) {
    let storage = temp_storage();
    let manager = LedgerManager::new(Box::new(storage.clone()), Box::new(new_year_clock()));
    (manager, storage)
}

/// Born 2000-01-01, obligated from 12, with the given percent per prayer.
pub fn setup_input(percents: &[(Prayer, f64)]) -> SetupInput {
    let mut percent_missed = PrayerMap::splat(0.0);
    for (prayer, percent) in percents {
        percent_missed[*prayer] = *percent;
    }
    SetupInput {
        birth_date: "2000-01-01".into(),
        start_age: 12.0,
        percent_missed,
    }
}
