#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use resort_ledger::{
    core::ledger_manager::{TransactionLedger, DEFAULT_STORAGE_KEY},
    domain::{Category, TransactionDraft},
    storage::JsonFileStore,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn open_ledger(base: &Path) -> TransactionLedger {
    let store = JsonFileStore::new(base.join("data")).expect("create json store");
    TransactionLedger::open(Box::new(store), DEFAULT_STORAGE_KEY).0
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn income(day: NaiveDate, amount: i64, description: &str) -> TransactionDraft {
    TransactionDraft::income(day, Category::RoomRevenue, Decimal::from(amount), description)
}

pub fn expense(day: NaiveDate, category: Category, amount: i64, description: &str) -> TransactionDraft {
    TransactionDraft::expense(day, category, Decimal::from(amount), description)
}
