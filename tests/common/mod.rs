#![allow(dead_code)]

use expense_ledger::{Entry, EntryStore, MemorySlot};
use tempfile::TempDir;

/// A store backed by a shared in-memory slot the test can inspect.
pub fn memory_store() -> (EntryStore, MemorySlot) {
    let slot = MemorySlot::new();
    let store = EntryStore::open(Box::new(slot.clone()));
    (store, slot)
}

/// Creates an isolated directory for on-disk slots; keep the guard alive.
pub fn temp_data_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

pub fn entry(description: &str, category: &str, amount: f64, date: &str) -> Entry {
    Entry::new(description, amount, category, date)
}

/// The two-entry fixture used across the query suites.
pub fn coffee_and_bus() -> Vec<Entry> {
    vec![
        entry("Coffee", "Food", 5.0, "2024-03-02"),
        entry("Bus", "Transport", 3.0, "2024-03-15"),
    ]
}
