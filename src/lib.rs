#![doc(test(attr(deny(warnings))))]

//! Expense Ledger keeps a single user's dated, categorized expenses, answers
//! filtered and sorted queries with per-category totals, and round-trips the
//! whole ledger through JSON backups and CSV exports.

pub mod codec;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{EntryService, QueryService, SummaryService};
pub use crate::core::{EntryStore, RestoreReport};
pub use domain::{CategoryPreset, Entry, EntryDraft, FilterSpec, SortKey, Summary, Totals};
pub use errors::{LedgerError, Result, ValidationError};
pub use storage::{FileSlot, MemorySlot, PersistenceSlot};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense ledger tracing initialized.");
    });
}
