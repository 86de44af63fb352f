pub mod common;
pub mod entry;
pub mod filter;
pub mod totals;

pub use common::Displayable;
pub use entry::{CategoryPreset, Entry, EntryDraft};
pub use filter::{FilterSpec, MonthRange, SortKey};
pub use totals::{Summary, Totals};
