//! Business logic helpers for turning raw form input into entries.

use serde_json::Value;

use crate::codec::coerce;
use crate::domain::{Entry, EntryDraft};
use crate::errors::Result;

/// Provides validated creation helpers for ledger entries.
pub struct EntryService;

impl EntryService {
    /// Builds a draft from raw form fields. The amount text is read the way a
    /// numeric input is: blank means zero, unreadable text means `NaN`.
    pub fn draft_from_form(
        description: &str,
        amount: &str,
        category: &str,
        date: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            description,
            coerce::to_number(&Value::String(amount.to_string())),
            category,
            date,
        )
    }

    /// Applies the creation rules to `draft`.
    pub fn create(draft: EntryDraft) -> Result<Entry> {
        Ok(draft.validate()?)
    }
}
