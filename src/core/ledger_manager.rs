use crate::codec::backup::{self, RejectReason};
use crate::domain::{Displayable, Entry, EntryDraft};
use crate::errors::{LedgerError, Result};
use crate::storage::PersistenceSlot;

/// Summary of a restore merged into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub imported: usize,
    pub rejected: Vec<(usize, RejectReason)>,
}

/// Owns the ledger and mirrors it into an injected persistence slot.
///
/// Element 0 is the most recent action. Every mutation rewrites the slot;
/// write failures are logged and otherwise ignored, leaving the in-memory
/// ledger authoritative for the rest of the session.
pub struct EntryStore {
    entries: Vec<Entry>,
    slot: Box<dyn PersistenceSlot>,
}

impl EntryStore {
    /// Loads the ledger from `slot`. A missing, unreadable or corrupt slot
    /// yields an empty ledger.
    pub fn open(slot: Box<dyn PersistenceSlot>) -> Self {
        let entries = load_entries(slot.as_ref());
        tracing::info!(key = slot.key(), count = entries.len(), "ledger opened");
        Self { entries, slot }
    }


    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn slot(&self) -> &dyn PersistenceSlot {
        self.slot.as_ref()
    }

    /// Prepends an already validated entry.
    pub fn add(&mut self, entry: Entry) {
        tracing::debug!(id = %entry.id, "adding entry");
        self.entries.insert(0, entry);
        self.persist();
    }

    /// Validates `draft` and prepends the resulting entry, returning its id.
    /// The ledger is untouched when validation fails.
    pub fn submit(&mut self, draft: EntryDraft) -> Result<String> {
        let entry = draft.validate()?;
        let id = entry.id.clone();
        self.add(entry);
        Ok(id)
    }

    /// Removes the entry with `id`, if any. Unknown ids are not an error.
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        let removed = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| self.entries.remove(index));
        if let Some(entry) = &removed {
            tracing::debug!(id, entry = %entry.display_label(), "entry removed");
        }
        self.persist();
        removed
    }

    /// Places `incoming` ahead of the existing entries, keeping its order.
    /// Existing entries are never replaced.
    pub fn prepend_all(&mut self, incoming: Vec<Entry>) {
        let mut merged = incoming;
        merged.append(&mut self.entries);
        self.entries = merged;
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Selects an entry for editing.
    ///
    /// The entry leaves the ledger immediately and its values come back as a
    /// draft for resubmission through [`EntryStore::submit`]. A draft that is
    /// never resubmitted means the entry is gone.
    pub fn begin_edit(&mut self, id: &str) -> Option<EntryDraft> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let entry = self.entries.remove(index);
        self.persist();
        tracing::debug!(id, entry = %entry.display_label(), "entry removed for editing");
        Some(EntryDraft::from(entry))
    }

    /// Decodes a backup document and prepends every accepted element.
    /// A document whose top level is not a list leaves the ledger unchanged.
    pub fn restore(&mut self, document: &str) -> Result<RestoreReport> {
        let batch = backup::decode_batch(document)?;
        let report = RestoreReport {
            imported: batch.entries.len(),
            rejected: batch.rejected,
        };
        self.prepend_all(batch.entries);
        tracing::info!(
            imported = report.imported,
            rejected = report.rejected.len(),
            "backup restored"
        );
        Ok(report)
    }

    /// Pretty-printed backup of the whole ledger.
    pub fn backup(&self) -> Result<String> {
        backup::backup_document(&self.entries)
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(LedgerError::from)
            .and_then(|document| self.slot.write(&document));
        if let Err(err) = result {
            tracing::warn!(key = self.slot.key(), error = %err, "failed to persist ledger");
        }
    }
}

fn load_entries(slot: &dyn PersistenceSlot) -> Vec<Entry> {
    let raw = match slot.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key = slot.key(), error = %err, "ledger slot unreadable");
            return Vec::new();
        }
    };
    match backup::decode_stored(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(key = slot.key(), error = %err, "ledger slot corrupt");
            Vec::new()
        }
    }
}
