use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{LedgerError, Result};

use super::{PersistenceSlot, DEFAULT_STORAGE_KEY};

#[derive(Debug, Default)]
struct SlotState {
    document: Option<String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// In-memory slot. Clones share the same state, so a caller can keep a handle
/// to inspect what the store wrote or to inject failures.
#[derive(Debug, Clone)]
pub struct MemorySlot {
    key: String,
    state: Arc<Mutex<SlotState>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.into(),
            state: Arc::new(Mutex::new(SlotState::default())),
        }
    }

    /// A slot that already holds `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        let slot = Self::new();
        if let Ok(mut state) = slot.lock() {
            state.document = Some(document.into());
        }
        slot
    }

    pub fn document(&self) -> Option<String> {
        self.lock().ok().and_then(|state| state.document.clone())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().map(|state| state.writes).unwrap_or(0)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_reads = fail;
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_writes = fail;
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SlotState>> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Persistence("memory slot lock poisoned".into()))
    }
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceSlot for MemorySlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(LedgerError::Persistence("slot is unreadable".into()));
        }
        Ok(state.document.clone())
    }

    fn write(&self, document: &str) -> Result<()> {
        let mut state = self.lock()?;
        if state.fail_writes {
            return Err(LedgerError::Persistence("quota exceeded".into()));
        }
        state.document = Some(document.to_string());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let slot = MemorySlot::new();
        let handle = slot.clone();
        slot.write("[]").unwrap();
        assert_eq!(handle.document().as_deref(), Some("[]"));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn injected_failures_surface_as_persistence_errors() {
        let slot = MemorySlot::with_document("[]");
        slot.set_fail_writes(true);
        assert!(matches!(
            slot.write("[1]"),
            Err(LedgerError::Persistence(_))
        ));
        assert_eq!(slot.document().as_deref(), Some("[]"));

        slot.set_fail_reads(true);
        assert!(slot.read().is_err());
    }
}
