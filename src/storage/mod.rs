pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Key under which the ledger is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "expense.entries.v1";

/// A single named durable slot holding the serialized ledger.
///
/// The store reads the slot once when opened and rewrites it after every
/// mutation. Implementations report failures; the store decides whether to
/// surface them.
pub trait PersistenceSlot: Send + Sync {
    /// Name of the slot.
    fn key(&self) -> &str;

    /// Returns the stored document, or `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored document.
    fn write(&self, document: &str) -> Result<()>;
}

pub use json_backend::FileSlot;
pub use memory::MemorySlot;
