use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::utils::persistence::{read_document, write_document_atomic};

use super::{PersistenceSlot, DEFAULT_STORAGE_KEY};

const DOCUMENT_EXTENSION: &str = "json";

/// Filesystem-backed slot: the key maps to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    key: String,
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = dir
            .into()
            .join(format!("{}.{}", canonical_name(&key), DOCUMENT_EXTENSION));
        Self { key, path }
    }

    pub fn with_default_key(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DEFAULT_STORAGE_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceSlot for FileSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>> {
        read_document(&self.path)
    }

    fn write(&self, document: &str) -> Result<()> {
        write_document_atomic(&self.path, document)
    }
}

/// Maps a slot key onto a safe file stem; dots are kept so the default key
/// stays recognizable on disk.
fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '.').is_empty() {
        DEFAULT_STORAGE_KEY.into()
    } else {
        sanitized
    }
}
