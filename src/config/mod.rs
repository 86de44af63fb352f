use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{utils, EntryStore};
use crate::currency::LocaleConfig;
use crate::domain::{CategoryPreset, EntryDraft, SortKey};
use crate::errors::LedgerError;
use crate::storage::{FileSlot, DEFAULT_STORAGE_KEY};
use crate::utils::persistence::{read_document, write_document_atomic};

/// User preferences for where the ledger lives and how views default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the ledger slot. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default = "Config::default_category_value")]
    pub default_category: String,
    #[serde(default)]
    pub locale: LocaleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: Self::default_storage_key(),
            data_dir: None,
            default_sort: SortKey::default(),
            default_category: Self::default_category_value(),
            locale: LocaleConfig::default(),
        }
    }
}

impl Config {
    pub fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    pub fn default_category_value() -> String {
        CategoryPreset::default().as_str().into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(utils::app_data_dir)
    }

    /// The file slot described by this configuration.
    pub fn slot(&self) -> FileSlot {
        FileSlot::new(self.resolve_data_dir(), self.storage_key.clone())
    }

    /// An empty entry form preset to the configured category and today's date.
    pub fn blank_draft(&self) -> EntryDraft {
        EntryDraft::blank(self.default_category.clone())
    }

    /// Opens the ledger stored in [`Config::slot`].
    pub fn open_store(&self) -> EntryStore {
        EntryStore::open(Box::new(self.slot()))
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: utils::config_file_in(&base),
        })
    }

    /// Loads the configuration, or the defaults when none has been saved.
    pub fn load(&self) -> Result<Config, LedgerError> {
        match read_document(&self.path)? {
            Some(data) => {
                serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
            }
            None => Ok(Config::default()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_document_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_when_missing() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "expense.entries.v1");
        assert_eq!(config.default_category, "Food");
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            storage_key: "household".into(),
            data_dir: Some(temp.path().join("data")),
            default_sort: SortKey::AmountDesc,
            default_category: "Travel".into(),
            locale: LocaleConfig::default(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"default_sort":"date-asc"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.default_sort, SortKey::DateAsc);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn blank_draft_follows_default_category() {
        assert_eq!(Config::default().blank_draft().category, "Food");

        let config = Config {
            default_category: "Travel".into(),
            ..Config::default()
        };
        let draft = config.blank_draft();
        assert_eq!(draft.category, "Travel");
        assert_eq!(draft.date, crate::domain::entry::today_iso());
        assert!(draft.amount.is_nan());
    }

    #[test]
    fn open_store_uses_configured_slot() {
        let temp = tempdir().unwrap();
        let config = Config {
            data_dir: Some(temp.path().to_path_buf()),
            ..Config::default()
        };
        let mut store = config.open_store();
        store.add(crate::domain::Entry::new("Rent", 800.0, "Housing", "2024-01-01"));

        let reopened = config.open_store();
        assert_eq!(reopened.len(), 1);
        assert!(temp.path().join("expense.entries.v1.json").exists());
    }
}
