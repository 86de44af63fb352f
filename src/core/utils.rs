use std::path::PathBuf;

const APP_DIR_NAME: &str = "expense_ledger";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform data directory for the ledger, falling back to the
/// home directory and finally the working directory.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Path of the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
