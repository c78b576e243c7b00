//! Default values for catalog-sync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// File name looked up when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".catalog-sync.yaml";

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV_VAR: &str = "CATALOG_SYNC_CONFIG";

/// Log level used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Returns the default configuration path, relative to the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}
