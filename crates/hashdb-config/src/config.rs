// crates/hashdb-config/src/config.rs
// ============================================================================
// Module: HashDB Configuration
// Description: Configuration loading and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is resolved from an explicit path, then the `HASHDB_CONFIG`
//! environment variable, then `./hashdb.toml` when present. With none of
//! those the built-in defaults apply. A file that is named but unreadable,
//! oversized, or invalid fails closed.
//!
//! Bloom filter parameters are deliberately absent: the store crate fixes
//! them so build and lookup cannot disagree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits and Defaults
// ============================================================================

/// Default config filename looked up in the working directory.
const DEFAULT_CONFIG_NAME: &str = "hashdb.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "HASHDB_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default source catalogue location.
pub const DEFAULT_CATALOG_PATH: &str = "data/nist_rds_subset_50mb.db";
/// Default store directory.
pub const DEFAULT_STORE_PATH: &str = "data/nist_rds_rocksdb";
/// Default number of records between ingest progress lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashdbConfig {
    /// Source catalogue settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Ingest settings.
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Source catalogue settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Path to the SQLite reference catalogue.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the store directory.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Optional shared LRU block cache size in bytes.
    #[serde(default)]
    pub block_cache_bytes: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            block_cache_bytes: None,
        }
    }
}

/// Ingest settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Records between progress lines.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Optional append-only JSON-lines audit log.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            audit_log: None,
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl HashdbConfig {
    /// Loads configuration using the resolution order described above.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a resolved file cannot be read, parsed,
    /// or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_path(path)? {
            Some(resolved) => Self::load_file(&resolved),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Loads and validates a specific configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for empty or oversized paths and
    /// zero-valued sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path_field("catalog.path", &self.catalog.path)?;
        validate_path_field("store.path", &self.store.path)?;
        if self.store.block_cache_bytes == Some(0) {
            return Err(ConfigError::Invalid(
                "store.block_cache_bytes must be greater than zero".to_string(),
            ));
        }
        if self.ingest.progress_interval == 0 {
            return Err(ConfigError::Invalid(
                "ingest.progress_interval must be greater than zero".to_string(),
            ));
        }
        if let Some(audit_log) = &self.ingest.audit_log {
            validate_path_field("ingest.audit_log", audit_log)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serde default for `catalog.path`.
fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

/// Serde default for `store.path`.
fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Serde default for `ingest.progress_interval`.
const fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

/// Resolves the config path from the caller, the environment, or the working
/// directory. `None` means no file applies and defaults are used.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        if !env_path.trim().is_empty() {
            return Ok(Some(PathBuf::from(env_path)));
        }
    }
    let local = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(local.is_file().then_some(local))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path field.
fn validate_path_field(field: &str, path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
