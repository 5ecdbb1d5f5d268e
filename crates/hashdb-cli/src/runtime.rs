// crates/hashdb-cli/src/runtime.rs
// ============================================================================
// Module: CLI Runtime
// Description: Locale selection, config loading, and output helpers.
// Purpose: Give every executable the same setup and failure reporting.
// Dependencies: hashdb-config, hashdb-store-rocksdb, thiserror
// ============================================================================

//! ## Overview
//! Executables return a [`CliResult`] from their `run` function and convert
//! it to an [`ExitCode`] in `main`; a [`CliError`] is printed to stderr and
//! maps to exit code 1. Nothing here calls `process::exit`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use hashdb_config::HashdbConfig;
use hashdb_store_rocksdb::RdsStoreReader;
use hashdb_store_rocksdb::StoreSettings;
use thiserror::Error;

use crate::i18n::Locale;
use crate::i18n::set_locale;
use crate::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
pub const LANG_ENV: &str = "HASHDB_LANG";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Selects the output locale from [`LANG_ENV`] and prints the translation
/// disclaimer for non-English locales.
///
/// # Errors
///
/// Returns [`CliError`] when the variable holds an unsupported locale.
pub fn init_locale() -> CliResult<()> {
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

/// Resolves the locale from an optional environment value.
///
/// # Errors
///
/// Returns [`CliError`] when a non-empty value is not a supported locale.
pub fn resolve_locale(env_lang: Option<&str>) -> CliResult<Locale> {
    match env_lang {
        Some(value) if !value.trim().is_empty() => Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        }),
        _ => Ok(Locale::En),
    }
}

/// Loads the shared configuration.
///
/// # Errors
///
/// Returns [`CliError`] when a configuration file applies but is invalid.
pub fn load_config() -> CliResult<HashdbConfig> {
    HashdbConfig::load(None).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Maps configuration onto store engine settings.
#[must_use]
pub const fn store_settings(config: &HashdbConfig) -> StoreSettings {
    StoreSettings {
        block_cache_bytes: config.store.block_cache_bytes,
    }
}

/// Opens the configured store read-only.
///
/// # Errors
///
/// Returns [`CliError`] when the store is missing or cannot be opened.
pub fn open_reader(config: &HashdbConfig) -> CliResult<RdsStoreReader> {
    RdsStoreReader::open(&config.store.path, store_settings(config)).map_err(|err| {
        CliError::new(t!("store.open_failed", path = config.store.path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stderr.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
#[must_use]
pub fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.stdout"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Converts a command result into the process exit code.
#[must_use]
pub fn finish(result: CliResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Emits an error message to stderr and returns a failure exit code.
#[must_use]
pub fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
