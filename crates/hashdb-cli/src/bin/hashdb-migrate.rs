// crates/hashdb-cli/src/bin/hashdb-migrate.rs
// ============================================================================
// Module: HashDB Ingestor Entry Point
// Description: Builds the lookup store from the SQLite catalogue.
// Purpose: One-shot denormalizing migration with progress output.
// Dependencies: hashdb-cli, hashdb-config, hashdb-ingest
// ============================================================================

//! ## Overview
//! Takes no arguments. Paths come from the configuration (built-in defaults
//! `data/nist_rds_subset_50mb.db` and `data/nist_rds_rocksdb`). Progress goes
//! to stdout; any failure is fatal and exits with status 1.
//!
//! `ingest.audit_log` selects a JSON-lines audit file; the value `-` sends
//! audit events to stderr instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::process::ExitCode;

use hashdb_cli::progress::ConsoleProgress;
use hashdb_cli::runtime::CliError;
use hashdb_cli::runtime::CliResult;
use hashdb_cli::runtime::finish;
use hashdb_cli::runtime::init_locale;
use hashdb_cli::runtime::load_config;
use hashdb_cli::runtime::store_settings;
use hashdb_cli::t;
use hashdb_config::HashdbConfig;
use hashdb_ingest::IngestAuditSink;
use hashdb_ingest::IngestFileAuditSink;
use hashdb_ingest::IngestNoopAuditSink;
use hashdb_ingest::IngestSettings;
use hashdb_ingest::IngestStderrAuditSink;
use hashdb_ingest::Ingestor;

/// `audit_log` value that selects the stderr sink.
const STDERR_AUDIT: &str = "-";

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    finish(run())
}

/// Loads configuration and runs the build.
fn run() -> CliResult<ExitCode> {
    init_locale()?;
    let config = load_config()?;
    let audit = audit_sink(&config)?;
    let settings = IngestSettings {
        catalog_path: config.catalog.path.clone(),
        store_path: config.store.path.clone(),
        store: store_settings(&config),
        progress_interval: config.ingest.progress_interval,
    };
    let mut progress = ConsoleProgress::new(io::stdout().lock());
    Ingestor::new(settings, audit.as_ref())
        .run(&mut progress)
        .map_err(|err| CliError::new(t!("migrate.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Selects the audit sink named by the configuration.
fn audit_sink(config: &HashdbConfig) -> CliResult<Box<dyn IngestAuditSink>> {
    let Some(path) = &config.ingest.audit_log else {
        return Ok(Box::new(IngestNoopAuditSink));
    };
    if path.as_os_str() == STDERR_AUDIT {
        return Ok(Box::new(IngestStderrAuditSink));
    }
    let sink = IngestFileAuditSink::new(path).map_err(|err| {
        CliError::new(t!("migrate.audit_open_failed", path = path.display(), error = err))
    })?;
    Ok(Box::new(sink))
}
