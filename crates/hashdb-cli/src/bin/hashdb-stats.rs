// crates/hashdb-cli/src/bin/hashdb-stats.rs
// ============================================================================
// Module: HashDB Stats Entry Point
// Description: Prints key count, table size, and bloom filter footprint.
// Purpose: Read-only capacity probe for the built store.
// Dependencies: hashdb-cli
// ============================================================================

//! ## Overview
//! Takes no arguments, opens the configured store read-only, and prints the
//! stats report. A missing or unreadable store exits with status 1.

use std::io;
use std::process::ExitCode;

use hashdb_cli::render::render_stats;
use hashdb_cli::runtime::CliError;
use hashdb_cli::runtime::CliResult;
use hashdb_cli::runtime::finish;
use hashdb_cli::runtime::init_locale;
use hashdb_cli::runtime::load_config;
use hashdb_cli::runtime::open_reader;
use hashdb_cli::runtime::output_error;
use hashdb_cli::t;

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    finish(run())
}

/// Opens the store and prints its report.
fn run() -> CliResult<ExitCode> {
    init_locale()?;
    let config = load_config()?;
    let reader = open_reader(&config)?;
    let stats = reader.stats().map_err(|err| CliError::new(t!("stats.failed", error = err)))?;
    render_stats(&mut io::stdout().lock(), &stats)
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}
