// crates/hashdb-cli/src/main.rs
// ============================================================================
// Module: HashDB Reader Entry Point
// Description: Single and batch file-hash lookups against the built store.
// Purpose: Answer "is this file known?" for one quadruple or a job file.
// Dependencies: clap, hashdb-cli, hashdb-core
// ============================================================================

//! ## Overview
//! `hashdb <sha256> <sha1> <md5> <crc32>` looks up one file;
//! `hashdb -f <path>` looks up every line of a job file. Results go to stdout
//! and diagnostics to stderr. Argument errors, store open failures, and an
//! unreadable job file exit with status 1; everything else exits 0.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use hashdb_cli::runtime::CliError;
use hashdb_cli::runtime::CliResult;
use hashdb_cli::runtime::finish;
use hashdb_cli::runtime::init_locale;
use hashdb_cli::runtime::load_config;
use hashdb_cli::runtime::open_reader;
use hashdb_cli::runtime::output_error;
use hashdb_cli::runtime::write_stderr_line;
use hashdb_cli::session::LookupSession;
use hashdb_cli::t;
use hashdb_core::DigestSet;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Reader command line.
#[derive(Parser, Debug)]
#[command(name = "hashdb", version, about = "Look up files in the NIST RDS hash store")]
struct Cli {
    /// Job file with one `sha256,sha1,md5,crc32` line per lookup.
    #[arg(short = 'f', value_name = "PATH", conflicts_with = "digests")]
    file: Option<PathBuf>,
    /// The four digests of one file, in key order.
    #[arg(
        value_names = ["SHA256", "SHA1", "MD5", "CRC32"],
        num_args = 4,
        required_unless_present = "file"
    )]
    digests: Vec<String>,
}

/// What the reader was asked to do.
enum Request {
    /// One validated quadruple.
    Single(DigestSet),
    /// A job file path.
    Batch(PathBuf),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    finish(run())
}

/// Parses arguments and dispatches the lookup.
fn run() -> CliResult<ExitCode> {
    init_locale()?;
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return Ok(report_parse_error(&err)),
    };
    let request = match (cli.file, cli.digests.as_slice()) {
        (Some(path), _) => Request::Batch(path),
        (None, [sha256, sha1, md5, crc32]) => match DigestSet::parse(sha256, sha1, md5, crc32) {
            Ok(digests) => Request::Single(digests),
            Err(err) => {
                return Err(usage_error(&t!("lookup.invalid_digest", error = err)));
            }
        },
        (None, _) => return Err(CliError::new(t!("lookup.usage"))),
    };

    let config = load_config()?;
    let reader = open_reader(&config)?;
    let mut session = LookupSession::new(&reader, io::stdout().lock(), io::stderr());
    match request {
        Request::Single(digests) => {
            session.lookup(&digests).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        Request::Batch(path) => {
            let file = File::open(&path).map_err(|err| {
                CliError::new(t!("batch.open_failed", path = path.display(), error = err))
            })?;
            session
                .run_batch(BufReader::new(file))
                .map_err(|err| CliError::new(t!("batch.failed", error = err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Prints help or version with status 0, and any other parse error with
/// status 1.
fn report_parse_error(err: &clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

/// Builds an argument error that carries the usage line.
fn usage_error(message: &str) -> CliError {
    let _ = write_stderr_line(message);
    CliError::new(t!("lookup.usage"))
}
