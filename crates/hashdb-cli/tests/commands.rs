// crates/hashdb-cli/tests/commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: End-to-end tests for the reader, ingestor, and stats binaries.
// Purpose: Pin stdout/stderr text and exit codes against a scratch store.
// Dependencies: hashdb-cli binaries, rusqlite, tempfile
// ============================================================================

//! ## Overview
//! Each test builds a small catalogue, writes a `hashdb.toml` pointing at it,
//! runs `hashdb-migrate`, and then drives `hashdb` or `hashdb-stats`. The
//! config path is passed through `HASHDB_CONFIG` and `HASHDB_LANG` is cleared
//! so output is always English.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use rusqlite::Connection;
use rusqlite::params;
use tempfile::TempDir;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const SCHEMA: &str = "
CREATE TABLE MFG (manufacturer_id INTEGER PRIMARY KEY, name TEXT);
CREATE TABLE OS (operating_system_id INTEGER, name TEXT, version TEXT, manufacturer_id INTEGER);
CREATE TABLE PKG (package_id INTEGER PRIMARY KEY, name TEXT, version TEXT,
                  operating_system_id INTEGER, manufacturer_id INTEGER,
                  language TEXT, application_type TEXT);
CREATE TABLE FILE (sha256 TEXT, sha1 TEXT, md5 TEXT, crc32 TEXT,
                   file_name TEXT, file_size INTEGER, package_id INTEGER);
INSERT INTO MFG VALUES (1, 'Microsoft');
INSERT INTO OS VALUES (10, 'Windows', '10', 1);
INSERT INTO PKG VALUES (100, 'Office', '2019', 10, 1, 'English', 'Productivity');
";

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    /// Catalogue with three files: two packaged, one orphan (package 999).
    fn new(progress_interval: u64) -> Self {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("rds.db");
        let connection = Connection::open(&catalog).unwrap();
        connection.execute_batch(SCHEMA).unwrap();
        let files = [(1, "winword.exe", 100), (2, "excel.exe", 100), (3, "orphan.dll", 999)];
        for (seed, name, package) in files {
            connection
                .execute(
                    "INSERT INTO FILE VALUES (?1, ?2, ?3, ?4, ?5, 4096, ?6)",
                    params![hex(seed, 64), hex(seed, 40), hex(seed, 32), hex(seed, 8), name, package],
                )
                .unwrap();
        }
        drop(connection);

        let config = dir.path().join("hashdb.toml");
        let text = format!(
            "[catalog]\npath = {:?}\n\n[store]\npath = {:?}\n\n[ingest]\nprogress_interval = {progress_interval}\n",
            catalog.to_string_lossy(),
            dir.path().join("store").to_string_lossy(),
        );
        fs::write(&config, text).unwrap();
        Self {
            dir,
            config,
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, bin: &str, args: &[&str]) -> Output {
        Command::new(bin)
            .args(args)
            .current_dir(self.path())
            .env("HASHDB_CONFIG", &self.config)
            .env_remove("HASHDB_LANG")
            .output()
            .unwrap()
    }

    fn migrate(&self) -> Output {
        self.run(env!("CARGO_BIN_EXE_hashdb-migrate"), &[])
    }

    fn hashdb(&self, args: &[&str]) -> Output {
        self.run(env!("CARGO_BIN_EXE_hashdb"), args)
    }

    fn built(progress_interval: u64) -> Self {
        let workspace = Self::new(progress_interval);
        let output = workspace.migrate();
        assert!(output.status.success(), "migrate failed: {}", stderr(&output));
        workspace
    }
}

fn hex(seed: u32, len: usize) -> String {
    format!("{seed:0len$x}")
}

fn quad(seed: u32) -> [String; 4] {
    [hex(seed, 64), hex(seed, 40), hex(seed, 32), hex(seed, 8)]
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn lookup_args(seed: u32) -> Vec<String> {
    quad(seed).to_vec()
}

// ============================================================================
// SECTION: Ingestor
// ============================================================================

#[test]
fn migrate_prints_progress_and_total() {
    let workspace = Workspace::new(2);
    let output = workspace.migrate();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Migrated 2 records\nDone! Migrated 3 records total\n");
    assert!(workspace.path().join("store").is_dir());
}

#[test]
fn migrate_fails_without_catalog() {
    let workspace = Workspace::new(2);
    fs::remove_file(workspace.path().join("rds.db")).unwrap();
    let output = workspace.migrate();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Migration failed"), "stderr: {}", stderr(&output));
    assert!(!workspace.path().join("store").exists());
}

// ============================================================================
// SECTION: Reader
// ============================================================================

#[test]
fn single_lookup_hit_prints_full_block() {
    let workspace = Workspace::built(10);
    let args = lookup_args(1);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = workspace.hashdb(&args);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let [sha256, sha1, md5, crc32] = quad(1).map(|value| value.to_ascii_uppercase());
    let expected = format!(
        "FOUND {sha256}\n  File: winword.exe (4096 bytes)\n  SHA-256: {sha256}\n  SHA-1: \
         {sha1}\n  MD5: {md5}\n  CRC-32: {crc32}\n  Package: Office 2019 (ID: 100)\n  Language: \
         English\n  Type: Productivity\n  OS: Windows 10\n  Manufacturer: Microsoft\n"
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn single_lookup_is_case_insensitive() {
    let workspace = Workspace::built(10);
    let upper = quad(2).map(|value| value.to_ascii_uppercase());
    let lower = quad(2);
    for args in [&upper, &lower] {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = workspace.hashdb(&args);
        assert!(output.status.success());
        assert!(stdout(&output).contains("  File: excel.exe (4096 bytes)\n"));
    }
}

#[test]
fn single_lookup_miss_exits_zero() {
    let workspace = Workspace::built(10);
    let args = lookup_args(42);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = workspace.hashdb(&args);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("NOT FOUND {:064X}\n", 42));
}

#[test]
fn orphan_file_prints_package_id_only() {
    let workspace = Workspace::built(10);
    let args = lookup_args(3);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = workspace.hashdb(&args);
    let text = stdout(&output);
    assert!(text.ends_with("  Package ID: 999\n"), "stdout: {text}");
    assert!(!text.contains("Manufacturer"));
}

#[test]
fn batch_lookup_reports_invalid_lines_and_continues() {
    let workspace = Workspace::built(10);
    let job = workspace.path().join("job.csv");
    let lines = [
        "# sha256,sha1,md5,crc32".to_string(),
        quad(42).join(","),
        "not,a,valid".to_string(),
        quad(1).join(",").to_ascii_uppercase(),
        String::new(),
    ];
    fs::write(&job, lines.join("\n")).unwrap();
    let output = workspace.hashdb(&["-f", job.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    let headers: Vec<&str> = text.lines().filter(|line| !line.starts_with("  ")).collect();
    assert_eq!(headers, vec![format!("NOT FOUND {:064X}", 42), format!("FOUND {:064X}", 1)]);
    let diagnostics = stderr(&output);
    assert_eq!(diagnostics, "Invalid line 3: expected 4 comma-separated fields, got 3\n");
}

#[test]
fn batch_lookup_missing_job_file_fails() {
    let workspace = Workspace::built(10);
    let output = workspace.hashdb(&["-f", "does-not-exist.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to open job file"));
    assert!(output.stdout.is_empty());
}

#[test]
fn wrong_argument_count_fails() {
    let workspace = Workspace::built(10);
    let output = workspace.hashdb(&["ABC"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_digest_prints_usage() {
    let workspace = Workspace::built(10);
    let [sha256, sha1, md5, _] = quad(1);
    let output = workspace.hashdb(&[sha256.as_str(), sha1.as_str(), md5.as_str(), "XYZ"]);
    assert_eq!(output.status.code(), Some(1));
    let diagnostics = stderr(&output);
    assert!(diagnostics.contains("Invalid digest: crc32 must be 8 hex characters, got 3"));
    assert!(diagnostics.contains("Usage: hashdb"));
}

#[test]
fn help_exits_zero() {
    let workspace = Workspace::new(10);
    let output = workspace.hashdb(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}

#[test]
fn lookup_without_store_fails() {
    let workspace = Workspace::new(10);
    let args = lookup_args(1);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = workspace.hashdb(&args);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("store not found"), "stderr: {}", stderr(&output));
}

#[test]
fn catalan_locale_translates_diagnostics() {
    let workspace = Workspace::built(10);
    let output = Command::new(env!("CARGO_BIN_EXE_hashdb"))
        .args(["-f", "missing.csv"])
        .current_dir(workspace.path())
        .env("HASHDB_CONFIG", &workspace.config)
        .env("HASHDB_LANG", "ca")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No s'ha pogut obrir el fitxer de treball"));
}

// ============================================================================
// SECTION: Stats
// ============================================================================

#[test]
fn stats_reports_database_and_filter_sections() {
    let workspace = Workspace::built(10);
    let output = workspace.run(env!("CARGO_BIN_EXE_hashdb-stats"), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[.. 3],
        ["=== Store Statistics ===", "  Database info:", "    Estimated keys:              3"]
    );
    assert!(lines[3].starts_with("    Total SST files on disk:     "));
    assert_eq!(
        lines[4 .. 9],
        [
            "",
            "  Bloom filter memory:",
            "    Keys:           3",
            "    Bits per key:   10",
            "    Filter size:    4 bytes  (formula: keys x bits / 8)",
        ]
    );
    let share = lines[9].strip_prefix("    % of DB size:   ").unwrap();
    let percent: f64 = share.strip_suffix('%').unwrap().parse().unwrap();
    assert!(percent > 0.0 && percent < 100.0, "share line: {}", lines[9]);
    assert!(text.ends_with("\n\n"));
}

#[test]
fn stats_without_store_fails() {
    let workspace = Workspace::new(10);
    let output = workspace.run(env!("CARGO_BIN_EXE_hashdb-stats"), &[]);
    assert_eq!(output.status.code(), Some(1));
}
