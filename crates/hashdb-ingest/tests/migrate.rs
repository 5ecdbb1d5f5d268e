// crates/hashdb-ingest/tests/migrate.rs
// ============================================================================
// Module: Ingest Migration Tests
// Description: End-to-end builds from scratch catalogues into scratch stores.
// Purpose: Validate progress cadence, audit events, and failure handling.
// Dependencies: hashdb-ingest, hashdb-store-rocksdb, rusqlite, tempfile
// ============================================================================

//! ## Overview
//! Builds small catalogues with `rusqlite`, migrates them, and reopens the
//! result read-only to confirm what was written.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use hashdb_core::DigestSet;
use hashdb_ingest::IngestAuditEvent;
use hashdb_ingest::IngestAuditSink;
use hashdb_ingest::IngestError;
use hashdb_ingest::IngestFileAuditSink;
use hashdb_ingest::IngestNoopAuditSink;
use hashdb_ingest::IngestObserver;
use hashdb_ingest::IngestSettings;
use hashdb_ingest::Ingestor;
use hashdb_store_rocksdb::Lookup;
use hashdb_store_rocksdb::RdsStoreReader;
use hashdb_store_rocksdb::StoreSettings;
use rusqlite::Connection;
use rusqlite::params;
use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
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

fn hex(seed: u32, len: usize) -> String {
    format!("{seed:0len$x}")
}

fn digests(seed: u32) -> DigestSet {
    DigestSet::parse(&hex(seed, 64), &hex(seed, 40), &hex(seed, 32), &hex(seed, 8)).unwrap()
}

fn catalog(dir: &TempDir, files: &[(u32, &str)]) -> std::path::PathBuf {
    let path = dir.path().join("rds.db");
    let connection = Connection::open(&path).unwrap();
    connection.execute_batch(SCHEMA).unwrap();
    for (seed, name) in files {
        connection
            .execute(
                "INSERT INTO FILE VALUES (?1, ?2, ?3, ?4, ?5, 10, 100)",
                params![hex(*seed, 64), hex(*seed, 40), hex(*seed, 32), hex(*seed, 8), name],
            )
            .unwrap();
    }
    path
}

fn settings(catalog_path: &Path, dir: &TempDir, interval: u64) -> IngestSettings {
    IngestSettings {
        catalog_path: catalog_path.to_path_buf(),
        store_path: dir.path().join("store"),
        store: StoreSettings::default(),
        progress_interval: interval,
    }
}

#[derive(Default)]
struct RecordingObserver {
    progress: Vec<u64>,
    completed: Option<u64>,
}

impl IngestObserver for RecordingObserver {
    fn on_progress(&mut self, records: u64) {
        self.progress.push(records);
    }

    fn on_complete(&mut self, total: u64) {
        self.completed = Some(total);
    }
}

#[derive(Default)]
struct MemoryAuditSink {
    events: Mutex<Vec<IngestAuditEvent>>,
}

impl MemoryAuditSink {
    fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|event| event.event).collect()
    }

    fn last(&self) -> IngestAuditEvent {
        self.events.lock().unwrap().last().cloned().unwrap()
    }
}

impl IngestAuditSink for MemoryAuditSink {
    fn record(&self, event: &IngestAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn migrates_every_row_with_progress_cadence() {
    let dir = TempDir::new().unwrap();
    let files: Vec<(u32, &str)> = (1 ..= 5).map(|seed| (seed, "f.bin")).collect();
    let path = catalog(&dir, &files);
    let audit = MemoryAuditSink::default();
    let mut observer = RecordingObserver::default();

    let summary = Ingestor::new(settings(&path, &dir, 2), &audit).run(&mut observer).unwrap();

    assert_eq!(summary.rows, 5);
    assert_eq!(summary.records, 5);
    assert_eq!(observer.progress, vec![2, 4]);
    assert_eq!(observer.completed, Some(5));
    assert_eq!(
        audit.names(),
        vec!["ingest_started", "ingest_progress", "ingest_progress", "ingest_completed"]
    );
    assert_eq!(audit.last().records, 5);
    assert_eq!(audit.last().total_rows, None);
    let progress_totals: Vec<Option<u64>> = audit
        .events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| event.event == "ingest_progress")
        .map(|event| event.total_rows)
        .collect();
    assert_eq!(progress_totals, vec![Some(5), Some(5)]);

    let reader = RdsStoreReader::open(&dir.path().join("store"), StoreSettings::default()).unwrap();
    for seed in 1 ..= 5 {
        match reader.lookup(&digests(seed)).unwrap() {
            Lookup::Found(record) => {
                assert_eq!(record.package_name, "Office");
                assert_eq!(record.manufacturer_name, "Microsoft");
            }
            other => panic!("seed {seed}: expected hit, got {other:?}"),
        }
    }
}

#[test]
fn empty_catalog_builds_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = catalog(&dir, &[]);
    let mut observer = RecordingObserver::default();
    let summary =
        Ingestor::new(settings(&path, &dir, 10), &IngestNoopAuditSink).run(&mut observer).unwrap();
    assert_eq!(summary.records, 0);
    assert!(observer.progress.is_empty());
    assert_eq!(observer.completed, Some(0));
    let reader = RdsStoreReader::open(&dir.path().join("store"), StoreSettings::default()).unwrap();
    assert!(matches!(reader.lookup(&digests(1)).unwrap(), Lookup::NotFound));
}

#[test]
fn duplicate_rows_keep_the_last_write() {
    let dir = TempDir::new().unwrap();
    let path = catalog(&dir, &[(7, "first.bin"), (7, "second.bin")]);
    let summary = Ingestor::new(settings(&path, &dir, 10), &IngestNoopAuditSink)
        .run(&mut RecordingObserver::default())
        .unwrap();
    assert_eq!(summary.records, 2);
    let reader = RdsStoreReader::open(&dir.path().join("store"), StoreSettings::default()).unwrap();
    match reader.lookup(&digests(7)).unwrap() {
        Lookup::Found(record) => assert_eq!(record.file_name, "second.bin"),
        other => panic!("expected hit, got {other:?}"),
    }
}

#[test]
fn missing_catalog_fails_and_is_audited() {
    let dir = TempDir::new().unwrap();
    let audit = MemoryAuditSink::default();
    let err = Ingestor::new(settings(&dir.path().join("absent.db"), &dir, 10), &audit)
        .run(&mut RecordingObserver::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::Catalog(_)));
    assert_eq!(audit.names(), vec!["ingest_started", "ingest_failed"]);
    assert!(audit.last().error.unwrap().contains("catalog not found"));
    assert!(!dir.path().join("store").exists());
}

#[test]
fn malformed_digest_aborts_build() {
    let dir = TempDir::new().unwrap();
    let path = catalog(&dir, &[(1, "good.bin")]);
    Connection::open(&path)
        .unwrap()
        .execute(
            "INSERT INTO FILE VALUES ('SHORT', ?1, ?2, ?3, 'bad.bin', 1, 100)",
            params![hex(2, 40), hex(2, 32), hex(2, 8)],
        )
        .unwrap();
    let audit = MemoryAuditSink::default();
    let mut observer = RecordingObserver::default();
    let err = Ingestor::new(settings(&path, &dir, 10), &audit).run(&mut observer).unwrap_err();
    assert!(err.to_string().contains("sha256"));
    assert_eq!(observer.completed, None);
    let failed = audit.last();
    assert_eq!(failed.event, "ingest_failed");
    assert_eq!(failed.records, 1);
}

#[test]
fn zero_interval_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = catalog(&dir, &[(1, "a")]);
    let err = Ingestor::new(settings(&path, &dir, 0), &IngestNoopAuditSink)
        .run(&mut RecordingObserver::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::Settings(_)));
}

#[test]
fn file_sink_appends_json_lines() {
    let dir = TempDir::new().unwrap();
    let path = catalog(&dir, &[(1, "a"), (2, "b")]);
    let log_path = dir.path().join("audit.jsonl");
    let sink = IngestFileAuditSink::new(&log_path).unwrap();
    Ingestor::new(settings(&path, &dir, 1), &sink).run(&mut RecordingObserver::default()).unwrap();

    let contents = fs::read_to_string(&log_path).unwrap();
    let events: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event"], "ingest_started");
    assert!(events[0].get("total_rows").is_none());
    assert_eq!(events[1]["event"], "ingest_progress");
    assert_eq!(events[1]["records"], 1);
    assert_eq!(events[1]["total_rows"], 2);
    assert!(events[0]["catalog"].as_str().unwrap().ends_with("rds.db"));
    assert_eq!(events[3]["event"], "ingest_completed");
    assert_eq!(events[3]["records"], 2);
    assert!(events[3].get("error").is_none());
    assert!(events[3]["timestamp_ms"].as_u64().is_some());
}
