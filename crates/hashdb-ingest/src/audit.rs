// crates/hashdb-ingest/src/audit.rs
// ============================================================================
// Module: Ingest Audit Logging
// Description: Structured audit events for store builds.
// Purpose: Emit machine-readable build records without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each build emits `ingest_started`, periodic `ingest_progress`, and then
//! exactly one of `ingest_completed` or `ingest_failed`. Sinks serialize
//! events as single JSON lines. Sink write failures are swallowed so logging
//! never aborts a build.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Ingest audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Records written so far.
    pub records: u64,
    /// Catalogue FILE rows to migrate (progress events only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    /// Source catalogue path (start events only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// Store directory (start events only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Failure detail (failure events only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestAuditEvent {
    /// Creates an event with a consistent timestamp.
    fn new(event: &'static str, records: u64) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            records,
            total_rows: None,
            catalog: None,
            store: None,
            error: None,
        }
    }

    /// Build started.
    #[must_use]
    pub fn started(catalog: &Path, store: &Path) -> Self {
        Self {
            catalog: Some(catalog.display().to_string()),
            store: Some(store.display().to_string()),
            ..Self::new("ingest_started", 0)
        }
    }

    /// Progress checkpoint out of `total_rows` catalogue rows.
    #[must_use]
    pub fn progress(records: u64, total_rows: u64) -> Self {
        Self {
            total_rows: Some(total_rows),
            ..Self::new("ingest_progress", records)
        }
    }

    /// Build completed and flushed.
    #[must_use]
    pub fn completed(records: u64) -> Self {
        Self::new("ingest_completed", records)
    }

    /// Build aborted.
    #[must_use]
    pub fn failed(records: u64, error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new("ingest_failed", records)
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for ingest events.
pub trait IngestAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &IngestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct IngestStderrAuditSink;

impl IngestAuditSink for IngestStderrAuditSink {
    fn record(&self, event: &IngestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct IngestFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl IngestFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl IngestAuditSink for IngestFileAuditSink {
    fn record(&self, event: &IngestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct IngestNoopAuditSink;

impl IngestAuditSink for IngestNoopAuditSink {
    fn record(&self, _event: &IngestAuditEvent) {}
}
