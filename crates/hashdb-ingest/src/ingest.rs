// crates/hashdb-ingest/src/ingest.rs
// ============================================================================
// Module: Ingestor
// Description: Single-pass migration from catalogue rows to store entries.
// Purpose: Denormalize once at build time so lookups are one get.
// Dependencies: hashdb-catalog-sqlite, hashdb-store-rocksdb, thiserror
// ============================================================================

//! ## Overview
//! The ingestor owns the only writable store handle. Records are written in
//! catalogue scan order; a later row with the same composite key replaces an
//! earlier one. Any catalogue, digest, or engine error aborts the build, and
//! the partially written store is flushed and closed on the way out.
//!
//! Building while readers have the store open is an operational error and is
//! not detected here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use hashdb_catalog_sqlite::CatalogError;
use hashdb_catalog_sqlite::RdsCatalog;
use hashdb_store_rocksdb::RdsStoreWriter;
use hashdb_store_rocksdb::StoreError;
use hashdb_store_rocksdb::StoreSettings;
use thiserror::Error;

use crate::audit::IngestAuditEvent;
use crate::audit::IngestAuditSink;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Inputs for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSettings {
    /// Source catalogue path.
    pub catalog_path: PathBuf,
    /// Destination store directory.
    pub store_path: PathBuf,
    /// Store engine tuning.
    pub store: StoreSettings,
    /// Records between progress checkpoints; must be non-zero.
    pub progress_interval: u64,
}

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Receives user-facing progress for a build.
pub trait IngestObserver {
    /// Called after every `progress_interval` records.
    fn on_progress(&mut self, records: u64);

    /// Called once after the store has been flushed.
    fn on_complete(&mut self, total: u64);
}

// ============================================================================
// SECTION: Errors and Summary
// ============================================================================

/// Build errors. All are fatal.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Invalid build settings.
    #[error("ingest settings invalid: {0}")]
    Settings(String),
    /// Catalogue open, query, or row failure.
    #[error("{0}")]
    Catalog(String),
    /// Store open, put, or flush failure.
    #[error("{0}")]
    Store(String),
}

impl From<CatalogError> for IngestError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err.to_string())
    }
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Catalogue rows scanned.
    pub rows: u64,
    /// Records written, duplicates included.
    pub records: u64,
}

// ============================================================================
// SECTION: Ingestor
// ============================================================================

/// Catalogue-to-store migration driver.
pub struct Ingestor<'a> {
    /// Build inputs.
    settings: IngestSettings,
    /// Structured event sink.
    audit: &'a dyn IngestAuditSink,
}

impl<'a> Ingestor<'a> {
    /// Creates an ingestor.
    #[must_use]
    pub fn new(settings: IngestSettings, audit: &'a dyn IngestAuditSink) -> Self {
        Self {
            settings,
            audit,
        }
    }

    /// Runs the build to completion.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] on the first failure; an `ingest_failed` event
    /// is recorded before returning.
    pub fn run(&self, observer: &mut dyn IngestObserver) -> Result<IngestSummary, IngestError> {
        self.audit.record(&IngestAuditEvent::started(
            &self.settings.catalog_path,
            &self.settings.store_path,
        ));
        let mut written = 0;
        let result = self.migrate(observer, &mut written);
        match &result {
            Ok(summary) => self.audit.record(&IngestAuditEvent::completed(summary.records)),
            Err(err) => self.audit.record(&IngestAuditEvent::failed(written, &err.to_string())),
        }
        result
    }

    /// Opens both ends and streams every record across.
    fn migrate(
        &self,
        observer: &mut dyn IngestObserver,
        written: &mut u64,
    ) -> Result<IngestSummary, IngestError> {
        let interval = self.settings.progress_interval;
        if interval == 0 {
            return Err(IngestError::Settings(
                "progress_interval must be greater than zero".to_string(),
            ));
        }
        let catalog = RdsCatalog::open(&self.settings.catalog_path)?;
        let total_rows = catalog.file_count()?;
        let mut writer = RdsStoreWriter::open(&self.settings.store_path, self.settings.store)?;
        let rows = catalog.for_each_record(|record| {
            writer.put(&record)?;
            *written = writer.written();
            if *written % interval == 0 {
                observer.on_progress(*written);
                self.audit.record(&IngestAuditEvent::progress(*written, total_rows));
            }
            Ok::<(), IngestError>(())
        })?;
        let records = writer.finish()?;
        observer.on_complete(records);
        Ok(IngestSummary {
            rows,
            records,
        })
    }
}
