// crates/hashdb-store-rocksdb/src/writer.rs
// ============================================================================
// Module: Store Writer
// Description: Build-time writer for the lookup store.
// Purpose: Put keyed records and flush them to table files before close.
// Dependencies: hashdb-core, rocksdb
// ============================================================================

//! ## Overview
//! The writer is the only component that opens the store writable. Puts use
//! default write options (no per-put sync); durability comes from the flush
//! in [`RdsStoreWriter::finish`], which also runs on drop if `finish` was
//! never reached. A duplicate key overwrites the earlier value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use hashdb_core::FileRecord;
use rocksdb::DB;
use rocksdb::WriteOptions;

use crate::error::StoreError;
use crate::options::StoreSettings;
use crate::options::engine_options;

// ============================================================================
// SECTION: Writer
// ============================================================================

/// Writable store handle used during ingestion.
pub struct RdsStoreWriter {
    /// Engine handle, closed on drop.
    db: DB,
    /// Write options reused for every put.
    write_options: WriteOptions,
    /// Number of successful puts.
    written: u64,
    /// Set once memtables have been flushed.
    flushed: bool,
}

impl RdsStoreWriter {
    /// Opens (creating if missing) the store directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] when the engine cannot open the store.
    pub fn open(path: &Path, settings: StoreSettings) -> Result<Self, StoreError> {
        let options = engine_options(settings, true);
        let db = DB::open(&options, path).map_err(|err| StoreError::Open(err.to_string()))?;
        Ok(Self {
            db,
            write_options: WriteOptions::default(),
            written: 0,
            flushed: false,
        })
    }

    /// Writes `record` under its composite key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the record digests are malformed
    /// or it cannot be encoded, and [`StoreError::Write`] when the put fails.
    pub fn put(&mut self, record: &FileRecord) -> Result<(), StoreError> {
        let key = record.key().map_err(|err| StoreError::Invalid(err.to_string()))?;
        let value = record.encode().map_err(|err| StoreError::Invalid(err.to_string()))?;
        self.db
            .put_opt(key.as_bytes(), value, &self.write_options)
            .map_err(|err| StoreError::Write(err.to_string()))?;
        self.written += 1;
        self.flushed = false;
        Ok(())
    }

    /// Returns the number of records written so far.
    #[must_use]
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Flushes memtables and closes the store, returning the put count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the flush fails.
    pub fn finish(mut self) -> Result<u64, StoreError> {
        self.db.flush().map_err(|err| StoreError::Write(err.to_string()))?;
        self.flushed = true;
        Ok(self.written)
    }
}

impl Drop for RdsStoreWriter {
    fn drop(&mut self) {
        if !self.flushed {
            // Flush failures are only reported through `finish`.
            let _ = self.db.flush();
        }
    }
}
