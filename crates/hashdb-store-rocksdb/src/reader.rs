// crates/hashdb-store-rocksdb/src/reader.rs
// ============================================================================
// Module: Store Reader
// Description: Read-only point lookups against the built store.
// Purpose: Answer one digest quadruple with one engine get.
// Dependencies: hashdb-core, rocksdb
// ============================================================================

//! ## Overview
//! [`RdsStoreReader`] opens the store read-only with the same table options
//! the writer used and keeps one [`ReadOptions`] for its whole lifetime.
//! Each [`RdsStoreReader::lookup`] issues exactly one pinned get; the pinned
//! buffer is released before the result is returned.
//!
//! ## Invariants
//! - No lookup writes to the store.
//! - A stored value that fails to decode is still a hit
//!   ([`Lookup::Undecodable`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use hashdb_core::CompositeKey;
use hashdb_core::DigestSet;
use hashdb_core::FileRecord;
use hashdb_core::RecordError;
use rocksdb::DB;
use rocksdb::ReadOptions;

use crate::error::StoreError;
use crate::options::StoreSettings;
use crate::options::engine_options;
use crate::stats::StoreStats;

// ============================================================================
// SECTION: Lookup Result
// ============================================================================

/// Outcome of a single lookup.
#[derive(Debug)]
pub enum Lookup {
    /// Key present and value decoded.
    Found(FileRecord),
    /// Key present but the value did not decode.
    Undecodable {
        /// Record carrying only the queried digests.
        record: FileRecord,
        /// Decode failure.
        error: RecordError,
    },
    /// Key absent.
    NotFound,
}

// ============================================================================
// SECTION: Reader
// ============================================================================

/// Read-only store handle.
pub struct RdsStoreReader {
    /// Engine handle opened read-only, closed on drop.
    db: DB,
    /// Read options reused for every get.
    read_options: ReadOptions,
}

impl RdsStoreReader {
    /// Opens the store at `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the directory is missing and
    /// [`StoreError::Open`] when the engine rejects it.
    pub fn open(path: &Path, settings: StoreSettings) -> Result<Self, StoreError> {
        if !path.is_dir() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let options = engine_options(settings, false);
        let db = DB::open_for_read_only(&options, path, false)
            .map_err(|err| StoreError::Open(err.to_string()))?;
        Ok(Self {
            db,
            read_options: ReadOptions::default(),
        })
    }

    /// Looks up the record stored under the composite key of `digests`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] when the engine get fails.
    pub fn lookup(&self, digests: &DigestSet) -> Result<Lookup, StoreError> {
        let key = CompositeKey::new(digests);
        let decoded = {
            let pinned = self
                .db
                .get_pinned_opt(key.as_bytes(), &self.read_options)
                .map_err(|err| StoreError::Read(err.to_string()))?;
            let Some(value) = pinned else {
                return Ok(Lookup::NotFound);
            };
            FileRecord::decode(&value)
        };
        Ok(match decoded {
            Ok(record) => Lookup::Found(record),
            Err(error) => Lookup::Undecodable {
                record: FileRecord::with_digests(digests),
                error,
            },
        })
    }

    /// Reads the engine properties behind the stats report.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Property`] when a property cannot be read.
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let estimated_keys = self.int_property("rocksdb.estimate-num-keys")?;
        let sst_bytes = self.int_property("rocksdb.total-sst-files-size")?;
        Ok(StoreStats::new(estimated_keys, sst_bytes))
    }

    /// Reads an integer property, treating an absent value as zero.
    fn int_property(&self, name: &str) -> Result<u64, StoreError> {
        self.db
            .property_int_value(name)
            .map(Option::unwrap_or_default)
            .map_err(|err| StoreError::Property(format!("{name}: {err}")))
    }
}
