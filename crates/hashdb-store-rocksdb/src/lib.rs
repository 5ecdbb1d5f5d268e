// crates/hashdb-store-rocksdb/src/lib.rs
// ============================================================================
// Module: RocksDB Store Library
// Description: Writer, read-only reader, and stats for the lookup store.
// Purpose: Own every interaction with the embedded key-value engine.
// Dependencies: hashdb-core, rocksdb
// ============================================================================

//! ## Overview
//! The store maps a 144-byte composite key to a JSON-encoded
//! [`FileRecord`](hashdb_core::FileRecord). It is written once by
//! [`RdsStoreWriter`] and afterwards only opened read-only by
//! [`RdsStoreReader`]. Both sides build their engine options through
//! [`engine_options`], so the bloom filter found at open time is always the
//! one written at build time.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod options;
pub mod reader;
pub mod stats;
pub mod writer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::StoreError;
pub use options::StoreSettings;
pub use options::engine_options;
pub use reader::Lookup;
pub use reader::RdsStoreReader;
pub use stats::StoreStats;
pub use writer::RdsStoreWriter;
