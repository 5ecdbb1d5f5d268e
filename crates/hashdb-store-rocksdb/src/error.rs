// crates/hashdb-store-rocksdb/src/error.rs
// ============================================================================
// Module: Store Errors
// Description: Error type shared by the writer, reader, and stats probe.
// Purpose: Keep engine failures as plain strings at the crate boundary.
// Dependencies: thiserror
// ============================================================================

//! Store error type.

use std::path::PathBuf;

use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store directory does not exist (read-only opens never create it).
    #[error("store not found: {0}")]
    NotFound(PathBuf),
    /// Engine refused to open the store.
    #[error("store open error: {0}")]
    Open(String),
    /// Point get or iteration failed.
    #[error("store read error: {0}")]
    Read(String),
    /// Put or flush failed.
    #[error("store write error: {0}")]
    Write(String),
    /// Engine property could not be read.
    #[error("store property error: {0}")]
    Property(String),
    /// Record could not be keyed or encoded.
    #[error("store invalid record: {0}")]
    Invalid(String),
}
