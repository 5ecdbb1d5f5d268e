// crates/hashdb-catalog-sqlite/src/catalog.rs
// ============================================================================
// Module: RDS Catalog
// Description: Read-only SQLite access and the denormalization join.
// Purpose: Produce complete file records in a single scan.
// Dependencies: hashdb-core, rusqlite, thiserror
// ============================================================================

//! ## Overview
//! The catalogue is normalized across FILE, PKG, OS, and MFG. The store is
//! not, so the join runs once here at build time and lookups never repeat it.
//! Every FILE row yields a record: unmatched joins and SQL NULL become empty
//! strings (or zero for integer columns).
//!
//! Digests are normalized on the way out. A row with a malformed digest
//! aborts the scan, since a bad key can never be looked up again.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use hashdb_core::DigestError;
use hashdb_core::FileRecord;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::Row;
use thiserror::Error;

// ============================================================================
// SECTION: Queries
// ============================================================================

/// Joined scan over every catalogued file.
const JOIN_QUERY: &str = "SELECT f.sha256, f.sha1, f.md5, f.crc32, f.file_name, f.file_size, \
                          f.package_id, p.name, p.version, p.language, p.application_type, \
                          o.name, o.version, m.name \
                          FROM FILE f \
                          LEFT JOIN PKG p ON f.package_id = p.package_id \
                          LEFT JOIN OS o ON p.operating_system_id = o.operating_system_id \
                          AND p.manufacturer_id = o.manufacturer_id \
                          LEFT JOIN MFG m ON o.manufacturer_id = m.manufacturer_id";

/// FILE row total carried by progress audit events.
const COUNT_QUERY: &str = "SELECT COUNT(*) FROM FILE";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalogue access errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalogue file does not exist.
    #[error("catalog not found: {0}")]
    NotFound(PathBuf),
    /// `SQLite` engine error.
    #[error("catalog db error: {0}")]
    Db(String),
    /// A FILE row carries a malformed digest.
    #[error("catalog row {row}: invalid digest: {source}")]
    InvalidDigest {
        /// One-based row position in the scan.
        row: u64,
        /// Underlying digest violation, naming the column.
        source: DigestError,
    },
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Read-only handle on the reference catalogue.
pub struct RdsCatalog {
    /// Read-only connection, closed on drop.
    connection: Connection,
}

impl RdsCatalog {
    /// Opens the catalogue at `path` without write access.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the file is missing and
    /// [`CatalogError::Db`] when `SQLite` rejects it.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if !path.is_file() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path, flags)
            .map_err(|err| CatalogError::Db(err.to_string()))?;
        Ok(Self {
            connection,
        })
    }

    /// Returns the number of FILE rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Db`] when the count query fails.
    pub fn file_count(&self) -> Result<u64, CatalogError> {
        let count: i64 = self
            .connection
            .query_row(COUNT_QUERY, [], |row| row.get(0))
            .map_err(|err| CatalogError::Db(err.to_string()))?;
        u64::try_from(count).map_err(|err| CatalogError::Db(err.to_string()))
    }

    /// Streams every joined record to `visit` in scan order and returns the
    /// number of records visited.
    ///
    /// The scan stops at the first error, whether raised by the catalogue or
    /// by `visit`.
    ///
    /// # Errors
    ///
    /// Returns the visitor's error, or a [`CatalogError`] converted into it
    /// when the query fails or a row has a malformed digest.
    pub fn for_each_record<E, F>(&self, mut visit: F) -> Result<u64, E>
    where
        E: From<CatalogError>,
        F: FnMut(FileRecord) -> Result<(), E>,
    {
        let mut statement = self
            .connection
            .prepare(JOIN_QUERY)
            .map_err(|err| CatalogError::Db(err.to_string()))?;
        let mut rows = statement.query([]).map_err(|err| CatalogError::Db(err.to_string()))?;
        let mut count: u64 = 0;
        while let Some(row) = rows.next().map_err(|err| CatalogError::Db(err.to_string()))? {
            count += 1;
            let record = record_from_row(row, count)?;
            visit(record)?;
        }
        Ok(count)
    }
}

// ============================================================================
// SECTION: Row Mapping
// ============================================================================

/// Maps one joined row into a normalized record.
fn record_from_row(row: &Row<'_>, position: u64) -> Result<FileRecord, CatalogError> {
    let mut record = FileRecord {
        sha256: text(row, 0)?,
        sha1: text(row, 1)?,
        md5: text(row, 2)?,
        crc32: text(row, 3)?,
        file_name: text(row, 4)?,
        file_size: integer(row, 5)?,
        package_id: integer(row, 6)?,
        package_name: text(row, 7)?,
        package_version: text(row, 8)?,
        language: text(row, 9)?,
        application_type: text(row, 10)?,
        os_name: text(row, 11)?,
        os_version: text(row, 12)?,
        manufacturer_name: text(row, 13)?,
    };
    let digests = record.digests().map_err(|source| CatalogError::InvalidDigest {
        row: position,
        source,
    })?;
    record.sha256 = digests.sha256().to_string();
    record.sha1 = digests.sha1().to_string();
    record.md5 = digests.md5().to_string();
    record.crc32 = digests.crc32().to_string();
    Ok(record)
}

/// Reads a nullable text column; NULL becomes an empty string.
fn text(row: &Row<'_>, index: usize) -> Result<String, CatalogError> {
    row.get::<_, Option<String>>(index)
        .map(Option::unwrap_or_default)
        .map_err(|err| CatalogError::Db(err.to_string()))
}

/// Reads a nullable integer column; NULL becomes zero.
fn integer(row: &Row<'_>, index: usize) -> Result<i64, CatalogError> {
    row.get::<_, Option<i64>>(index)
        .map(Option::unwrap_or_default)
        .map_err(|err| CatalogError::Db(err.to_string()))
}
