// crates/hashdb-core/src/record.rs
// ============================================================================
// Module: File Record
// Description: Denormalized file metadata and its JSON value codec.
// Purpose: Carry all fourteen reference attributes in one store value.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`FileRecord`] is the joined view of one catalogue FILE row plus its
//! package, operating system, and manufacturer attributes. It is serialized
//! as a JSON object whose field identifiers are stable and never omitted.
//! Provenance fields are empty strings when the join had no match.
//!
//! Decoding is lenient about missing identifiers (they default to empty or
//! zero) so values written by older builds still render.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::digest::DigestError;
use crate::digest::DigestSet;
use crate::key::CompositeKey;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Value codec errors.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Record could not be serialized.
    #[error("record encode failed: {0}")]
    Encode(String),
    /// Stored bytes are not a valid record.
    #[error("record decode failed: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: File Record
// ============================================================================

/// Denormalized reference entry stored under a [`CompositeKey`].
///
/// # Invariants
/// - Field order and names are the on-disk value schema.
/// - Absent joins are empty strings (or zero), never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecord {
    /// SHA-256 digest (uppercase hex).
    pub sha256: String,
    /// SHA-1 digest (uppercase hex).
    pub sha1: String,
    /// MD5 digest (uppercase hex).
    pub md5: String,
    /// CRC-32 checksum (uppercase hex).
    pub crc32: String,
    /// File name as catalogued.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Package identifier from the FILE row.
    pub package_id: i64,
    /// Package name (empty when no package matched).
    pub package_name: String,
    /// Package version.
    pub package_version: String,
    /// Implementation language.
    pub language: String,
    /// Application type.
    pub application_type: String,
    /// Operating system name.
    pub os_name: String,
    /// Operating system version.
    pub os_version: String,
    /// Manufacturer name.
    pub manufacturer_name: String,
}

impl FileRecord {
    /// Builds an otherwise empty record carrying only the given digests.
    ///
    /// Used when a stored value exists but cannot be decoded.
    #[must_use]
    pub fn with_digests(digests: &DigestSet) -> Self {
        Self {
            sha256: digests.sha256().to_string(),
            sha1: digests.sha1().to_string(),
            md5: digests.md5().to_string(),
            crc32: digests.crc32().to_string(),
            ..Self::default()
        }
    }

    /// Validates the record digests and returns them as a set.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when any digest is malformed.
    pub fn digests(&self) -> Result<DigestSet, DigestError> {
        DigestSet::parse(&self.sha256, &self.sha1, &self.md5, &self.crc32)
    }

    /// Returns the composite key for this record.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when any digest is malformed.
    pub fn key(&self) -> Result<CompositeKey, DigestError> {
        Ok(CompositeKey::new(&self.digests()?))
    }

    /// Serializes the record into its stored value form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Encode`] when serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec(self).map_err(|err| RecordError::Encode(err.to_string()))
    }

    /// Decodes a stored value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] when the bytes are not a JSON record.
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        serde_json::from_slice(bytes).map_err(|err| RecordError::Decode(err.to_string()))
    }

    /// Returns true when the record has a named package.
    #[must_use]
    pub fn has_package_name(&self) -> bool {
        !self.package_name.is_empty()
    }
}
