// crates/hashdb-core/src/job.rs
// ============================================================================
// Module: Batch Job Lines
// Description: Grammar for the comma-separated batch lookup file.
// Purpose: Classify each job line as skipped, a query, or invalid.
// Dependencies: crate::digest, thiserror
// ============================================================================

//! ## Overview
//! A job file holds one lookup per line: four comma-separated digests in key
//! order. Blank lines and `#` comments are skipped. Each field is trimmed and
//! uppercased before it is validated, so job files may mix hex case freely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::digest::DigestError;
use crate::digest::DigestSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field separator within a job line.
const FIELD_SEPARATOR: char = ',';
/// Comment marker recognised at the start of a trimmed line.
const COMMENT_MARKER: char = '#';

// ============================================================================
// SECTION: Types
// ============================================================================

/// Why a job line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobLineError {
    /// Line did not split into exactly four fields.
    #[error("expected 4 comma-separated fields, got {0}")]
    FieldCount(usize),
    /// A field is not a well-formed digest.
    #[error(transparent)]
    Digest(#[from] DigestError),
}

/// Classification of a single job line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobLine {
    /// Blank line or comment.
    Skip,
    /// Normalized lookup request.
    Query(DigestSet),
    /// Malformed line to report and skip.
    Invalid(JobLineError),
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses one job line.
#[must_use]
pub fn parse_job_line(line: &str) -> JobLine {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return JobLine::Skip;
    }
    let fields: Vec<&str> = trimmed.split(FIELD_SEPARATOR).collect();
    let [sha256, sha1, md5, crc32] = fields.as_slice() else {
        return JobLine::Invalid(JobLineError::FieldCount(fields.len()));
    };
    match DigestSet::parse(sha256, sha1, md5, crc32) {
        Ok(digests) => JobLine::Query(digests),
        Err(err) => JobLine::Invalid(err.into()),
    }
}
