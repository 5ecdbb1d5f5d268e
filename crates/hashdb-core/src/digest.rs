// crates/hashdb-core/src/digest.rs
// ============================================================================
// Module: Digest Normalization
// Description: Digest kinds, ingress normalization, and shape validation.
// Purpose: Guarantee every digest reaching the store is uppercase hex.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every ingress (catalogue row, single query, batch line) funnels its four
//! digests through [`DigestSet::parse`], which trims, uppercases, and checks
//! length and alphabet. Nothing downstream case-folds again.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Digest Kinds
// ============================================================================

/// The four digests that make up a reference entry, in key order.
///
/// # Invariants
/// - Declaration order is the composite key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestKind {
    /// SHA-256 digest (64 hex characters).
    Sha256,
    /// SHA-1 digest (40 hex characters).
    Sha1,
    /// MD5 digest (32 hex characters).
    Md5,
    /// CRC-32 checksum (8 hex characters).
    Crc32,
}

impl DigestKind {
    /// All digest kinds in composite key order.
    pub const ALL: [Self; 4] = [Self::Sha256, Self::Sha1, Self::Md5, Self::Crc32];

    /// Returns the expected number of hex characters.
    #[must_use]
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha1 => 40,
            Self::Md5 => 32,
            Self::Crc32 => 8,
        }
    }

    /// Returns the stable field identifier used in the value schema.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::Crc32 => "crc32",
        }
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Digest shape violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    /// Digest length does not match its kind.
    #[error("{kind} must be {expected} hex characters, got {actual}")]
    WrongLength {
        /// Digest kind being validated.
        kind: DigestKind,
        /// Expected hex length.
        expected: usize,
        /// Observed length in bytes after trimming.
        actual: usize,
    },
    /// Raw composite key has the wrong total length.
    #[error("composite key must be 144 bytes, got {actual}")]
    KeyLength {
        /// Observed key length in bytes.
        actual: usize,
    },
    /// Digest contains characters outside `[0-9A-F]`.
    #[error("{kind} contains non-hex characters")]
    NotHex {
        /// Digest kind being validated.
        kind: DigestKind,
    },
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Trims surrounding whitespace and uppercases ASCII letters.
#[must_use]
pub fn normalize_digest(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Normalizes and validates a single digest of the given kind.
fn validated(kind: DigestKind, raw: &str) -> Result<String, DigestError> {
    let value = normalize_digest(raw);
    if value.len() != kind.hex_len() {
        return Err(DigestError::WrongLength {
            kind,
            expected: kind.hex_len(),
            actual: value.len(),
        });
    }
    if !value.bytes().all(|byte| matches!(byte, b'0' ..= b'9' | b'A' ..= b'F')) {
        return Err(DigestError::NotHex {
            kind,
        });
    }
    Ok(value)
}

// ============================================================================
// SECTION: Digest Set
// ============================================================================

/// A normalized, validated quadruple of digests.
///
/// # Invariants
/// - Each field is uppercase hex of exactly [`DigestKind::hex_len`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigestSet {
    /// SHA-256 digest.
    sha256: String,
    /// SHA-1 digest.
    sha1: String,
    /// MD5 digest.
    md5: String,
    /// CRC-32 checksum.
    crc32: String,
}

impl DigestSet {
    /// Normalizes and validates four raw digests.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] for the first digest with the wrong length or
    /// a non-hex character.
    pub fn parse(sha256: &str, sha1: &str, md5: &str, crc32: &str) -> Result<Self, DigestError> {
        Ok(Self {
            sha256: validated(DigestKind::Sha256, sha256)?,
            sha1: validated(DigestKind::Sha1, sha1)?,
            md5: validated(DigestKind::Md5, md5)?,
            crc32: validated(DigestKind::Crc32, crc32)?,
        })
    }

    /// Returns the SHA-256 digest.
    #[must_use]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Returns the SHA-1 digest.
    #[must_use]
    pub fn sha1(&self) -> &str {
        &self.sha1
    }

    /// Returns the MD5 digest.
    #[must_use]
    pub fn md5(&self) -> &str {
        &self.md5
    }

    /// Returns the CRC-32 checksum.
    #[must_use]
    pub fn crc32(&self) -> &str {
        &self.crc32
    }

    /// Returns the digest of the requested kind.
    #[must_use]
    pub fn get(&self, kind: DigestKind) -> &str {
        match kind {
            DigestKind::Sha256 => &self.sha256,
            DigestKind::Sha1 => &self.sha1,
            DigestKind::Md5 => &self.md5,
            DigestKind::Crc32 => &self.crc32,
        }
    }
}
