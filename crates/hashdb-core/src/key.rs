// crates/hashdb-core/src/key.rs
// ============================================================================
// Module: Composite Key
// Description: The 144-byte concatenated digest key.
// Purpose: Provide O(1) exact-match keys for the point-lookup store.
// Dependencies: crate::digest
// ============================================================================

//! ## Overview
//! The store key is `SHA256 || SHA1 || MD5 || CRC32` as uppercase ASCII hex
//! with no separators. Cryptographic digests make the key space effectively
//! uniform, which is what lets the bloom filter reject most misses in memory.
//! The schema forecloses lookup by any single digest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::digest::DigestError;
use crate::digest::DigestKind;
use crate::digest::DigestSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exact length of every composite key in bytes (64 + 40 + 32 + 8).
pub const COMPOSITE_KEY_LEN: usize = 144;

// ============================================================================
// SECTION: Composite Key
// ============================================================================

/// Store key built from a validated [`DigestSet`].
///
/// # Invariants
/// - Always [`COMPOSITE_KEY_LEN`] bytes of `[0-9A-F]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Concatenates the digests in key order.
    #[must_use]
    pub fn new(digests: &DigestSet) -> Self {
        let mut key = String::with_capacity(COMPOSITE_KEY_LEN);
        for kind in DigestKind::ALL {
            key.push_str(digests.get(kind));
        }
        Self(key)
    }

    /// Splits and validates a raw stored key back into its digests.
    ///
    /// Stored keys are already normalized, so lowercase hex is rejected here.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when the key is not 144 bytes of uppercase hex.
    pub fn parse(raw: &[u8]) -> Result<DigestSet, DigestError> {
        if raw.len() != COMPOSITE_KEY_LEN {
            return Err(DigestError::KeyLength {
                actual: raw.len(),
            });
        }
        let mut fields = [""; 4];
        let mut offset = 0;
        for (slot, kind) in fields.iter_mut().zip(DigestKind::ALL) {
            let end = offset + kind.hex_len();
            let segment = &raw[offset .. end];
            if !segment.iter().all(|byte| matches!(byte, b'0' ..= b'9' | b'A' ..= b'F')) {
                return Err(DigestError::NotHex {
                    kind,
                });
            }
            *slot = std::str::from_utf8(segment).map_err(|_| DigestError::NotHex {
                kind,
            })?;
            offset = end;
        }
        DigestSet::parse(fields[0], fields[1], fields[2], fields[3])
    }

    /// Returns the key bytes handed to the engine.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the key as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
