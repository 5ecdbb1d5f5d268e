// crates/hashdb-core/src/filter.rs
// ============================================================================
// Module: Bloom Filter Policy
// Description: Shared filter parameters and footprint arithmetic.
// Purpose: Keep build-time and open-time filter configuration identical.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! The store attaches a bloom filter to every block-based table. A reader that
//! opens the store with a different filter configuration silently loses the
//! filter, so both sides take their parameters from [`FilterPolicy::STANDARD`].
//!
//! ## Invariants
//! - Bits per key is fixed at [`BLOOM_BITS_PER_KEY`].
//! - Index and filter blocks are admitted to the block cache.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bloom filter bits allocated per key.
pub const BLOOM_BITS_PER_KEY: u32 = 10;

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Filter settings applied to the block-based table factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Bloom filter bits per key.
    pub bits_per_key: u32,
    /// Whether index and filter blocks are held in the block cache.
    pub cache_index_and_filter_blocks: bool,
}

impl FilterPolicy {
    /// The only policy the store is built and opened with.
    pub const STANDARD: Self = Self {
        bits_per_key: BLOOM_BITS_PER_KEY,
        cache_index_and_filter_blocks: true,
    };

    /// Theoretical filter size in bytes for `keys` entries under this policy.
    #[must_use]
    pub const fn footprint_bytes(self, keys: u64) -> u64 {
        filter_footprint_bytes(keys, self.bits_per_key)
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ============================================================================
// SECTION: Footprint
// ============================================================================

/// Returns `ceil(keys * bits_per_key / 8)`.
#[must_use]
pub const fn filter_footprint_bytes(keys: u64, bits_per_key: u32) -> u64 {
    keys.saturating_mul(bits_per_key as u64).div_ceil(8)
}

/// Returns the filter size as a percentage of `sst_bytes`, or `None` when the
/// store has no table files yet.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Percentages are display-only approximations.")]
pub fn filter_share_percent(filter_bytes: u64, sst_bytes: u64) -> Option<f64> {
    if sst_bytes == 0 {
        return None;
    }
    Some(filter_bytes as f64 / sst_bytes as f64 * 100.0)
}
