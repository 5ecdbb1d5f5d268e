// crates/hashdb-store-rocksdb/src/stats.rs
// ============================================================================
// Module: Store Stats
// Description: Key count, table size, and bloom filter footprint.
// Purpose: Back the stats probe report.
// Dependencies: hashdb-core
// ============================================================================

//! Size snapshot read from engine properties. The filter footprint is the
//! theoretical `ceil(keys * bits_per_key / 8)`, not a measured value.

use hashdb_core::FilterPolicy;
use hashdb_core::filter_share_percent;

/// Snapshot of engine size properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Engine estimate of live keys.
    pub estimated_keys: u64,
    /// Total size of all table files in bytes.
    pub sst_bytes: u64,
    /// Theoretical bloom filter size in bytes.
    pub filter_bytes: u64,
}

impl StoreStats {
    /// Derives the filter footprint from the key estimate.
    #[must_use]
    pub const fn new(estimated_keys: u64, sst_bytes: u64) -> Self {
        Self {
            estimated_keys,
            sst_bytes,
            filter_bytes: FilterPolicy::STANDARD.footprint_bytes(estimated_keys),
        }
    }

    /// Filter size as a percentage of table size; `None` for an empty store.
    #[must_use]
    pub fn filter_share_percent(&self) -> Option<f64> {
        filter_share_percent(self.filter_bytes, self.sst_bytes)
    }
}
