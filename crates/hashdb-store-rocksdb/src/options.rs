// crates/hashdb-store-rocksdb/src/options.rs
// ============================================================================
// Module: Engine Options
// Description: Block-based table and bloom filter configuration.
// Purpose: Build identical engine options for the writer and the reader.
// Dependencies: hashdb-core, rocksdb
// ============================================================================

//! ## Overview
//! Every table uses the block-based format with a bloom filter at
//! [`FilterPolicy::STANDARD`]. Index and filter blocks live in the block
//! cache. An optional shared LRU cache size can be tuned; the filter cannot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use hashdb_core::FilterPolicy;
use rocksdb::BlockBasedOptions;
use rocksdb::Cache;
use rocksdb::Options;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Operator-tunable store settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSettings {
    /// Shared LRU block cache size; engine default when unset.
    pub block_cache_bytes: Option<usize>,
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds engine options for opening the store.
///
/// `create_if_missing` is only set by the writer.
#[must_use]
pub fn engine_options(settings: StoreSettings, create_if_missing: bool) -> Options {
    let mut options = Options::default();
    options.create_if_missing(create_if_missing);
    options.set_block_based_table_factory(&table_options(FilterPolicy::STANDARD, settings));
    options
}

/// Builds the block-based table options for `policy`.
fn table_options(policy: FilterPolicy, settings: StoreSettings) -> BlockBasedOptions {
    let mut table = BlockBasedOptions::default();
    table.set_bloom_filter(f64::from(policy.bits_per_key), false);
    table.set_cache_index_and_filter_blocks(policy.cache_index_and_filter_blocks);
    if let Some(bytes) = settings.block_cache_bytes {
        let cache = Cache::new_lru_cache(bytes);
        table.set_block_cache(&cache);
    }
    table
}
