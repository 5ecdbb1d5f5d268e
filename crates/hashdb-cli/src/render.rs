// crates/hashdb-cli/src/render.rs
// ============================================================================
// Module: Output Rendering
// Description: Lookup result blocks, byte sizes, and the stats report.
// Purpose: Keep stdout formats in one place.
// Dependencies: hashdb-core, hashdb-store-rocksdb
// ============================================================================

//! ## Overview
//! Lookup results are machine-consumed, so their labels are fixed and never
//! localized: a hit is a `FOUND` header followed by indented field lines, a
//! miss is a single `NOT FOUND` line, and an engine failure is an `ERROR:`
//! line. Provenance lines are omitted when their field is empty.
//!
//! The stats report is for people and goes through the catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use hashdb_core::BLOOM_BITS_PER_KEY;
use hashdb_core::FileRecord;
use hashdb_store_rocksdb::StoreStats;

use crate::t;

// ============================================================================
// SECTION: Lookup Results
// ============================================================================

/// Writes the block for a found record.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn render_record<W: Write>(out: &mut W, record: &FileRecord) -> io::Result<()> {
    writeln!(out, "FOUND {}", record.sha256)?;
    writeln!(out, "  File: {} ({} bytes)", record.file_name, record.file_size)?;
    writeln!(out, "  SHA-256: {}", record.sha256)?;
    writeln!(out, "  SHA-1: {}", record.sha1)?;
    writeln!(out, "  MD5: {}", record.md5)?;
    writeln!(out, "  CRC-32: {}", record.crc32)?;
    if record.has_package_name() {
        let name = joined(&record.package_name, &record.package_version);
        writeln!(out, "  Package: {name} (ID: {})", record.package_id)?;
    } else {
        writeln!(out, "  Package ID: {}", record.package_id)?;
    }
    if !record.language.is_empty() {
        writeln!(out, "  Language: {}", record.language)?;
    }
    if !record.application_type.is_empty() {
        writeln!(out, "  Type: {}", record.application_type)?;
    }
    if !record.os_name.is_empty() {
        writeln!(out, "  OS: {}", joined(&record.os_name, &record.os_version))?;
    }
    if !record.manufacturer_name.is_empty() {
        writeln!(out, "  Manufacturer: {}", record.manufacturer_name)?;
    }
    Ok(())
}

/// Writes the line for a key that is not in the store.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn render_not_found<W: Write>(out: &mut W, sha256: &str) -> io::Result<()> {
    writeln!(out, "NOT FOUND {sha256}")
}

/// Writes the line for a failed engine get.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn render_lookup_error<W: Write>(out: &mut W, detail: &str) -> io::Result<()> {
    writeln!(out, "ERROR: {detail}")
}

/// Joins a name and optional version with a single space.
fn joined(name: &str, version: &str) -> String {
    if version.is_empty() { name.to_string() } else { format!("{name} {version}") }
}

// ============================================================================
// SECTION: Sizes
// ============================================================================

/// Bytes per kibibyte.
const KB: u64 = 1024;
/// Bytes per mebibyte.
const MB: u64 = KB * 1024;
/// Bytes per gibibyte.
const GB: u64 = MB * 1024;

/// Formats a byte count as bytes, KB, MB, or GB with two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Sizes are display-only approximations.")]
pub fn format_bytes(bytes: u64) -> String {
    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{b} bytes"),
    }
}

// ============================================================================
// SECTION: Stats Report
// ============================================================================

/// Writes the human-readable stats report.
///
/// The filter section is skipped for an empty store.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn render_stats<W: Write>(out: &mut W, stats: &StoreStats) -> io::Result<()> {
    writeln!(out, "{}", t!("stats.header"))?;
    writeln!(out, "{}", t!("stats.database"))?;
    writeln!(out, "{}", t!("stats.keys", count = stats.estimated_keys))?;
    writeln!(out, "{}", t!("stats.sst", size = format_bytes(stats.sst_bytes)))?;
    if stats.estimated_keys > 0 {
        writeln!(out)?;
        writeln!(out, "{}", t!("stats.filter.header"))?;
        writeln!(out, "{}", t!("stats.filter.keys", count = stats.estimated_keys))?;
        writeln!(out, "{}", t!("stats.filter.bits", bits = BLOOM_BITS_PER_KEY))?;
        writeln!(out, "{}", t!("stats.filter.size", size = format_bytes(stats.filter_bytes)))?;
        match stats.filter_share_percent() {
            Some(percent) => writeln!(
                out,
                "{}",
                t!("stats.filter.share", percent = format!("{percent:.2}"))
            )?,
            None => writeln!(out, "{}", t!("stats.filter.share_unknown"))?,
        }
    }
    writeln!(out)
}
