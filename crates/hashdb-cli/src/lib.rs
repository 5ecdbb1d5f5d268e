// crates/hashdb-cli/src/lib.rs
// ============================================================================
// Module: HashDB CLI Library
// Description: Shared helpers for the reader, ingestor, and stats binaries.
// Purpose: Keep output formatting and lookup sessions testable in-process.
// Dependencies: hashdb-config, hashdb-core, hashdb-ingest, hashdb-store-rocksdb
// ============================================================================

//! ## Overview
//! The three executables (`hashdb`, `hashdb-migrate`, `hashdb-stats`) are thin
//! entry points over this library. Result lines are rendered by [`render`];
//! diagnostics and reports go through the [`t!`](crate::t) catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Console progress reporting for store builds.
pub mod progress;
/// Result and report formatting.
pub mod render;
/// Process setup shared by every executable.
pub mod runtime;
/// Single and batch lookup sessions.
pub mod session;
