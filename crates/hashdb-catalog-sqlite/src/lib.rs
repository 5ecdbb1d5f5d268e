// crates/hashdb-catalog-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Catalog Library
// Description: Denormalizing reader over the RDS SQLite catalogue.
// Purpose: Feed joined file records to the ingestor.
// Dependencies: hashdb-core, rusqlite
// ============================================================================

//! ## Overview
//! Opens the reference catalogue read-only and streams one [`FileRecord`]
//! per FILE row, joined with its package, operating system, and manufacturer.
//!
//! [`FileRecord`]: hashdb_core::FileRecord

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogError;
pub use catalog::RdsCatalog;
