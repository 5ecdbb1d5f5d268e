// crates/hashdb-config/src/lib.rs
// ============================================================================
// Module: HashDB Config Library
// Description: Configuration model and loader for the hash lookup tools.
// Purpose: Single source of truth for hashdb.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `hashdb-config` resolves and validates the configuration shared by the
//! ingestor, the reader, and the stats probe. Every field has a default, so
//! the tools run with no configuration file at all.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
