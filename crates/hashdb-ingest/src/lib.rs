// crates/hashdb-ingest/src/lib.rs
// ============================================================================
// Module: HashDB Ingest Library
// Description: Catalogue-to-store migration with progress and audit events.
// Purpose: Build the lookup store in a single denormalizing pass.
// Dependencies: hashdb-catalog-sqlite, hashdb-store-rocksdb, serde
// ============================================================================

//! ## Overview
//! [`Ingestor`] scans the catalogue once and writes one store entry per FILE
//! row. Progress is reported to an [`IngestObserver`] for user-facing output
//! and to an [`IngestAuditSink`] as structured JSON-lines events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod ingest;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::IngestAuditEvent;
pub use audit::IngestAuditSink;
pub use audit::IngestFileAuditSink;
pub use audit::IngestNoopAuditSink;
pub use audit::IngestStderrAuditSink;
pub use ingest::IngestError;
pub use ingest::IngestObserver;
pub use ingest::IngestSettings;
pub use ingest::IngestSummary;
pub use ingest::Ingestor;
