// crates/hashdb-core/src/lib.rs
// ============================================================================
// Module: HashDB Core Library
// Description: Domain model for the file-hash reference store.
// Purpose: Single source of truth for key schema and value encoding.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `hashdb-core` defines the pieces shared by the ingestor and the reader:
//! digest normalization, the 144-byte composite key, the denormalized
//! [`FileRecord`] and its JSON value codec, the batch job-line grammar, and
//! the bloom filter policy both sides must agree on.
//!
//! ## Invariants
//! - Every [`CompositeKey`] is exactly [`COMPOSITE_KEY_LEN`] bytes of
//!   uppercase ASCII hex.
//! - Digests are normalized (trimmed, uppercased) before any key is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod digest;
pub mod filter;
pub mod job;
pub mod key;
pub mod record;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use digest::DigestError;
pub use digest::DigestKind;
pub use digest::DigestSet;
pub use digest::normalize_digest;
pub use filter::BLOOM_BITS_PER_KEY;
pub use filter::FilterPolicy;
pub use filter::filter_footprint_bytes;
pub use filter::filter_share_percent;
pub use job::JobLine;
pub use job::JobLineError;
pub use job::parse_job_line;
pub use key::COMPOSITE_KEY_LEN;
pub use key::CompositeKey;
pub use record::FileRecord;
pub use record::RecordError;
