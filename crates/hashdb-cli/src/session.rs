// crates/hashdb-cli/src/session.rs
// ============================================================================
// Module: Lookup Session
// Description: Single and batch lookups over an open read-only store.
// Purpose: Turn queries into result blocks while keeping the batch running.
// Dependencies: hashdb-core, hashdb-store-rocksdb
// ============================================================================

//! ## Overview
//! A [`LookupSession`] borrows a [`LookupSource`] and writes results to one
//! writer and diagnostics to another. Batch lookups read the job file line by
//! line, emit one result block per accepted line in input order, and never
//! abort on a malformed line, an undecodable value, or an engine error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::BufRead;
use std::io::Write;

use hashdb_core::DigestSet;
use hashdb_core::JobLine;
use hashdb_core::parse_job_line;
use hashdb_store_rocksdb::Lookup;
use hashdb_store_rocksdb::RdsStoreReader;
use hashdb_store_rocksdb::StoreError;

use crate::render::render_lookup_error;
use crate::render::render_not_found;
use crate::render::render_record;
use crate::t;

// ============================================================================
// SECTION: Source Trait
// ============================================================================

/// Anything that can answer a point lookup.
pub trait LookupSource {
    /// Looks up one normalized digest quadruple.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the underlying get fails.
    fn lookup(&self, digests: &DigestSet) -> Result<Lookup, StoreError>;
}

impl LookupSource for RdsStoreReader {
    fn lookup(&self, digests: &DigestSet) -> Result<Lookup, StoreError> {
        Self::lookup(self, digests)
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// How a single lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A record block was written (decodable or not).
    Found,
    /// A `NOT FOUND` line was written.
    NotFound,
    /// An `ERROR:` line was written.
    Error,
}

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Hits.
    pub found: u64,
    /// Misses.
    pub not_found: u64,
    /// Malformed lines skipped.
    pub invalid: u64,
    /// Engine errors.
    pub errors: u64,
}

impl BatchSummary {
    /// Lines that produced a result block.
    #[must_use]
    pub const fn accepted(&self) -> u64 {
        self.found + self.not_found + self.errors
    }

    /// Counts one lookup outcome.
    const fn count(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Found => self.found += 1,
            Outcome::NotFound => self.not_found += 1,
            Outcome::Error => self.errors += 1,
        }
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Lookup driver writing results to `out` and diagnostics to `err`.
pub struct LookupSession<'a, S: LookupSource + ?Sized, O: Write, E: Write> {
    /// Store being queried.
    source: &'a S,
    /// Result stream.
    out: O,
    /// Diagnostic stream.
    err: E,
}

impl<'a, S: LookupSource + ?Sized, O: Write, E: Write> LookupSession<'a, S, O, E> {
    /// Creates a session over `source`.
    pub const fn new(source: &'a S, out: O, err: E) -> Self {
        Self {
            source,
            out,
            err,
        }
    }

    /// Looks up one quadruple and writes its result block.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only when an output stream fails.
    pub fn lookup(&mut self, digests: &DigestSet) -> io::Result<Outcome> {
        match self.source.lookup(digests) {
            Ok(Lookup::Found(record)) => {
                render_record(&mut self.out, &record)?;
                Ok(Outcome::Found)
            }
            Ok(Lookup::Undecodable {
                record,
                error,
            }) => {
                writeln!(
                    self.err,
                    "{}",
                    t!("lookup.decode_warning", sha256 = digests.sha256(), error = error)
                )?;
                render_record(&mut self.out, &record)?;
                Ok(Outcome::Found)
            }
            Ok(Lookup::NotFound) => {
                render_not_found(&mut self.out, digests.sha256())?;
                Ok(Outcome::NotFound)
            }
            Err(error) => {
                render_lookup_error(&mut self.out, &error.to_string())?;
                Ok(Outcome::Error)
            }
        }
    }

    /// Runs every line of a job file through [`Self::lookup`].
    ///
    /// Lines are decoded lossily, so invalid UTF-8 surfaces as an invalid
    /// line rather than aborting the batch.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the input cannot be read or an output
    /// stream fails.
    pub fn run_batch<R: BufRead>(&mut self, input: R) -> io::Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        for (index, line) in input.split(b'\n').enumerate() {
            let line = line?;
            let text = String::from_utf8_lossy(&line);
            match parse_job_line(&text) {
                JobLine::Skip => {}
                JobLine::Query(digests) => summary.count(self.lookup(&digests)?),
                JobLine::Invalid(error) => {
                    summary.invalid += 1;
                    writeln!(
                        self.err,
                        "{}",
                        t!("batch.invalid_line", line = index + 1, error = error)
                    )?;
                }
            }
        }
        self.out.flush()?;
        Ok(summary)
    }
}
