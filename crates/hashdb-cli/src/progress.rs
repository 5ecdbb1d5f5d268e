// crates/hashdb-cli/src/progress.rs
// ============================================================================
// Module: Console Progress
// Description: Prints store build progress lines.
// Purpose: Bridge ingest callbacks to localized console output.
// Dependencies: hashdb-ingest
// ============================================================================

//! Prints `Migrated N records` at each checkpoint and a final total line.
//! Write failures are ignored; the build itself decides the exit code.

use std::io::Write;

use hashdb_ingest::IngestObserver;

use crate::t;

/// Progress observer writing to a console stream.
pub struct ConsoleProgress<W: Write> {
    /// Destination stream.
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    /// Creates an observer writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
        }
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> IngestObserver for ConsoleProgress<W> {
    fn on_progress(&mut self, records: u64) {
        let _ = writeln!(self.out, "{}", t!("migrate.progress", count = records));
    }

    fn on_complete(&mut self, total: u64) {
        let _ = writeln!(self.out, "{}", t!("migrate.done", count = total));
        let _ = self.out.flush();
    }
}
