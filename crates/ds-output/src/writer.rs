//! The `OutputWriter` trait implemented by the CSV and SQLite writers.

use crate::{CoverageRow, OutputResult, ProbeSnapshotRow};

/// A sink for snapshot and coverage rows.
///
/// Errors surface to the caller here; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores them because observer hooks cannot return one.
pub trait OutputWriter {
    /// Write the positions of every probe at one tick.
    fn write_probe_snapshots(&mut self, rows: &[ProbeSnapshotRow]) -> OutputResult<()>;

    fn write_coverage(&mut self, row: &CoverageRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
