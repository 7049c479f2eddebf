//! CSV output backend.
//!
//! Writes `probe_snapshots.csv` and `coverage.csv` into the output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CoverageRow, OutputResult, ProbeSnapshotRow};

pub const SNAPSHOT_HEADER: [&str; 4] = ["probe_id", "tick", "lon", "lat"];
pub const COVERAGE_HEADER: [&str; 5] =
    ["tick", "elapsed_days", "new_cells", "explored_cells", "percent_explored"];

pub struct CsvWriter {
    snapshots: Writer<File>,
    coverage:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create both files in `dir` (truncating old ones) and write headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("probe_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut coverage = Writer::from_path(dir.join("coverage.csv"))?;
        coverage.write_record(COVERAGE_HEADER)?;

        Ok(Self { snapshots, coverage, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_probe_snapshots(&mut self, rows: &[ProbeSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.probe_id.to_string(),
                row.tick.to_string(),
                format!("{:.3}", row.lon),
                format!("{:.3}", row.lat),
            ])?;
        }
        Ok(())
    }

    fn write_coverage(&mut self, row: &CoverageRow) -> OutputResult<()> {
        self.coverage.write_record(&[
            row.tick.to_string(),
            row.elapsed_days.to_string(),
            row.new_cells.to_string(),
            row.explored_cells.to_string(),
            row.percent_text(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.coverage.flush()?;
        Ok(())
    }
}
