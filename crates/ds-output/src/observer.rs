//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ds_core::Tick;
use ds_probe::ProbeStore;
use ds_sim::{CoverageReport, SimObserver, TickOutcome};

use crate::row::{CoverageRow, ProbeSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes probe positions and a coverage row at
/// every snapshot tick.
///
/// `SimObserver` methods cannot fail, so the first write error is kept and
/// later writes are still attempted.  Check it with
/// [`take_error`][Self::take_error] once the run returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    /// New cells seen since the last coverage row.
    pending_new: u64,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending_new: 0, last_error: None }
    }

    /// The stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, outcome: &TickOutcome) {
        self.pending_new += outcome.new_cells as u64;
    }

    fn on_snapshot(&mut self, tick: Tick, probes: &ProbeStore, report: &CoverageReport) {
        let rows: Vec<ProbeSnapshotRow> = probes
            .iter()
            .map(|p| ProbeSnapshotRow {
                probe_id: p.id.0,
                tick:     tick.0,
                lon:      p.position.lon,
                lat:      p.position.lat,
            })
            .collect();
        let result = self.writer.write_probe_snapshots(&rows);
        self.store_err(result);

        let row = CoverageRow {
            tick:               tick.0,
            elapsed_days:       report.elapsed_days,
            new_cells:          std::mem::take(&mut self.pending_new),
            explored_cells:     report.explored_cells,
            percent_hundredths: report.percent_hundredths(),
        };
        let result = self.writer.write_coverage(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
