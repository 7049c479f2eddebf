//! Simulation observer trait for progress reporting and data collection.

use ds_core::Tick;
use ds_probe::ProbeStore;

use crate::{CoverageReport, TickOutcome};

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] and
/// [`Simulation::run_ticks`][crate::Simulation::run_ticks].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_snapshot(&mut self, tick: Tick, _probes: &ProbeStore, report: &CoverageReport) {
///         println!("{tick}: {report}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each step, with the tick the step starts from.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after each step.  `outcome.advanced` is `false` while no
    /// probes are deployed.
    fn on_tick_end(&mut self, _tick: Tick, _outcome: &TickOutcome) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// probe state and a freshly computed coverage report.
    fn on_snapshot(&mut self, _tick: Tick, _probes: &ProbeStore, _report: &CoverageReport) {}

    /// Called once when `run` returns.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
