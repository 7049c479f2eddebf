//! The `Simulation` aggregate and its tick loop.

use log::{debug, info, trace, warn};

use ds_core::{DriftSource, DsError, ProbeId, SimClock, SimConfig, Surface, SurfacePoint, Tick};
use ds_grid::{CellFold, CellKey, CoverageGrid, LineCells};
use ds_probe::{DriftSources, MotionModel, Probe, ProbeStore, SegmentPolicy, Step};

use crate::builder::DriftFactory;
use crate::{CoverageReport, SimObserver, SimResult, Snapshot};

// ── State & outcomes ──────────────────────────────────────────────────────────

/// Lifecycle of the core.  There is no way back to `Idle`: probes are
/// never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// No probes deployed; `tick` is a no-op and the clock stands still.
    Idle,
    /// At least one probe deployed; every `tick` advances the clock by one.
    Running,
}

/// What one call to [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Clock value after the step.
    pub tick:       Tick,
    /// `false` if the simulation was Idle and nothing happened.
    pub advanced:   bool,
    /// Cells marked for the first time during this step.
    pub new_cells:  usize,
    /// Probes that wrapped or teleported this step.
    pub crossings:  usize,
}

impl TickOutcome {
    fn idle(tick: Tick) -> Self {
        Self { tick, advanced: false, new_cells: 0, crossings: 0 }
    }
}

/// One probe's result from the motion phase.
struct ProbeMotion {
    step:  Step,
    cells: Vec<CellKey>,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The whole coverage-tracking core.
///
/// Owns the probes, their drift sources, the coverage grid and the clock.
/// State is read through the accessors; all mutation goes through [`deploy`](Self::deploy) and
/// [`tick`](Self::tick).  Each tick runs in two phases:
///
/// 1. **Motion** (optionally parallel with the `parallel` feature): advance
///    every probe with its own drift source and walk the cells of its
///    segment into a private list.
/// 2. **Apply** (sequential, ascending `ProbeId`): merge each list into the
///    grid, move the probe, close its tick.
///
/// Because the grid is only written in phase 2, serial and parallel builds
/// produce identical coverage.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
///
/// Fields are not reachable from outside the crate:
///
/// ```compile_fail
/// use ds_core::{SimConfig, Tick};
/// use ds_sim::SimBuilder;
///
/// let mut sim = SimBuilder::new(SimConfig::default()).build().unwrap();
/// sim.clock.current_tick = Tick(0);
/// ```
pub struct Simulation<D: DriftSource + Send> {
    pub(crate) config: SimConfig,

    /// Advanced once per tick while Running.
    pub(crate) clock: SimClock,

    pub(crate) surface: Surface,

    pub(crate) motion: MotionModel,

    pub(crate) probes: ProbeStore,

    /// Per-probe random streams, separated from `probes` for the split borrow.
    pub(crate) drift: DriftSources<D>,

    pub(crate) grid: CoverageGrid,

    pub(crate) fold:       CellFold,
    pub(crate) make_drift: DriftFactory<D>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<D: DriftSource + Send> Simulation<D> {
    // ── Control input ─────────────────────────────────────────────────────

    /// Deploy `count` probes at longitude `start_lon`.
    ///
    /// Probes are spaced evenly across the inner latitude band (between the
    /// two bias thresholds), both ends included; a single probe goes to the
    /// band's middle.  If the thresholds leave no band, the full latitude
    /// range is used.  Can be called again later to add more probes.
    pub fn deploy(&mut self, count: usize, start_lon: f64) -> SimResult<Vec<ProbeId>> {
        if count == 0 {
            return Err(DsError::InvalidArgument("deploy count must be at least 1".into()).into());
        }
        if !start_lon.is_finite()
            || start_lon < self.surface.lon_min
            || start_lon > self.surface.lon_max
        {
            return Err(DsError::InvalidArgument(format!(
                "start longitude {start_lon} outside [{}, {}]",
                self.surface.lon_min, self.surface.lon_max
            ))
            .into());
        }

        // ProbeId::INVALID (u32::MAX) is never handed out.
        let room = u32::MAX as usize - self.probes.len();
        if count > room {
            return Err(DsError::InvalidArgument(format!(
                "cannot deploy {count} probes: only {room} ids left"
            ))
            .into());
        }

        let was_idle = self.state() == SimState::Idle;
        let lon = self.surface.wrap_lon(start_lon);
        let mut ids = Vec::with_capacity(count);
        for lat in self.deployment_latitudes(count) {
            let id = self.probes.deploy(SurfacePoint::new(lon, lat))?;
            self.drift.push((self.make_drift)(id));
            ids.push(id);
        }

        debug!("deployed {count} probes at lon {lon:.1} ({} total)", self.probes.len());
        if was_idle {
            info!("simulation running at {}", self.clock.current_tick);
        }
        Ok(ids)
    }

    fn deployment_latitudes(&self, count: usize) -> Vec<f64> {
        let threshold = self.motion.wind().lat_band_threshold;
        let (mut lo, mut hi) = (self.surface.lat_min + threshold, self.surface.lat_max - threshold);
        if lo > hi {
            lo = self.surface.lat_min;
            hi = self.surface.lat_max;
        }
        if count == 1 {
            return vec![(lo + hi) * 0.5];
        }
        let spacing = (hi - lo) / (count - 1) as f64;
        (0..count).map(|i| lo + spacing * i as f64).collect()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulation by one tick (one simulated hour by default).
    ///
    /// While Idle this does nothing and reports `advanced == false`.
    pub fn tick(&mut self) -> SimResult<TickOutcome> {
        if self.state() == SimState::Idle {
            return Ok(TickOutcome::idle(self.clock.current_tick));
        }
        let tick = self.clock.advance()?;

        let motions = self.compute_motion();

        let mut outcome = TickOutcome { tick, advanced: true, new_cells: 0, crossings: 0 };
        for (probe, motion) in self.probes.as_mut_slice().iter_mut().zip(motions) {
            outcome.new_cells += self.grid.merge(motion.cells);
            if motion.step.crossed_boundary() {
                outcome.crossings += 1;
            }
            probe.move_to(motion.step.wrapped);
            probe.close_tick();
        }

        trace!(
            "{tick}: +{} cells ({} explored), {} boundary crossings",
            outcome.new_cells,
            self.grid.len(),
            outcome.crossings
        );
        Ok(outcome)
    }

    /// Motion phase: one `ProbeMotion` per probe, in `ProbeId` order.
    fn compute_motion(&mut self) -> Vec<ProbeMotion> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let motion  = &self.motion;
        let surface = &self.surface;
        let fold    = &self.fold;
        let probes  = self.probes.as_slice();
        let drift   = &mut self.drift;

        #[cfg(not(feature = "parallel"))]
        {
            probes
                .iter()
                .zip(drift.inner.iter_mut())
                .map(|(probe, source)| move_probe(motion, surface, fold, probe, source))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut work = move || -> Vec<ProbeMotion> {
                probes
                    .par_iter()
                    .zip(drift.inner.par_iter_mut())
                    .map(|(probe, source)| move_probe(motion, surface, fold, probe, source))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Tick until the clock reaches `config.end_tick()`.
    ///
    /// Returns immediately while Idle, since the clock could never get there.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.state() == SimState::Idle {
            warn!("run called with no probes deployed; nothing to simulate");
            observer.on_sim_end(self.clock.current_tick);
            return Ok(());
        }
        let end = self.config.end_tick();
        info!("running {} probes to {end}", self.probes.len());
        while self.clock.current_tick < end {
            self.observed_tick(observer)?;
        }
        info!("finished at {}: {}", self.clock, self.report());
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Call `tick` exactly `n` times with observer hooks (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(self.clock.current_tick);
        let outcome = self.tick()?;
        observer.on_tick_end(outcome.tick, &outcome);
        if !outcome.advanced {
            return Ok(());
        }
        if outcome.tick.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(outcome.tick, &self.probes, &self.report());
        }
        if self.clock.ticks_for_days(1).is_some_and(|day| outcome.tick.is_every(day)) {
            info!("day {}: {}", self.clock.elapsed_days(), self.report());
        }
        Ok(())
    }

    // ── Read interface ────────────────────────────────────────────────────

    pub fn state(&self) -> SimState {
        if self.probes.is_empty() { SimState::Idle } else { SimState::Running }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            explored_cells: self.grid.len(),
            tick:           self.clock.current_tick,
            last_cell:      self.grid.last_cell(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn wind(&self) -> &ds_probe::WindConfig {
        self.motion.wind()
    }

    pub fn probes(&self) -> &ProbeStore {
        &self.probes
    }

    pub fn grid(&self) -> &CoverageGrid {
        &self.grid
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Coverage report for the grid as it is right now.
    pub fn report(&self) -> CoverageReport {
        CoverageReport::new(self.grid.len(), &self.surface, &self.clock)
    }
}

// ── Motion helpers ────────────────────────────────────────────────────────────

/// Advance one probe and walk the cells of the segment it covers this tick.
fn move_probe<D: DriftSource + ?Sized>(
    motion:  &MotionModel,
    surface: &Surface,
    fold:    &CellFold,
    probe:   &Probe,
    source:  &mut D,
) -> ProbeMotion {
    let step = motion.advance(probe.position, surface, source);
    let policy = motion.wind().segment_policy;
    let line = LineCells::new(
        CellKey::from_point(probe.previous),
        CellKey::from_point(step.segment_end(policy)),
    );
    let cells = match policy {
        SegmentPolicy::Unwrapped => line.filter_map(|key| fold.fold(key)).collect(),
        SegmentPolicy::Teleported => line.collect(),
    };
    ProbeMotion { step, cells }
}
