//! Fluent builder for constructing a [`Simulation`].

use ds_core::{DriftSource, ProbeId, ProbeRng, SimConfig, Surface};
use ds_grid::{CellFold, CoverageGrid};
use ds_probe::{DriftSources, MotionModel, ProbeStore, WindConfig};

use crate::{SimResult, Simulation};

/// Factory producing the drift source for each newly deployed probe.
pub type DriftFactory<D> = Box<dyn FnMut(ProbeId) -> D + Send>;

/// Fluent builder for [`Simulation<D>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                        |
/// |-------------------------|------------------------------------------------|
/// | `.surface(s)`           | `Surface::mars()`                              |
/// | `.wind(w)`              | `WindConfig::mars()`                           |
/// | `.drift_sources(f)`     | `ProbeRng::new(config.seed, id)` per probe     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .surface(Surface::mars())
///     .build()?;
/// sim.deploy(10, 0.0)?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D> {
    config:     SimConfig,
    surface:    Surface,
    wind:       WindConfig,
    make_drift: DriftFactory<D>,
}

impl SimBuilder<ProbeRng> {
    /// Create a builder whose probes draw from seeded [`ProbeRng`]s.
    pub fn new(config: SimConfig) -> Self {
        let seed = config.seed;
        Self {
            config,
            surface:    Surface::mars(),
            wind:       WindConfig::mars(),
            make_drift: Box::new(move |probe| ProbeRng::new(seed, probe)),
        }
    }
}

impl<D: DriftSource + Send> SimBuilder<D> {
    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn wind(mut self, wind: WindConfig) -> Self {
        self.wind = wind;
        self
    }

    /// Replace the per-probe random source.  `factory` is called once per
    /// deployed probe, in `ProbeId` order.
    pub fn drift_sources<E, F>(self, factory: F) -> SimBuilder<E>
    where
        E: DriftSource + Send,
        F: FnMut(ProbeId) -> E + Send + 'static,
    {
        SimBuilder {
            config:     self.config,
            surface:    self.surface,
            wind:       self.wind,
            make_drift: Box::new(factory),
        }
    }

    /// Validate all inputs and return an Idle simulation.
    pub fn build(self) -> SimResult<Simulation<D>> {
        self.config.validate()?;
        self.surface.validate()?;
        let motion = MotionModel::new(self.wind)?;

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Simulation {
            clock:      self.config.make_clock(),
            config:     self.config,
            fold:       CellFold::for_surface(&self.surface),
            surface:    self.surface,
            motion,
            probes:     ProbeStore::new(),
            drift:      DriftSources::new(),
            grid:       CoverageGrid::new(),
            make_drift: self.make_drift,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
