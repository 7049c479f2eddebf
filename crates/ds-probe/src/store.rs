//! Probe storage: `ProbeStore` (state) and `DriftSources` (per-probe RNG).
//!
//! # Why two structs?
//!
//! The parallel motion phase needs `&mut DriftSources` (exclusive access to
//! each probe's random stream) alongside `&ProbeStore` (shared read access to
//! positions).  Keeping them in separate structs lets the borrow checker see
//! the two borrows as disjoint:
//!
//! ```ignore
//! let probes: &ProbeStore = &sim.probes;
//! let steps = sim.drift.inner
//!     .par_iter_mut()
//!     .zip(probes.as_slice())
//!     .map(|(drift, probe)| motion.advance(probe.position, &surface, drift))
//!     .collect::<Vec<_>>();
//! ```

use ds_core::{DsError, DsResult, ProbeId, SurfacePoint};

use crate::Probe;

// ── DriftSources ──────────────────────────────────────────────────────────────

/// Per-probe random streams, indexed by `ProbeId`.
pub struct DriftSources<D> {
    pub inner: Vec<D>,
}

impl<D> DriftSources<D> {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Append the stream for the next probe.  Must be called in deployment
    /// order so that index `i` belongs to `ProbeId(i)`.
    pub fn push(&mut self, source: D) {
        self.inner.push(source);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<D> Default for DriftSources<D> {
    fn default() -> Self {
        Self::new()
    }
}

// ── ProbeStore ────────────────────────────────────────────────────────────────

/// Every deployed probe, in ascending `ProbeId` order.
///
/// Probes are only ever appended; `probes[i].id == ProbeId(i)` always holds.
#[derive(Debug, Default, Clone)]
pub struct ProbeStore {
    probes: Vec<Probe>,
}

impl ProbeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a probe at `at` and return its id.
    pub fn deploy(&mut self, at: SurfacePoint) -> DsResult<ProbeId> {
        let id = ProbeId::try_from(self.probes.len())
            .ok()
            .filter(|id| *id != ProbeId::INVALID)
            .ok_or_else(|| DsError::Logic("probe id space exhausted".into()))?;
        self.probes.push(Probe::deployed(id, at));
        Ok(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    #[inline]
    pub fn get(&self, probe: ProbeId) -> Option<&Probe> {
        self.probes.get(probe.index())
    }

    #[inline]
    pub fn get_mut(&mut self, probe: ProbeId) -> Option<&mut Probe> {
        self.probes.get_mut(probe.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Probe> + '_ {
        self.probes.iter()
    }

    pub fn as_slice(&self) -> &[Probe] {
        &self.probes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Probe] {
        &mut self.probes
    }

    /// Current positions in `ProbeId` order; the read interface for
    /// renderers.
    pub fn positions(&self) -> impl Iterator<Item = SurfacePoint> + '_ {
        self.probes.iter().map(|p| p.position)
    }
}
