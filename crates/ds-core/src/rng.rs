//! Deterministic per-probe randomness and the `DriftSource` seam.
//!
//! # Determinism strategy
//!
//! Each probe gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (probe_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive probe IDs uniformly across the seed space.
//! Deploying more probes later never disturbs the streams of probes that
//! already exist, and the per-probe streams can be advanced on separate
//! threads without synchronisation.
//!
//! The motion model never touches `rand` directly: it draws from a
//! [`DriftSource`], so tests can substitute a scripted source and assert
//! exact trajectories.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ProbeId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Source of the one bounded random draw the motion model makes per probe
/// per tick.
pub trait DriftSource {
    /// A value uniformly distributed in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<D: DriftSource + ?Sized> DriftSource for &mut D {
    #[inline]
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

impl<D: DriftSource + ?Sized> DriftSource for Box<D> {
    #[inline]
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

// ── ProbeRng ──────────────────────────────────────────────────────────────────

/// Per-probe deterministic RNG; the default [`DriftSource`].
pub struct ProbeRng(SmallRng);

impl ProbeRng {
    /// Seed deterministically from the run's global seed and a probe ID.
    pub fn new(global_seed: u64, probe: ProbeId) -> Self {
        let seed = global_seed ^ (probe.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ProbeRng(SmallRng::seed_from_u64(seed))
    }
}

impl DriftSource for ProbeRng {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
