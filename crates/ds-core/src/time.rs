//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing logical `Tick` counter.  One tick is
//! one simulated hour by default; nothing here is tied to wall-clock time,
//! so the caller decides how often to advance it (once per display frame,
//! as fast as possible in a batch run, …).
//!
//! Using an integer tick as the canonical time unit keeps elapsed-time
//! arithmetic exact.

use std::fmt;

use crate::{DsError, DsResult};

/// Seconds in one simulated hour, the default tick length.
pub const SECS_PER_HOUR: u32 = 3_600;

const SECS_PER_DAY: u64 = 86_400;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at one tick per simulated hour this outlasts any
/// conceivable run, but the clock still checks for overflow rather than
/// wrapping.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after `self`, or `None` on overflow.
    #[inline]
    pub fn checked_offset(self, n: u64) -> Option<Tick> {
        self.0.checked_add(n).map(Tick)
    }

    /// `true` if this tick falls on a multiple of `interval` (never for 0).
    #[inline]
    pub fn is_every(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Discrete tick counter plus the tick length used to derive elapsed time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 3600.
    pub tick_duration_secs: u32,
    /// Ticks elapsed since the first deployment.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: u32) -> Self {
        Self {
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick and return the new tick.
    ///
    /// Overflow is reported as [`DsError::Logic`]; the clock is left
    /// unchanged in that case.
    pub fn advance(&mut self) -> DsResult<Tick> {
        let next = self
            .current_tick
            .checked_offset(1)
            .ok_or_else(|| DsError::Logic(format!("tick counter overflow at {}", self.current_tick)))?;
        self.current_tick = next;
        Ok(next)
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> u128 {
        self.current_tick.0 as u128 * self.tick_duration_secs as u128
    }

    /// Whole simulated days elapsed (floor).  With hourly ticks this is
    /// `ticks / 24`.
    #[inline]
    pub fn elapsed_days(&self) -> u64 {
        (self.elapsed_secs() / SECS_PER_DAY as u128) as u64
    }

    /// Break elapsed time into (day, hour, minute) components.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs();
        let days = (total_secs / SECS_PER_DAY as u128) as u64;
        let hours = ((total_secs % SECS_PER_DAY as u128) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    /// How many ticks span `days` simulated days (rounded up), or `None`
    /// if `days` is too large to express in seconds.
    #[inline]
    pub fn ticks_for_days(&self, days: u64) -> Option<u64> {
        let secs = days.checked_mul(SECS_PER_DAY)?;
        Some(secs.div_ceil(self.tick_duration_secs.max(1) as u64))
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(SECS_PER_HOUR)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration.
///
/// Typically loaded from a JSON scenario file by the application crate and
/// passed to `ds_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Default: 3600 (one hour).
    pub tick_duration_secs: u32,

    /// Ticks `Simulation::run` advances to.  `run_ticks` ignores it.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical coverage.
    pub seed: u64,

    /// Worker thread count for the `parallel` feature.  `None` uses Rayon's
    /// global pool.
    pub num_threads: Option<usize>,

    /// Report a snapshot to observers every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which `run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    pub fn validate(&self) -> DsResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(DsError::Config("tick_duration_secs must be positive".into()));
        }
        if self.num_threads == Some(0) {
            return Err(DsError::Config("num_threads must be positive when set".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    SECS_PER_HOUR,
            total_ticks:           365 * 24,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 24,
        }
    }
}
