//! `ds-sim` — the coverage simulation core for drift_survey.
//!
//! # Tick loop
//!
//! ```text
//! deploy(count, start_lon)          Idle → Running on the first call
//!
//! tick():
//!   Idle     → no-op, clock unchanged
//!   Running  → ① clock.advance()
//!              ② Motion — every probe: MotionModel::advance with its own
//!                         DriftSource, walk the segment's cells
//!                         (parallel with the `parallel` feature)
//!              ③ Apply  — ascending ProbeId: merge cells into the grid,
//!                         move the probe, close its tick
//! ```
//!
//! Reading (`snapshot`, `report`) never mutates and can be called between
//! any two ticks.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the motion phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash-backed visited-cell set.                        |
//! | `serde`    | Serde derives on configuration types.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ds_core::SimConfig;
//! use ds_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.deploy(10, 0.0)?;
//! sim.run(&mut NoopObserver)?;
//! println!("{}", sim.report());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{DriftFactory, SimBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{CoverageReport, Snapshot};
pub use sim::{SimState, Simulation, TickOutcome};
