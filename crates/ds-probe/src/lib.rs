//! `ds-probe` — probe state and the wind-driven motion model.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`probe`]   | `Probe` — current and previous position                         |
//! | [`store`]   | `ProbeStore` (probe state), `DriftSources<D>` (per-probe RNG)   |
//! | [`motion`]  | `WindConfig`, `SegmentPolicy`, `MotionModel`, `Step`            |
//!
//! # Motion model
//!
//! Every tick each probe drifts a fixed distance east and takes one bounded
//! random step in latitude whose bias depends on which band it is in.
//! [`MotionModel::advance`] returns both the raw (unwrapped) and the
//! boundary-corrected position so the caller can decide which segment to
//! rasterize on a wrap tick (see [`SegmentPolicy`]).

pub mod motion;
pub mod probe;
pub mod store;


pub use motion::{MotionModel, SegmentPolicy, Step, WindConfig};
pub use probe::Probe;
pub use store::{DriftSources, ProbeStore};
