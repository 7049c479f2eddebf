//! `ds-core` — foundational types for the `drift_survey` coverage simulator.
//!
//! This crate is a dependency of every other `ds-*` crate.  It intentionally
//! has no `ds-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ProbeId`                                             |
//! | [`geo`]         | `SurfacePoint`, `Surface` (bounds, wrap, teleport)    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `DriftSource`, `ProbeRng` (per-probe)                 |
//! | [`error`]       | `DsError`, `DsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public config types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DsError, DsResult};
pub use geo::{Surface, SurfacePoint};
pub use ids::ProbeId;
pub use rng::{DriftSource, ProbeRng};
pub use time::{SimClock, SimConfig, Tick};
