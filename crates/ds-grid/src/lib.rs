//! `ds-grid` — sparse coverage grid for the drift_survey simulator.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`cell`]   | `CellKey` (truncate-toward-zero quantization), `CellFold`       |
//! | [`line`]   | `LineCells` — symmetric integer (Bresenham) segment walker      |
//! | [`grid`]   | `CoverageGrid` — append-only visited-cell set                   |
//!
//! # Cell keys
//!
//! A position `(lon, lat)` maps to the cell `(lon as i32, lat as i32)`:
//! both axes are truncated toward zero.  Every implementation that wants
//! bit-for-bit identical coverage must use the same rule, including the
//! consequence that the cells `0` on each axis cover `(-1, 1)`.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Backs the visited set with `FxHashSet` instead of SipHash.|
//! | `serde`   | Derives `Serialize`/`Deserialize` on `CellKey`.          |

pub mod cell;
pub mod grid;
pub mod line;


pub use cell::{CellFold, CellKey};
pub use grid::{CellSet, CoverageGrid};
pub use line::LineCells;
