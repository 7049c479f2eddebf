//! Cell keys and the surface fold used on wrap ticks.

use std::fmt;

use ds_core::{Surface, SurfacePoint};

/// Integer coordinate of one unit cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantize a surface position: truncate toward zero on both axes.
    ///
    /// `as` casts saturate, so non-finite or out-of-range input cannot
    /// produce an arbitrary key.
    #[inline]
    pub fn from_point(p: SurfacePoint) -> Self {
        Self::new(p.lon as i32, p.lat as i32)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for CellKey {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ── CellFold ──────────────────────────────────────────────────────────────────

/// Maps cells walked outside the surface back onto it.
///
/// Columns wrap periodically over the longitude cell range; rows beyond
/// the latitude cell range are not part of the surface and fold to `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellFold {
    x_lo:    i64,
    x_cells: i64,
    y_lo:    i32,
    y_hi:    i32,
}

impl CellFold {
    pub fn for_surface(surface: &Surface) -> Self {
        let lo = CellKey::from_point(SurfacePoint::new(surface.lon_min, surface.lat_min));
        let hi = CellKey::from_point(SurfacePoint::new(surface.lon_max, surface.lat_max));
        Self {
            x_lo:    lo.x as i64,
            x_cells: (surface.lon_span().round() as i64).max(1),
            y_lo:    lo.y,
            y_hi:    hi.y,
        }
    }

    /// Fold `key` onto the surface, or `None` if its row lies off the surface.
    pub fn fold(&self, key: CellKey) -> Option<CellKey> {
        if key.y < self.y_lo || key.y > self.y_hi {
            return None;
        }
        let offset = key.x as i64 - self.x_lo;
        if (0..self.x_cells).contains(&offset) {
            return Some(key);
        }
        let x = self.x_lo + offset.rem_euclid(self.x_cells);
        Some(CellKey::new(x as i32, key.y))
    }
}
