//! Surface geometry: the bounded 2D domain probes drift over.
//!
//! Coordinates are plain `f64` in hectometre-equivalent units, the same
//! resolution as one coverage cell.  Longitude is periodic (toroidal wrap);
//! latitude is not: leaving either latitude bound teleports the probe to
//! the opposite bound.  There is no pole model.

use std::fmt;

use crate::{DsError, DsResult};

/// Circumference of Mars in the surface's distance units.
pub const MARS_CIRCUMFERENCE: f64 = 213_440.0;

/// Surface area of Mars in km².
pub const MARS_AREA_KM2: u64 = 144_800_000;

/// Hectare cells per km².
pub const HECTARES_PER_KM2: u64 = 100;

/// A position on the surface.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfacePoint {
    pub lon: f64,
    pub lat: f64,
}

impl SurfacePoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for SurfacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lon {:.1}, lat {:.1})", self.lon, self.lat)
    }
}

/// The bounded simulation domain.
///
/// Immutable for the lifetime of a run.  `total_area` and
/// `cells_per_unit_area` are used only for percentage reporting:
/// `total_area` is expressed in area units (km² for Mars) and
/// `cells_per_unit_area` says how many grid cells make up one such unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub total_area: u64,
    pub cells_per_unit_area: u64,
}

impl Surface {
    /// Build and validate a surface.
    pub fn new(
        lon_min:             f64,
        lon_max:             f64,
        lat_min:             f64,
        lat_max:             f64,
        total_area:          u64,
        cells_per_unit_area: u64,
    ) -> DsResult<Self> {
        let surface = Self { lon_min, lon_max, lat_min, lat_max, total_area, cells_per_unit_area };
        surface.validate()?;
        Ok(surface)
    }

    /// Mars flattened to a plane: one circumference wide, half of one tall,
    /// centred on the origin.
    pub fn mars() -> Self {
        let half = MARS_CIRCUMFERENCE / 2.0;
        Self {
            lon_min:             -half,
            lon_max:             half,
            lat_min:             -half * 0.5,
            lat_max:             half * 0.5,
            total_area:          MARS_AREA_KM2,
            cells_per_unit_area: HECTARES_PER_KM2,
        }
    }

    /// Check the bound ordering and area invariants.
    ///
    /// Called by `Surface::new`; call it yourself after deserializing.
    pub fn validate(&self) -> DsResult<()> {
        let bounds = [self.lon_min, self.lon_max, self.lat_min, self.lat_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(DsError::InvalidArgument("surface bounds must be finite".into()));
        }
        if self.lon_min >= self.lon_max {
            return Err(DsError::InvalidArgument(format!(
                "lon_min {} must be below lon_max {}",
                self.lon_min, self.lon_max
            )));
        }
        if self.lat_min >= self.lat_max {
            return Err(DsError::InvalidArgument(format!(
                "lat_min {} must be below lat_max {}",
                self.lat_min, self.lat_max
            )));
        }
        if self.total_area == 0 || self.cells_per_unit_area == 0 {
            return Err(DsError::InvalidArgument(
                "total_area and cells_per_unit_area must be positive".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// `true` if `p` lies inside the closed bounds.
    #[inline]
    pub fn contains(&self, p: SurfacePoint) -> bool {
        (self.lon_min..=self.lon_max).contains(&p.lon)
            && (self.lat_min..=self.lat_max).contains(&p.lat)
    }

    /// Total number of grid cells the surface represents.
    #[inline]
    pub fn total_cells(&self) -> u128 {
        self.total_area as u128 * self.cells_per_unit_area as u128
    }

    /// Periodic longitude wrap into `[lon_min, lon_max)`.
    ///
    /// Overshoot by more than one span is reduced modulo the span, so a
    /// probe always lands where it would after wrapping continuously.
    pub fn wrap_lon(&self, lon: f64) -> f64 {
        if lon >= self.lon_min && lon < self.lon_max {
            return lon;
        }
        let wrapped = self.lon_min + (lon - self.lon_min).rem_euclid(self.lon_span());
        // rem_euclid can round up to exactly the span for tiny negatives.
        if wrapped >= self.lon_max { self.lon_min } else { wrapped }
    }

    /// Non-periodic latitude policy: below `lat_min` jumps to exactly
    /// `lat_max`, above `lat_max` jumps to exactly `lat_min`.
    #[inline]
    pub fn teleport_lat(&self, lat: f64) -> f64 {
        if lat < self.lat_min {
            self.lat_max
        } else if lat > self.lat_max {
            self.lat_min
        } else {
            lat
        }
    }

    /// Apply both boundary policies to a point.
    #[inline]
    pub fn apply_bounds(&self, p: SurfacePoint) -> SurfacePoint {
        SurfacePoint::new(self.wrap_lon(p.lon), self.teleport_lat(p.lat))
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::mars()
    }
}
