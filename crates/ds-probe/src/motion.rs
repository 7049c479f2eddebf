//! Wind-driven motion model.
//!
//! # Per-tick update
//!
//! ```text
//! lon += wind_speed_lon * dt
//!
//! bias = max_lat_wind_speed        if lat < lat_min + lat_band_threshold
//!      = 0                         if lat > lat_max - lat_band_threshold
//!      = max_lat_wind_speed / 2    otherwise
//! lat += (bias - unit * max_lat_wind_speed) * dt        unit ∈ [0, 1)
//!
//! lon: periodic wrap       lat: teleport to the opposite bound
//! ```
//!
//! The latitude term is a soft bias, not a reflection: it pushes probes
//! away from the lower bound and lets them drift down from the upper one,
//! but a probe can still reach either bound.

use ds_core::{DriftSource, DsError, DsResult, Surface, SurfacePoint};

/// Which segment is rasterized on a tick where the probe crosses a bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentPolicy {
    /// Rasterize `previous → unwrapped` and fold walked cells back onto the
    /// surface: columns wrap, rows past a latitude bound are dropped.  A
    /// wrap never draws a segment across the whole surface.
    #[default]
    Unwrapped,
    /// Rasterize `previous → wrapped` unchanged.  On a wrap tick this draws
    /// a spurious segment spanning the surface; kept for comparison with
    /// legacy coverage figures.
    Teleported,
}

impl std::str::FromStr for SegmentPolicy {
    type Err = DsError;

    fn from_str(s: &str) -> DsResult<Self> {
        match s {
            "unwrapped"  => Ok(SegmentPolicy::Unwrapped),
            "teleported" => Ok(SegmentPolicy::Teleported),
            other        => Err(DsError::Config(format!("unknown segment policy `{other}`"))),
        }
    }
}

/// Motion constants, fixed for the lifetime of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindConfig {
    /// Eastward drift per hour, in surface units.
    pub wind_speed_lon: f64,
    /// Upper bound of the latitudinal random step per hour; also the full
    /// northward bias near the lower bound.
    pub max_lat_wind_speed: f64,
    /// Width of the bands next to each latitude bound where the bias changes.
    pub lat_band_threshold: f64,
    /// Simulated hours per tick.
    pub dt_hours: f64,
    pub segment_policy: SegmentPolicy,
}

impl WindConfig {
    /// Mars averages: 30 km/h zonal wind, 10 km/h meridional, in
    /// hectometres per hour, with 5 000 hm bands and hourly ticks.
    pub fn mars() -> Self {
        Self {
            wind_speed_lon:     300.0,
            max_lat_wind_speed: 100.0,
            lat_band_threshold: 5_000.0,
            dt_hours:           1.0,
            segment_policy:     SegmentPolicy::Unwrapped,
        }
    }

    pub fn validate(&self) -> DsResult<()> {
        let values = [
            ("wind_speed_lon", self.wind_speed_lon),
            ("max_lat_wind_speed", self.max_lat_wind_speed),
            ("lat_band_threshold", self.lat_band_threshold),
            ("dt_hours", self.dt_hours),
        ];
        for (name, v) in values {
            if !v.is_finite() {
                return Err(DsError::Config(format!("{name} must be finite, got {v}")));
            }
        }
        if self.max_lat_wind_speed < 0.0 || self.lat_band_threshold < 0.0 {
            return Err(DsError::Config(
                "max_lat_wind_speed and lat_band_threshold must be non-negative".into(),
            ));
        }
        if self.dt_hours <= 0.0 {
            return Err(DsError::Config(format!("dt_hours must be positive, got {}", self.dt_hours)));
        }
        Ok(())
    }
}

impl Default for WindConfig {
    fn default() -> Self {
        Self::mars()
    }
}

/// Outcome of advancing one probe by one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// Position before any boundary policy was applied.
    pub unwrapped: SurfacePoint,
    /// Position after the longitude wrap and latitude teleport.
    pub wrapped: SurfacePoint,
}

impl Step {
    /// `true` if a boundary policy moved the probe this tick.
    #[inline]
    pub fn crossed_boundary(&self) -> bool {
        self.unwrapped != self.wrapped
    }

    /// End point of the segment to rasterize under `policy`.
    #[inline]
    pub fn segment_end(&self, policy: SegmentPolicy) -> SurfacePoint {
        match policy {
            SegmentPolicy::Unwrapped  => self.unwrapped,
            SegmentPolicy::Teleported => self.wrapped,
        }
    }
}

/// Computes next positions from a validated [`WindConfig`].
#[derive(Clone, Debug)]
pub struct MotionModel {
    wind: WindConfig,
}

impl MotionModel {
    pub fn new(wind: WindConfig) -> DsResult<Self> {
        wind.validate()?;
        Ok(Self { wind })
    }

    #[inline]
    pub fn wind(&self) -> &WindConfig {
        &self.wind
    }

    /// Northward bias for a probe at `lat`.
    pub fn lat_bias(&self, lat: f64, surface: &Surface) -> f64 {
        let max = self.wind.max_lat_wind_speed;
        if lat < surface.lat_min + self.wind.lat_band_threshold {
            max
        } else if lat > surface.lat_max - self.wind.lat_band_threshold {
            0.0
        } else {
            max * 0.5
        }
    }

    /// Advance a probe at `from` by one tick, drawing exactly once from
    /// `drift`.
    pub fn advance<D>(&self, from: SurfacePoint, surface: &Surface, drift: &mut D) -> Step
    where
        D: DriftSource + ?Sized,
    {
        let dt = self.wind.dt_hours;
        let lon = from.lon + self.wind.wind_speed_lon * dt;

        let bias = self.lat_bias(from.lat, surface);
        let lat = from.lat + (bias - drift.unit() * self.wind.max_lat_wind_speed) * dt;

        let unwrapped = SurfacePoint::new(lon, lat);
        Step { unwrapped, wrapped: surface.apply_bounds(unwrapped) }
    }
}
