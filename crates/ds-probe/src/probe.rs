//! Per-probe position state.

use ds_core::{ProbeId, SurfacePoint};

/// One drifting probe.
///
/// `previous` is the position at the end of the last tick; together with
/// `position` it forms the segment rasterized this tick.  A freshly deployed
/// probe has `previous == position`, a zero-length initial segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub id:       ProbeId,
    pub position: SurfacePoint,
    pub previous: SurfacePoint,
}

impl Probe {
    #[inline]
    pub fn deployed(id: ProbeId, at: SurfacePoint) -> Self {
        Self { id, position: at, previous: at }
    }

    /// Move to `to` for the current tick.
    #[inline]
    pub fn move_to(&mut self, to: SurfacePoint) {
        self.position = to;
    }

    /// Close the tick: the current position becomes the next segment's start.
    #[inline]
    pub fn close_tick(&mut self) {
        self.previous = self.position;
    }
}
