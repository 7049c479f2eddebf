//! Read-side views of the simulation: `Snapshot` and `CoverageReport`.
//!
//! Both are plain values computed on demand from the current grid size and
//! clock.  Nothing here is cached, so a report always reflects the grid at
//! the moment it was taken.

use std::fmt;

use ds_core::{SimClock, Surface, Tick};
use ds_grid::CellKey;

/// Consistent between-tick view for displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub explored_cells: usize,
    pub tick:           Tick,
    /// Last cell touched by rasterization.  Diagnostic only.
    pub last_cell:      Option<CellKey>,
}

/// Coverage figures derived from the explored-cell count and surface area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageReport {
    pub explored_cells:      u64,
    pub cells_per_unit_area: u64,
    pub total_area:          u64,
    pub tick:                Tick,
    pub elapsed_days:        u64,
}

impl CoverageReport {
    pub fn new(explored_cells: usize, surface: &Surface, clock: &SimClock) -> Self {
        Self {
            explored_cells:      explored_cells as u64,
            cells_per_unit_area: surface.cells_per_unit_area,
            total_area:          surface.total_area,
            tick:                clock.current_tick,
            elapsed_days:        clock.elapsed_days(),
        }
    }

    /// Explored area in the surface's area units (km² for Mars).
    pub fn explored_area(&self) -> f64 {
        self.explored_cells as f64 / self.cells_per_unit_area as f64
    }

    /// `100 * (cells / cells_per_unit_area) / total_area`.
    pub fn percent_explored(&self) -> f64 {
        100.0 * self.explored_area() / self.total_area as f64
    }

    /// Percentage in hundredths of a percent, truncated.  Exact integer
    /// arithmetic, so `29.00%` never shows as `28.99%`.
    pub fn percent_hundredths(&self) -> u64 {
        let total_cells = self.cells_per_unit_area as u128 * self.total_area as u128;
        if total_cells == 0 {
            return 0;
        }
        (self.explored_cells as u128 * 10_000 / total_cells) as u64
    }

    /// Two-decimal truncated percentage, e.g. `"0.00"`.
    pub fn percent_text(&self) -> String {
        let h = self.percent_hundredths();
        format!("{}.{:02}", h / 100, h % 100)
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "explored {:.2} / {} = {}% after {} days",
            self.explored_area(),
            self.total_area,
            self.percent_text(),
            self.elapsed_days,
        )
    }
}
