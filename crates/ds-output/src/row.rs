//! Plain data rows written by output backends.

/// Position of one probe at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSnapshotRow {
    pub probe_id: u32,
    pub tick:     u64,
    pub lon:      f64,
    pub lat:      f64,
}

/// Coverage at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageRow {
    pub tick:               u64,
    pub elapsed_days:       u64,
    /// Cells first marked since the previous coverage row.
    pub new_cells:          u64,
    pub explored_cells:     u64,
    /// Explored percentage in hundredths, truncated (`2900` = 29.00 %).
    pub percent_hundredths: u64,
}

impl CoverageRow {
    pub fn percent_text(&self) -> String {
        format!("{}.{:02}", self.percent_hundredths / 100, self.percent_hundredths % 100)
    }
}
